//! File and checkpoint models

use core_types::CheckpointId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of stored entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileType {
    Notebook,
    File,
    Directory,
}

impl FileType {
    /// Returns the lowercase wire string for this type
    pub fn as_str(&self) -> &'static str {
        match self {
            FileType::Notebook => "notebook",
            FileType::File => "file",
            FileType::Directory => "directory",
        }
    }
}

impl fmt::Display for FileType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Model of one stored document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileModel {
    /// Store path (unique key)
    pub path: String,
    /// Display name (final path segment)
    pub name: String,
    /// Document content, if loaded
    pub content: Option<String>,
    /// Logical tick of the last mutation
    pub last_modified: u64,
    /// Logical tick of creation
    pub created: u64,
    /// Whether the document accepts saves
    pub writable: bool,
    /// Kind of entry
    #[serde(rename = "type")]
    pub file_type: FileType,
    /// Serialization format ("json", "text", ...)
    pub format: Option<String>,
    /// MIME type, when meaningful
    pub mimetype: Option<String>,
}

/// Bookkeeping record for one checkpoint of one document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Checkpoint {
    /// Unique checkpoint identity
    pub id: CheckpointId,
    /// Logical tick the checkpoint was taken at
    pub last_modified: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_type_wire_strings() {
        assert_eq!(FileType::Notebook.as_str(), "notebook");
        assert_eq!(
            serde_json::to_string(&FileType::Directory).unwrap(),
            "\"directory\""
        );
    }

    #[test]
    fn test_file_model_serializes_type_field() {
        let model = FileModel {
            path: "a.ipynb".to_string(),
            name: "a.ipynb".to_string(),
            content: Some(String::new()),
            last_modified: 1,
            created: 1,
            writable: true,
            file_type: FileType::Notebook,
            format: Some("json".to_string()),
            mimetype: None,
        };
        let json = serde_json::to_value(&model).unwrap();
        assert_eq!(json["type"], "notebook");
        assert_eq!(json["writable"], true);
    }
}
