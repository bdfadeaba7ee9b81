//! In-memory contents store with checkpoint bookkeeping

use crate::model::{Checkpoint, FileModel, FileType};
use core_types::CheckpointId;
use signals::Signal;
use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;
use thiserror::Error;

/// Errors surfaced by the contents store
///
/// Mirrors the real backend's error shape: a missing path is a
/// 404-equivalent condition, permanent and never retried.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ContentsError {
    /// No document exists at the requested path
    #[error("404 Not Found: {path}")]
    NotFound { path: String },
}

impl ContentsError {
    /// Returns the HTTP status the real backend would answer with
    pub fn status_code(&self) -> u16 {
        match self {
            ContentsError::NotFound { .. } => 404,
        }
    }
}

/// Change notification fired by the store
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileChange {
    /// A document was created (untitled or first save)
    Created(FileModel),
    /// An existing document was saved
    Saved(FileModel),
    /// A document was removed
    Deleted(String),
}

/// Options for creating an untitled document
#[derive(Debug, Clone)]
pub struct CreateOptions {
    file_type: FileType,
    ext: Option<String>,
}

impl CreateOptions {
    /// Creates options for a new notebook
    pub fn notebook() -> Self {
        Self {
            file_type: FileType::Notebook,
            ext: None,
        }
    }

    /// Creates options for a new plain file
    pub fn file() -> Self {
        Self {
            file_type: FileType::File,
            ext: None,
        }
    }

    /// Creates options for a new directory
    pub fn directory() -> Self {
        Self {
            file_type: FileType::Directory,
            ext: None,
        }
    }

    /// Overrides the file extension (plain files only)
    pub fn with_ext(mut self, ext: impl Into<String>) -> Self {
        self.ext = Some(ext.into());
        self
    }
}

/// Options for saving a document
#[derive(Debug, Clone, Default)]
pub struct SaveOptions {
    content: Option<String>,
}

impl SaveOptions {
    /// Creates options carrying no content change
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the content to store
    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }
}

/// In-memory document store emulator
///
/// A key-value store over document paths, with checkpoint bookkeeping
/// and a change broadcast. Timestamps are logical ticks: strictly
/// increasing per mutation, never wall-clock.
pub struct ContentsStore {
    files: RefCell<BTreeMap<String, FileModel>>,
    checkpoints: RefCell<BTreeMap<String, Vec<Checkpoint>>>,
    file_changed: Signal<FileChange>,
    untitled_count: Cell<u64>,
    tick: Cell<u64>,
}

impl Default for ContentsStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ContentsStore {
    /// Creates an empty store
    pub fn new() -> Self {
        Self {
            files: RefCell::new(BTreeMap::new()),
            checkpoints: RefCell::new(BTreeMap::new()),
            file_changed: Signal::new(),
            untitled_count: Cell::new(0),
            tick: Cell::new(0),
        }
    }

    /// Returns a handle to the change broadcast stream
    pub fn file_changed(&self) -> Signal<FileChange> {
        self.file_changed.clone()
    }

    /// Returns the number of stored documents
    pub fn len(&self) -> usize {
        self.files.borrow().len()
    }

    /// Returns whether the store is empty
    pub fn is_empty(&self) -> bool {
        self.files.borrow().is_empty()
    }

    /// Returns whether a document exists at a path
    pub fn contains(&self, path: &str) -> bool {
        self.files.borrow().contains_key(path)
    }

    /// Creates a new untitled document
    ///
    /// Names are generated from a per-store counter so repeated calls
    /// never collide. Fires one `Created` change.
    pub fn new_untitled(&self, options: CreateOptions) -> FileModel {
        let count = self.untitled_count.get();
        self.untitled_count.set(count + 1);
        let suffix = if count == 0 {
            String::new()
        } else {
            count.to_string()
        };

        let name = match options.file_type {
            FileType::Notebook => format!("Untitled{}.ipynb", suffix),
            FileType::File => {
                let ext = options.ext.as_deref().unwrap_or(".txt");
                format!("untitled{}{}", suffix, ext)
            }
            FileType::Directory => format!("Untitled Folder{}", suffix),
        };

        let now = self.next_tick();
        let model = FileModel {
            path: name.clone(),
            name,
            content: Some(String::new()),
            last_modified: now,
            created: now,
            writable: true,
            file_type: options.file_type,
            format: Some(Self::format_for(options.file_type).to_string()),
            mimetype: Self::mimetype_for(options.file_type).map(str::to_string),
        };

        self.files
            .borrow_mut()
            .insert(model.path.clone(), model.clone());
        self.file_changed.emit(&FileChange::Created(model.clone()));
        model
    }

    /// Saves a document, creating it if the path is new
    ///
    /// Bumps `last_modified` and fires one change (`Created` for a new
    /// path, `Saved` otherwise).
    pub fn save(&self, path: &str, options: SaveOptions) -> FileModel {
        let now = self.next_tick();
        let mut files = self.files.borrow_mut();

        let (model, created) = match files.get(path) {
            Some(existing) => {
                let mut model = existing.clone();
                if let Some(content) = options.content {
                    model.content = Some(content);
                }
                model.last_modified = now;
                (model, false)
            }
            None => {
                let file_type = Self::infer_type(path);
                (
                    FileModel {
                        path: path.to_string(),
                        name: Self::basename(path),
                        content: options.content.or_else(|| Some(String::new())),
                        last_modified: now,
                        created: now,
                        writable: true,
                        file_type,
                        format: Some(Self::format_for(file_type).to_string()),
                        mimetype: Self::mimetype_for(file_type).map(str::to_string),
                    },
                    true,
                )
            }
        };

        files.insert(path.to_string(), model.clone());
        drop(files);

        let change = if created {
            FileChange::Created(model.clone())
        } else {
            FileChange::Saved(model.clone())
        };
        self.file_changed.emit(&change);
        model
    }

    /// Fetches a document by path
    ///
    /// Fails with a 404-equivalent condition when the path is absent.
    pub fn get(&self, path: &str) -> Result<FileModel, ContentsError> {
        self.files
            .borrow()
            .get(path)
            .cloned()
            .ok_or_else(|| ContentsError::NotFound {
                path: path.to_string(),
            })
    }

    /// Removes a document, firing one `Deleted` change
    pub fn delete(&self, path: &str) -> Result<(), ContentsError> {
        let removed = self.files.borrow_mut().remove(path);
        if removed.is_none() {
            return Err(ContentsError::NotFound {
                path: path.to_string(),
            });
        }
        self.checkpoints.borrow_mut().remove(path);
        self.file_changed
            .emit(&FileChange::Deleted(path.to_string()));
        Ok(())
    }

    /// Records a checkpoint of a document's current state
    pub fn create_checkpoint(&self, path: &str) -> Result<Checkpoint, ContentsError> {
        let model = self.get(path)?;
        let checkpoint = Checkpoint {
            id: CheckpointId::new(),
            last_modified: model.last_modified,
        };
        self.checkpoints
            .borrow_mut()
            .entry(path.to_string())
            .or_default()
            .push(checkpoint.clone());
        Ok(checkpoint)
    }

    /// Lists a document's checkpoints, oldest first
    ///
    /// A path with no checkpoints (or no document) reads as empty.
    pub fn list_checkpoints(&self, path: &str) -> Vec<Checkpoint> {
        self.checkpoints
            .borrow()
            .get(path)
            .cloned()
            .unwrap_or_default()
    }

    fn next_tick(&self) -> u64 {
        let now = self.tick.get() + 1;
        self.tick.set(now);
        now
    }

    fn basename(path: &str) -> String {
        path.rsplit('/').next().unwrap_or(path).to_string()
    }

    fn infer_type(path: &str) -> FileType {
        if path.ends_with(".ipynb") {
            FileType::Notebook
        } else {
            FileType::File
        }
    }

    fn format_for(file_type: FileType) -> &'static str {
        match file_type {
            FileType::Notebook => "json",
            FileType::File => "text",
            FileType::Directory => "json",
        }
    }

    fn mimetype_for(file_type: FileType) -> Option<&'static str> {
        match file_type {
            FileType::File => Some("text/plain"),
            FileType::Notebook | FileType::Directory => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use signals::Recorder;

    #[test]
    fn test_new_untitled_notebook() {
        let store = ContentsStore::new();
        let model = store.new_untitled(CreateOptions::notebook());

        assert_eq!(model.path, "Untitled.ipynb");
        assert_eq!(model.file_type, FileType::Notebook);
        assert_eq!(model.format.as_deref(), Some("json"));
        assert!(model.writable);
        assert!(store.contains(&model.path));
    }

    #[test]
    fn test_untitled_names_never_collide() {
        let store = ContentsStore::new();
        let first = store.new_untitled(CreateOptions::notebook());
        let second = store.new_untitled(CreateOptions::notebook());
        let third = store.new_untitled(CreateOptions::file().with_ext(".md"));

        assert_eq!(first.path, "Untitled.ipynb");
        assert_eq!(second.path, "Untitled1.ipynb");
        assert_eq!(third.path, "untitled2.md");
        assert_eq!(store.len(), 3);
    }

    #[test]
    fn test_save_round_trip() {
        let store = ContentsStore::new();
        let model = store.new_untitled(CreateOptions::notebook());

        let saved = store.save(&model.path, SaveOptions::new().with_content("{\"cells\":[]}"));
        assert!(saved.last_modified > model.last_modified);

        let fetched = store.get(&model.path).unwrap();
        assert_eq!(fetched.content.as_deref(), Some("{\"cells\":[]}"));
        assert_eq!(fetched.last_modified, saved.last_modified);
        assert_eq!(fetched.created, model.created);
    }

    #[test]
    fn test_save_unknown_path_creates() {
        let store = ContentsStore::new();
        let model = store.save("notes/todo.txt", SaveOptions::new().with_content("ship it"));

        assert_eq!(model.name, "todo.txt");
        assert_eq!(model.file_type, FileType::File);
        assert_eq!(model.mimetype.as_deref(), Some("text/plain"));
        assert_eq!(store.get("notes/todo.txt").unwrap(), model);
    }

    #[test]
    fn test_get_missing_path_is_404() {
        let store = ContentsStore::new();
        let error = store.get("ghost.ipynb").unwrap_err();
        assert_eq!(
            error,
            ContentsError::NotFound {
                path: "ghost.ipynb".to_string()
            }
        );
        assert_eq!(error.status_code(), 404);
    }

    #[test]
    fn test_every_create_and_save_broadcasts() {
        let store = ContentsStore::new();
        let changes = Recorder::new();
        changes.attach(&store.file_changed());

        let model = store.new_untitled(CreateOptions::notebook());
        store.save(&model.path, SaveOptions::new().with_content("x"));
        store.delete(&model.path).unwrap();

        let events = changes.events();
        assert_eq!(events.len(), 3);
        assert!(matches!(events[0], FileChange::Created(_)));
        assert!(matches!(events[1], FileChange::Saved(_)));
        assert_eq!(events[2], FileChange::Deleted(model.path));
    }

    #[test]
    fn test_delete_missing_path_is_404() {
        let store = ContentsStore::new();
        assert_eq!(store.delete("nope").unwrap_err().status_code(), 404);
    }

    #[test]
    fn test_checkpoint_bookkeeping() {
        let store = ContentsStore::new();
        let model = store.new_untitled(CreateOptions::notebook());

        assert!(store.list_checkpoints(&model.path).is_empty());

        let first = store.create_checkpoint(&model.path).unwrap();
        store.save(&model.path, SaveOptions::new().with_content("y"));
        let second = store.create_checkpoint(&model.path).unwrap();

        let checkpoints = store.list_checkpoints(&model.path);
        assert_eq!(checkpoints, vec![first.clone(), second.clone()]);
        assert_ne!(first.id, second.id);
        assert!(second.last_modified > first.last_modified);
    }

    #[test]
    fn test_checkpoint_missing_path_is_404() {
        let store = ContentsStore::new();
        assert!(store.create_checkpoint("ghost").is_err());
    }

    #[test]
    fn test_delete_clears_checkpoints() {
        let store = ContentsStore::new();
        let model = store.new_untitled(CreateOptions::notebook());
        store.create_checkpoint(&model.path).unwrap();

        store.delete(&model.path).unwrap();
        assert!(store.list_checkpoints(&model.path).is_empty());
    }

    #[test]
    fn test_directory_creation() {
        let store = ContentsStore::new();
        let model = store.new_untitled(CreateOptions::directory());
        assert_eq!(model.path, "Untitled Folder");
        assert_eq!(model.file_type, FileType::Directory);
    }
}
