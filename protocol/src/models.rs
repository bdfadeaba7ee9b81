//! Kernel, session, and kernel-spec models

use core_types::{KernelId, SessionId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Identity of one logical kernel instance
///
/// The id is fixed for the instance's lifetime; a cloned connection is
/// a new instance with a new id. Switching a session's kernel rebinds
/// the kernel's model to the registry slot it switched to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KernelModel {
    /// Unique identity of this instance
    pub id: KernelId,
    /// Kernel spec name this instance runs (e.g. "python3")
    pub name: String,
}

impl KernelModel {
    /// Creates a model with a fresh id
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: KernelId::new(),
            name: name.into(),
        }
    }
}

/// Binding of one document to one kernel
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionModel {
    /// Unique identity of the session
    pub id: SessionId,
    /// Document path
    pub path: String,
    /// Document name
    pub name: String,
    /// Document type (e.g. "notebook")
    #[serde(rename = "type")]
    pub session_type: String,
    /// Model of the currently bound kernel
    pub kernel: KernelModel,
}

impl SessionModel {
    /// Creates a session model with a fresh id
    pub fn new(
        path: impl Into<String>,
        name: impl Into<String>,
        session_type: impl Into<String>,
        kernel: KernelModel,
    ) -> Self {
        Self {
            id: SessionId::new(),
            path: path.into(),
            name: name.into(),
            session_type: session_type.into(),
            kernel,
        }
    }
}

/// Catalog entry describing one launchable kernel type
///
/// Immutable once constructed; consumed read-only by kernel emulators
/// resolving their `spec()` lookups.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KernelSpec {
    /// Catalog key
    pub name: String,
    /// Human-readable name
    pub display_name: String,
    /// Implementation language
    pub language: String,
    /// Launch arguments (never executed by the emulation)
    pub argv: Vec<String>,
    /// Free-form metadata
    pub metadata: BTreeMap<String, serde_json::Value>,
    /// Resource paths (logo files and the like)
    pub resources: BTreeMap<String, String>,
}

impl KernelSpec {
    /// Creates a spec with empty argv, metadata, and resources
    pub fn new(
        name: impl Into<String>,
        display_name: impl Into<String>,
        language: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            display_name: display_name.into(),
            language: language.into(),
            argv: Vec::new(),
            metadata: BTreeMap::new(),
            resources: BTreeMap::new(),
        }
    }

    /// Sets the launch arguments
    pub fn with_argv(mut self, argv: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.argv = argv.into_iter().map(Into::into).collect();
        self
    }

    /// Adds one metadata entry
    pub fn with_metadata(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.metadata.insert(key.into(), value);
        self
    }

    /// Adds one resource entry
    pub fn with_resource(mut self, key: impl Into<String>, path: impl Into<String>) -> Self {
        self.resources.insert(key.into(), path.into());
        self
    }
}
