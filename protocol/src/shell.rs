//! Shell-channel request and reply types

use serde::{Deserialize, Serialize};
use std::fmt;

/// Outcome of a shell request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReplyStatus {
    Ok,
    Error,
    Aborted,
}

impl fmt::Display for ReplyStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReplyStatus::Ok => f.write_str("ok"),
            ReplyStatus::Error => f.write_str("error"),
            ReplyStatus::Aborted => f.write_str("aborted"),
        }
    }
}

/// Request to execute code on a kernel
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecuteRequest {
    /// Source code to execute
    pub code: String,
    /// Wire-fidelity flag; the emulation broadcasts regardless
    pub silent: bool,
    /// Wire-fidelity flag; the emulation records no history
    pub store_history: bool,
}

impl ExecuteRequest {
    /// Creates a request with the default flags (not silent, stored)
    pub fn new(code: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            silent: false,
            store_history: true,
        }
    }

    /// Sets the silent flag
    pub fn with_silent(mut self, silent: bool) -> Self {
        self.silent = silent;
        self
    }

    /// Sets the store-history flag
    pub fn with_store_history(mut self, store_history: bool) -> Self {
        self.store_history = store_history;
        self
    }
}

/// Reply to an execute request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecuteReply {
    /// Outcome (always `Ok` in the emulation; no code actually runs)
    pub status: ReplyStatus,
    /// Execution counter after this request
    pub execution_count: u64,
}

/// Request for kernel execution history
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryRequest {
    /// Include output alongside inputs
    pub output: bool,
    /// Return raw input
    pub raw: bool,
}

impl Default for HistoryRequest {
    fn default() -> Self {
        Self {
            output: false,
            raw: true,
        }
    }
}

/// One line of recorded history
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// Session number the line was recorded in
    pub session: u64,
    /// Line number within the session
    pub line: u64,
    /// Recorded source code
    pub code: String,
}

/// Reply to a history request
///
/// The emulation always answers with an empty history and status ok.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryReply {
    /// Outcome of the lookup
    pub status: ReplyStatus,
    /// Recorded history lines
    pub history: Vec<HistoryEntry>,
}

impl HistoryReply {
    /// Creates the canonical empty reply
    pub fn empty() -> Self {
        Self {
            status: ReplyStatus::Ok,
            history: Vec::new(),
        }
    }
}
