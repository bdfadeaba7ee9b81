//! Kernel and connection status enums

use serde::{Deserialize, Serialize};
use std::fmt;

/// Execution state of an emulated kernel
///
/// Serializes to the lowercase wire strings the real protocol uses
/// (`"idle"`, `"busy"`, ...). Emulated kernels start at `Idle`; no
/// `Starting` phase is modeled, though the state exists so status
/// round-trips cover the full wire vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KernelStatus {
    Unknown,
    Starting,
    Idle,
    Busy,
    Terminating,
    Restarting,
    Autorestarting,
    Dead,
}

impl KernelStatus {
    /// Returns the lowercase wire string for this status
    pub fn as_str(&self) -> &'static str {
        match self {
            KernelStatus::Unknown => "unknown",
            KernelStatus::Starting => "starting",
            KernelStatus::Idle => "idle",
            KernelStatus::Busy => "busy",
            KernelStatus::Terminating => "terminating",
            KernelStatus::Restarting => "restarting",
            KernelStatus::Autorestarting => "autorestarting",
            KernelStatus::Dead => "dead",
        }
    }

    /// Returns every status value, in wire-vocabulary order
    pub fn all() -> [KernelStatus; 8] {
        [
            KernelStatus::Unknown,
            KernelStatus::Starting,
            KernelStatus::Idle,
            KernelStatus::Busy,
            KernelStatus::Terminating,
            KernelStatus::Restarting,
            KernelStatus::Autorestarting,
            KernelStatus::Dead,
        ]
    }
}

impl fmt::Display for KernelStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Connection state between a session and its kernel
///
/// The emulation never loses a connection on its own; tests drive
/// these transitions explicitly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConnectionStatus {
    Connecting,
    Connected,
    Disconnected,
}

impl ConnectionStatus {
    /// Returns the lowercase wire string for this status
    pub fn as_str(&self) -> &'static str {
        match self {
            ConnectionStatus::Connecting => "connecting",
            ConnectionStatus::Connected => "connected",
            ConnectionStatus::Disconnected => "disconnected",
        }
    }
}

impl fmt::Display for ConnectionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
