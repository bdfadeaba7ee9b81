//! Protocol error types

use core_types::KernelId;
use thiserror::Error;

/// Errors surfaced by the kernel/session emulation layer
///
/// All of these signal test-fixture misconfiguration rather than
/// recoverable runtime conditions. The emulation is synchronous and
/// deterministic, so nothing here is retried: every failure is a
/// single-shot rejection the invoking test can assert on.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ProtocolError {
    /// Kernel spec lookup failed
    #[error("No kernel spec named '{0}' in the catalog")]
    SpecNotFound(String),

    /// Kernel switch target id is not in the running-kernel registry
    #[error("No running kernel with id {0}")]
    KernelIdNotFound(KernelId),

    /// Kernel switch target name is not in the running-kernel registry
    #[error("No running kernel named '{0}'")]
    KernelNameNotFound(String),

    /// Kernel switch request carried neither an id nor a name
    #[error("Kernel switch request must select a kernel by id or by name")]
    MissingKernelSelector,

    /// No kernel is available to operate on
    #[error("No kernel is bound and the running-kernel registry is empty")]
    NoKernelAvailable,

    /// Operation invoked on a disposed emulator
    #[error("Emulator has been disposed")]
    Disposed,
}
