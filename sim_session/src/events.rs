//! Session-level event payloads

use protocol::KernelModel;

/// Payload of a `kernel_changed` emission
///
/// Both sides are optional so the same payload can describe binding,
/// rebinding, and unbinding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KernelChange {
    /// Model bound before the change, if any
    pub old_kernel: Option<KernelModel>,
    /// Model bound after the change, if any
    pub new_kernel: Option<KernelModel>,
}

/// Which session property a `property_changed` emission refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionProperty {
    Path,
    Name,
    Type,
}
