//! Kernel-switch algorithm
//!
//! Shared by the session connection and session context emulators:
//! resolve a partial identity request against the running-kernel
//! registry and rebind the current kernel to the matched slot's model.

use crate::registry::RunningKernelRegistry;
use crate::KernelEmulator;
use core_types::KernelId;
use protocol::{KernelModel, ProtocolError};

/// Partial identity of the kernel to switch to
///
/// Carries either an id or a name, never meaningfully both. A request
/// with neither selector is a fixture authoring mistake and fails the
/// switch outright.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KernelSwitchRequest {
    /// Target kernel id, if selecting by id
    pub id: Option<KernelId>,
    /// Target spec name, if selecting by name
    pub name: Option<String>,
}

impl KernelSwitchRequest {
    /// Creates a request selecting a running kernel by id
    pub fn by_id(id: KernelId) -> Self {
        Self {
            id: Some(id),
            name: None,
        }
    }

    /// Creates a request selecting a running kernel by name
    pub fn by_name(name: impl Into<String>) -> Self {
        Self {
            id: None,
            name: Some(name.into()),
        }
    }
}

/// Switches `current` to the registry slot matching `request`
///
/// The id selector takes precedence over the name selector. The first
/// matching slot in registry order wins. On success the current
/// kernel's model is rebound to the matched slot's model before
/// returning, so the swap is atomic from an observer's point of view.
///
/// Failures are fatal fixture errors: a missing target
/// (`KernelIdNotFound`/`KernelNameNotFound`) or a request with neither
/// selector (`MissingKernelSelector`). Nothing is retried.
pub fn switch_kernel(
    current: &KernelEmulator,
    registry: &RunningKernelRegistry,
    request: &KernelSwitchRequest,
) -> Result<KernelModel, ProtocolError> {
    let model = if let Some(id) = request.id {
        registry
            .model_by_id(id)
            .ok_or(ProtocolError::KernelIdNotFound(id))?
    } else if let Some(name) = &request.name {
        registry
            .model_by_name(name)
            .ok_or_else(|| ProtocolError::KernelNameNotFound(name.clone()))?
    } else {
        return Err(ProtocolError::MissingKernelSelector);
    };

    current.rebind_model(model.clone());
    Ok(model)
}
