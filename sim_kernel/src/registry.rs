//! Running-kernel registry
//!
//! A fixed, ordered pool of kernel emulators, indexed in parallel with
//! the spec catalog it was constructed from. Kernel-switch operations
//! select their replacement from this pool, by id or by name.

use crate::KernelEmulator;
use core_types::KernelId;
use kernelspec_registry::KernelSpecCatalog;
use protocol::KernelModel;
use std::rc::Rc;

/// Ordered pool of running kernel emulators
///
/// Constructed once per fixture and shared read-only from then on.
/// Slot order is construction order; "first matching index wins" in
/// every lookup.
#[derive(Default)]
pub struct RunningKernelRegistry {
    kernels: Vec<KernelEmulator>,
}

impl RunningKernelRegistry {
    /// Creates an empty registry
    pub fn new() -> Self {
        Self {
            kernels: Vec::new(),
        }
    }

    /// Creates a registry with one running kernel per catalog entry
    ///
    /// Slot i runs the spec at catalog position i, so the registry's
    /// model list parallels the catalog.
    pub fn from_catalog(catalog: &Rc<KernelSpecCatalog>) -> Self {
        let kernels = catalog
            .iter()
            .map(|spec| KernelEmulator::with_name(Rc::clone(catalog), spec.name.clone()))
            .collect();
        Self { kernels }
    }

    /// Appends a running kernel, preserving insertion order
    pub fn with_kernel(mut self, kernel: KernelEmulator) -> Self {
        self.kernels.push(kernel);
        self
    }

    /// Returns the models of every slot, in slot order
    pub fn models(&self) -> Vec<KernelModel> {
        self.kernels.iter().map(KernelEmulator::model).collect()
    }

    /// Returns the model of the first slot whose id matches
    pub fn model_by_id(&self, id: KernelId) -> Option<KernelModel> {
        self.kernels
            .iter()
            .find(|kernel| kernel.id() == id)
            .map(KernelEmulator::model)
    }

    /// Returns the model of the first slot whose name matches
    pub fn model_by_name(&self, name: &str) -> Option<KernelModel> {
        self.kernels
            .iter()
            .find(|kernel| kernel.name() == name)
            .map(KernelEmulator::model)
    }

    /// Returns a handle to the kernel at a slot index
    pub fn kernel_at(&self, index: usize) -> Option<KernelEmulator> {
        self.kernels.get(index).cloned()
    }

    /// Returns a handle to the first slot's kernel
    pub fn first(&self) -> Option<KernelEmulator> {
        self.kernels.first().cloned()
    }

    /// Returns the number of slots
    pub fn len(&self) -> usize {
        self.kernels.len()
    }

    /// Returns whether the registry has no slots
    pub fn is_empty(&self) -> bool {
        self.kernels.is_empty()
    }
}
