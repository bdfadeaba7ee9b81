//! # Kernel Spec Registry
//!
//! Static catalog of available kernel specifications.
//!
//! ## Philosophy
//!
//! - **Pure data lookup**: The catalog holds immutable entries and
//!   answers by-name queries; it never launches anything.
//! - **Insertion order is contract**: "First entry" is a meaningful
//!   default throughout the emulation (kernel construction, running
//!   registry slots), so the catalog preserves construction order
//!   rather than sorting.

use protocol::{KernelSpec, ProtocolError};

/// Ordered catalog of kernel specs, looked up by name
#[derive(Debug, Clone, Default)]
pub struct KernelSpecCatalog {
    specs: Vec<KernelSpec>,
}

impl KernelSpecCatalog {
    /// Creates an empty catalog
    pub fn new() -> Self {
        Self { specs: Vec::new() }
    }

    /// Creates the default two-entry catalog used by most tests
    ///
    /// "python3" is first (and therefore the default kernel name);
    /// "echo" is second so switch-by-name has a distinct target.
    pub fn default_catalog() -> Self {
        Self::new()
            .with_spec(
                KernelSpec::new("python3", "Python 3 (emulated)", "python").with_argv([
                    "python3",
                    "-m",
                    "ipykernel_launcher",
                    "-f",
                    "{connection_file}",
                ]),
            )
            .with_spec(
                KernelSpec::new("echo", "Echo (emulated)", "text").with_argv([
                    "python3",
                    "-m",
                    "echo_kernel",
                    "-f",
                    "{connection_file}",
                ]),
            )
    }

    /// Appends a spec, preserving insertion order
    pub fn with_spec(mut self, spec: KernelSpec) -> Self {
        self.specs.push(spec);
        self
    }

    /// Looks up a spec by name
    pub fn get(&self, name: &str) -> Result<&KernelSpec, ProtocolError> {
        self.specs
            .iter()
            .find(|spec| spec.name == name)
            .ok_or_else(|| ProtocolError::SpecNotFound(name.to_string()))
    }

    /// Returns the first catalog entry, if any
    pub fn first(&self) -> Option<&KernelSpec> {
        self.specs.first()
    }

    /// Returns the name of the first catalog entry, if any
    pub fn default_name(&self) -> Option<&str> {
        self.specs.first().map(|spec| spec.name.as_str())
    }

    /// Returns spec names in insertion order
    pub fn names(&self) -> Vec<&str> {
        self.specs.iter().map(|spec| spec.name.as_str()).collect()
    }

    /// Iterates specs in insertion order
    pub fn iter(&self) -> impl Iterator<Item = &KernelSpec> {
        self.specs.iter()
    }

    /// Returns the number of catalog entries
    pub fn len(&self) -> usize {
        self.specs.len()
    }

    /// Returns whether the catalog is empty
    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }
}
