//! Kernel spec lookup surface

use kernelspec_registry::KernelSpecCatalog;
use protocol::{KernelSpec, ProtocolError};
use std::rc::Rc;

/// Read-only view over the shared kernel spec catalog
#[derive(Clone)]
pub struct KernelSpecManager {
    catalog: Rc<KernelSpecCatalog>,
}

impl KernelSpecManager {
    /// Creates a manager over an existing catalog handle
    pub fn new(catalog: Rc<KernelSpecCatalog>) -> Self {
        Self { catalog }
    }

    /// Returns all specs in catalog order
    pub fn specs(&self) -> Vec<KernelSpec> {
        self.catalog.iter().cloned().collect()
    }

    /// Looks up a spec by name
    pub fn get(&self, name: &str) -> Result<KernelSpec, ProtocolError> {
        self.catalog.get(name).cloned()
    }

    /// Returns the default kernel name, if the catalog is non-empty
    pub fn default_name(&self) -> Option<String> {
        self.catalog.default_name().map(str::to_string)
    }

    /// Returns the underlying catalog handle
    pub fn catalog(&self) -> Rc<KernelSpecCatalog> {
        Rc::clone(&self.catalog)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_specs_preserve_catalog_order() {
        let manager = KernelSpecManager::new(Rc::new(KernelSpecCatalog::default_catalog()));
        let names: Vec<String> = manager.specs().into_iter().map(|s| s.name).collect();
        assert_eq!(names, vec!["python3", "echo"]);
        assert_eq!(manager.default_name().as_deref(), Some("python3"));
    }

    #[test]
    fn test_get_missing_spec_fails() {
        let manager = KernelSpecManager::new(Rc::new(KernelSpecCatalog::default_catalog()));
        assert_eq!(
            manager.get("julia"),
            Err(ProtocolError::SpecNotFound("julia".to_string()))
        );
    }
}
