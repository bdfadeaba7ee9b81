//! Top-level service aggregator

use crate::sessions::SessionManager;
use crate::specs::KernelSpecManager;
use kernelspec_registry::KernelSpecCatalog;
use protocol::ProtocolError;
use sim_contents::ContentsStore;
use sim_kernel::RunningKernelRegistry;
use std::rc::Rc;

/// One handle over the whole emulated backend
///
/// Construction wires everything to shared state: the running
/// registry is populated from the catalog (one kernel per entry, in
/// catalog order), and the session and spec managers borrow the same
/// handles.
pub struct ServiceManager {
    catalog: Rc<KernelSpecCatalog>,
    registry: Rc<RunningKernelRegistry>,
    contents: Rc<ContentsStore>,
    sessions: SessionManager,
    kernelspecs: KernelSpecManager,
}

impl Default for ServiceManager {
    fn default() -> Self {
        Self::new()
    }
}

impl ServiceManager {
    /// Creates a backend over the default two-kernel catalog
    pub fn new() -> Self {
        Self::with_catalog(KernelSpecCatalog::default_catalog())
    }

    /// Creates a backend over a caller-supplied catalog
    pub fn with_catalog(catalog: KernelSpecCatalog) -> Self {
        let catalog = Rc::new(catalog);
        let registry = Rc::new(RunningKernelRegistry::from_catalog(&catalog));
        Self {
            sessions: SessionManager::new(Rc::clone(&catalog), Rc::clone(&registry)),
            kernelspecs: KernelSpecManager::new(Rc::clone(&catalog)),
            contents: Rc::new(ContentsStore::new()),
            catalog,
            registry,
        }
    }

    /// Resolves once the backend is usable
    ///
    /// The emulation is usable from construction, so this never
    /// blocks and never fails.
    pub fn ready(&self) -> Result<(), ProtocolError> {
        Ok(())
    }

    /// Returns the shared contents store
    pub fn contents(&self) -> Rc<ContentsStore> {
        Rc::clone(&self.contents)
    }

    /// Returns the session manager
    pub fn sessions(&self) -> &SessionManager {
        &self.sessions
    }

    /// Returns the kernel spec manager
    pub fn kernelspecs(&self) -> &KernelSpecManager {
        &self.kernelspecs
    }

    /// Returns the shared catalog handle
    pub fn catalog(&self) -> Rc<KernelSpecCatalog> {
        Rc::clone(&self.catalog)
    }

    /// Returns the shared running-kernel registry
    pub fn registry(&self) -> Rc<RunningKernelRegistry> {
        Rc::clone(&self.registry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sessions::SessionStartOptions;
    use sim_contents::CreateOptions;

    #[test]
    fn test_ready_resolves_immediately() {
        let services = ServiceManager::new();
        assert_eq!(services.ready(), Ok(()));
    }

    #[test]
    fn test_registry_populated_from_catalog() {
        let services = ServiceManager::new();
        let names: Vec<String> = services
            .registry()
            .models()
            .into_iter()
            .map(|model| model.name)
            .collect();
        assert_eq!(names, vec!["python3", "echo"]);
    }

    #[test]
    fn test_managers_share_state() {
        let services = ServiceManager::new();

        let session = services
            .sessions()
            .start_new(SessionStartOptions::new().with_path("a.ipynb"));
        assert_eq!(services.sessions().running(), vec![session.model()]);

        let file = services.contents().new_untitled(CreateOptions::notebook());
        assert!(services.contents().contains(&file.path));

        assert_eq!(
            services.kernelspecs().default_name().as_deref(),
            services.catalog().default_name()
        );
    }

    #[test]
    fn test_custom_catalog() {
        let services = ServiceManager::with_catalog(KernelSpecCatalog::default_catalog());
        assert_eq!(services.kernelspecs().specs().len(), 2);
    }
}
