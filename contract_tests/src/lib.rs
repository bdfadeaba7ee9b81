//! # Emulation Contract Tests
//!
//! This crate provides "golden" tests for the emulation layer's
//! cross-crate guarantees, so they don't drift accidentally over time.
//!
//! ## Philosophy
//!
//! - **Explicit over implicit**: Ordering, correlation, and wire-shape
//!   guarantees are written as code
//! - **Testability first**: Contract tests fail when a guarantee a
//!   dependent test suite relies on changes
//! - **Whole stack**: Each contract is exercised through every layer
//!   (kernel, session, context, services), not just at its origin
//!
//! ## Structure
//!
//! Each concern has a module with contract tests that verify:
//! - Event propagation (exactly once per layer, in origin order)
//! - Request/broadcast correlation stamping
//! - Kernel-switch resolution and failure modes
//! - JSON wire shapes of the protocol models

pub mod contents;
pub mod kernel;
pub mod session;
pub mod wire;

/// Common fixtures for contract validation
pub mod test_helpers {
    use kernelspec_registry::KernelSpecCatalog;
    use protocol::BroadcastMessage;
    use signals::Recorder;
    use sim_kernel::RunningKernelRegistry;
    use sim_session::{SessionConnectionBuilder, SessionContext, SessionContextBuilder};
    use std::rc::Rc;

    /// Creates the shared catalog and a registry populated from it
    pub fn fixture() -> (Rc<KernelSpecCatalog>, Rc<RunningKernelRegistry>) {
        let catalog = Rc::new(KernelSpecCatalog::default_catalog());
        let registry = Rc::new(RunningKernelRegistry::from_catalog(&catalog));
        (catalog, registry)
    }

    /// Builds a full kernel/session/context stack over one fixture
    pub fn layered_context() -> SessionContext {
        let (catalog, registry) = fixture();
        let session = SessionConnectionBuilder::new(Rc::clone(&catalog), Rc::clone(&registry))
            .with_path("contract.ipynb")
            .with_name("contract")
            .with_type("notebook")
            .build();
        SessionContextBuilder::new(catalog, registry)
            .with_session(session)
            .build()
    }

    /// Returns the wire `msg_type` of every recorded broadcast, in order
    pub fn kinds(recorder: &Recorder<BroadcastMessage>) -> Vec<&'static str> {
        recorder.events().iter().map(|m| m.kind()).collect()
    }
}
