//! Session lifecycle surface

use core_types::SessionId;
use kernelspec_registry::KernelSpecCatalog;
use protocol::SessionModel;
use sim_kernel::RunningKernelRegistry;
use sim_session::{SessionConnection, SessionConnectionBuilder};
use std::cell::RefCell;
use std::rc::Rc;

/// Options for starting a new session
#[derive(Debug, Clone, Default)]
pub struct SessionStartOptions {
    path: String,
    name: String,
    session_type: String,
    kernel_name: Option<String>,
}

impl SessionStartOptions {
    /// Creates options with empty identity and the default kernel
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the document path
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = path.into();
        self
    }

    /// Sets the document name
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets the document type
    pub fn with_type(mut self, session_type: impl Into<String>) -> Self {
        self.session_type = session_type.into();
        self
    }

    /// Requests a kernel by spec name instead of the default
    pub fn with_kernel_name(mut self, kernel_name: impl Into<String>) -> Self {
        self.kernel_name = Some(kernel_name.into());
        self
    }
}

/// Tracks the sessions started through this backend
pub struct SessionManager {
    catalog: Rc<KernelSpecCatalog>,
    registry: Rc<RunningKernelRegistry>,
    sessions: RefCell<Vec<Rc<SessionConnection>>>,
}

impl SessionManager {
    /// Creates a manager over shared catalog and registry handles
    pub fn new(catalog: Rc<KernelSpecCatalog>, registry: Rc<RunningKernelRegistry>) -> Self {
        Self {
            catalog,
            registry,
            sessions: RefCell::new(Vec::new()),
        }
    }

    /// Starts a new session and records it
    pub fn start_new(&self, options: SessionStartOptions) -> Rc<SessionConnection> {
        let mut builder =
            SessionConnectionBuilder::new(Rc::clone(&self.catalog), Rc::clone(&self.registry))
                .with_path(options.path)
                .with_name(options.name)
                .with_type(options.session_type);
        if let Some(kernel_name) = options.kernel_name {
            builder = builder.with_kernel_name(kernel_name);
        }

        let session = Rc::new(builder.build());
        self.sessions.borrow_mut().push(Rc::clone(&session));
        session
    }

    /// Returns models of the sessions still live, in start order
    pub fn running(&self) -> Vec<SessionModel> {
        self.sessions
            .borrow()
            .iter()
            .filter(|session| !session.is_disposed())
            .map(|session| session.model())
            .collect()
    }

    /// Finds a live session by id
    pub fn find(&self, id: SessionId) -> Option<Rc<SessionConnection>> {
        self.sessions
            .borrow()
            .iter()
            .find(|session| !session.is_disposed() && session.id() == id)
            .cloned()
    }

    /// Finds a live session by document path
    pub fn find_by_path(&self, path: &str) -> Option<Rc<SessionConnection>> {
        self.sessions
            .borrow()
            .iter()
            .find(|session| !session.is_disposed() && session.path() == path)
            .cloned()
    }

    /// Returns the number of sessions still live
    pub fn len(&self) -> usize {
        self.sessions
            .borrow()
            .iter()
            .filter(|session| !session.is_disposed())
            .count()
    }

    /// Returns whether no live sessions remain
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
