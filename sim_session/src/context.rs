//! Session context emulator

use crate::events::KernelChange;
use crate::session::{SessionConnection, SessionConnectionBuilder};
use kernelspec_registry::KernelSpecCatalog;
use protocol::{BroadcastMessage, KernelModel, KernelStatus, ProtocolError};
use signals::{Signal, SubscriptionId};
use sim_kernel::{switch_kernel, KernelEmulator, KernelSwitchRequest, RunningKernelRegistry};
use std::cell::{Cell, RefCell};
use std::rc::Rc;

/// Live subscriptions on the wrapped session's streams
struct SessionRelay {
    status_signal: Signal<KernelStatus>,
    status_sub: SubscriptionId,
    broadcast_signal: Signal<BroadcastMessage>,
    broadcast_sub: SubscriptionId,
    kernel_changed_signal: Signal<KernelChange>,
    kernel_changed_sub: SubscriptionId,
}

impl SessionRelay {
    fn sever(self) {
        self.status_signal.disconnect(self.status_sub);
        self.broadcast_signal.disconnect(self.broadcast_sub);
        self.kernel_changed_signal.disconnect(self.kernel_changed_sub);
    }
}

/// Builder for [`SessionContext`]
///
/// Wraps a supplied session connection, or builds one from
/// `path`/`type`/`name` (each defaulting to the empty string) when
/// none is supplied.
pub struct SessionContextBuilder {
    catalog: Rc<KernelSpecCatalog>,
    registry: Rc<RunningKernelRegistry>,
    path: String,
    name: String,
    session_type: String,
    session: Option<SessionConnection>,
}

impl SessionContextBuilder {
    /// Creates a builder over the given catalog and running registry
    pub fn new(catalog: Rc<KernelSpecCatalog>, registry: Rc<RunningKernelRegistry>) -> Self {
        Self {
            catalog,
            registry,
            path: String::new(),
            name: String::new(),
            session_type: String::new(),
            session: None,
        }
    }

    /// Sets the document path used when building the session
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = path.into();
        self
    }

    /// Sets the document name used when building the session
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets the document type used when building the session
    pub fn with_type(mut self, session_type: impl Into<String>) -> Self {
        self.session_type = session_type.into();
        self
    }

    /// Wraps an existing session connection
    pub fn with_session(mut self, session: SessionConnection) -> Self {
        self.session = Some(session);
        self
    }

    /// Builds the context, wiring the session relays
    pub fn build(self) -> SessionContext {
        let registry = Rc::clone(&self.registry);
        let session = match self.session {
            Some(session) => session,
            None => SessionConnectionBuilder::new(self.catalog, self.registry)
                .with_path(self.path)
                .with_name(self.name)
                .with_type(self.session_type)
                .build(),
        };

        let context = SessionContext {
            path: session.path(),
            name: session.name(),
            session_type: session.session_type(),
            session,
            registry,
            status_changed: Signal::new(),
            broadcast_message: Signal::new(),
            kernel_changed: Signal::new(),
            relay: RefCell::new(None),
            is_disposed: Cell::new(false),
        };
        context.wire_session();
        context
    }
}

/// In-memory emulation of the client-facing session context
///
/// The handle application code holds. Wraps exactly one session
/// connection, re-broadcasts its events one level further out, and
/// exposes a simplified kernel-switching operation.
///
/// `path`/`name`/`type` are snapshots of the wrapped session taken at
/// construction; observers track subsequent changes through the
/// relayed event streams.
pub struct SessionContext {
    session: SessionConnection,
    registry: Rc<RunningKernelRegistry>,
    path: String,
    name: String,
    session_type: String,
    status_changed: Signal<KernelStatus>,
    broadcast_message: Signal<BroadcastMessage>,
    kernel_changed: Signal<KernelChange>,
    relay: RefCell<Option<SessionRelay>>,
    is_disposed: Cell<bool>,
}

impl SessionContext {
    fn wire_session(&self) {
        let status_signal = self.session.status_changed();
        let relayed_status = self.status_changed.clone();
        let status_sub = status_signal.connect(move |status| relayed_status.emit(status));

        let broadcast_signal = self.session.broadcast_message();
        let relayed_broadcast = self.broadcast_message.clone();
        let broadcast_sub =
            broadcast_signal.connect(move |message| relayed_broadcast.emit(message));

        let kernel_changed_signal = self.session.kernel_changed();
        let relayed_change = self.kernel_changed.clone();
        let kernel_changed_sub =
            kernel_changed_signal.connect(move |change| relayed_change.emit(change));

        *self.relay.borrow_mut() = Some(SessionRelay {
            status_signal,
            status_sub,
            broadcast_signal,
            broadcast_sub,
            kernel_changed_signal,
            kernel_changed_sub,
        });
    }

    /// Returns the document path snapshot
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Returns the document name snapshot
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the document type snapshot
    pub fn session_type(&self) -> &str {
        &self.session_type
    }

    /// Returns the wrapped session connection
    pub fn session(&self) -> &SessionConnection {
        &self.session
    }

    /// Returns the wrapped session's bound kernel, if any
    pub fn kernel(&self) -> Option<KernelEmulator> {
        self.session.kernel()
    }

    /// Returns whether this context has been disposed
    pub fn is_disposed(&self) -> bool {
        self.is_disposed.get()
    }

    /// Returns a handle to the relayed status-change stream
    pub fn status_changed(&self) -> Signal<KernelStatus> {
        self.status_changed.clone()
    }

    /// Returns a handle to the relayed broadcast stream
    pub fn broadcast_message(&self) -> Signal<BroadcastMessage> {
        self.broadcast_message.clone()
    }

    /// Returns a handle to the relayed kernel-changed stream
    pub fn kernel_changed(&self) -> Signal<KernelChange> {
        self.kernel_changed.clone()
    }

    /// Completes startup negotiation
    ///
    /// The emulation needs none, so this resolves immediately.
    pub fn initialize(&self) -> Result<(), ProtocolError> {
        Ok(())
    }

    /// Resolves once the context is usable, which is immediately
    pub fn ready(&self) -> Result<(), ProtocolError> {
        Ok(())
    }

    /// Switches to a running kernel, preferring the session's own
    ///
    /// Uses the wrapped session's bound kernel when one is bound
    /// (keeping the session model in sync and emitting
    /// `kernel_changed`); falls back to the registry's first slot when
    /// the session has none.
    pub fn change_kernel(
        &self,
        request: &KernelSwitchRequest,
    ) -> Result<KernelModel, ProtocolError> {
        if self.session.kernel().is_some() {
            return self.session.change_kernel(request);
        }
        let fallback = self
            .registry
            .first()
            .ok_or(ProtocolError::NoKernelAvailable)?;
        switch_kernel(&fallback, &self.registry, request)
    }

    /// Shuts the context down
    ///
    /// Resolves immediately; no further observable effects.
    pub fn shutdown(&self) -> Result<(), ProtocolError> {
        Ok(())
    }

    /// Releases this context
    ///
    /// Severs the session relays and drops all remaining subscribers.
    /// Idempotent. The wrapped session is left to its own disposal.
    pub fn dispose(&self) {
        if self.is_disposed.replace(true) {
            return;
        }
        if let Some(relay) = self.relay.borrow_mut().take() {
            relay.sever();
        }
        self.status_changed.disconnect_all();
        self.broadcast_message.disconnect_all();
        self.kernel_changed.disconnect_all();
    }
}
