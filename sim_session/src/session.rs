//! Session connection emulator

use crate::events::{KernelChange, SessionProperty};
use core_types::SessionId;
use kernelspec_registry::KernelSpecCatalog;
use protocol::{
    BroadcastMessage, ConnectionStatus, KernelModel, KernelStatus, ProtocolError, SessionModel,
};
use signals::{Signal, SubscriptionId};
use sim_kernel::{switch_kernel, KernelEmulator, KernelSwitchRequest, RunningKernelRegistry};
use std::cell::{Cell, RefCell};
use std::rc::Rc;

/// Live subscriptions on the bound kernel's streams
struct KernelRelay {
    status_signal: Signal<KernelStatus>,
    status_sub: SubscriptionId,
    broadcast_signal: Signal<BroadcastMessage>,
    broadcast_sub: SubscriptionId,
}

impl KernelRelay {
    fn sever(self) {
        self.status_signal.disconnect(self.status_sub);
        self.broadcast_signal.disconnect(self.broadcast_sub);
    }
}

/// Builder for [`SessionConnection`]
///
/// Every field has an explicit default: empty document identity, a
/// kernel constructed from the catalog's first entry. Supplying a
/// kernel overrides a supplied kernel name.
pub struct SessionConnectionBuilder {
    catalog: Rc<KernelSpecCatalog>,
    registry: Rc<RunningKernelRegistry>,
    path: String,
    name: String,
    session_type: String,
    kernel: Option<KernelEmulator>,
    kernel_name: Option<String>,
}

impl SessionConnectionBuilder {
    /// Creates a builder over the given catalog and running registry
    pub fn new(catalog: Rc<KernelSpecCatalog>, registry: Rc<RunningKernelRegistry>) -> Self {
        Self {
            catalog,
            registry,
            path: String::new(),
            name: String::new(),
            session_type: String::new(),
            kernel: None,
            kernel_name: None,
        }
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

    /// Binds an existing kernel emulator
    pub fn with_kernel(mut self, kernel: KernelEmulator) -> Self {
        self.kernel = Some(kernel);
        self
    }

    /// Constructs the kernel from a spec name instead of the default
    pub fn with_kernel_name(mut self, kernel_name: impl Into<String>) -> Self {
        self.kernel_name = Some(kernel_name.into());
        self
    }

    /// Builds the session, binding its kernel and wiring the relays
    pub fn build(self) -> SessionConnection {
        let kernel = match (self.kernel, self.kernel_name) {
            (Some(kernel), _) => kernel,
            (None, Some(name)) => KernelEmulator::with_name(self.catalog, name),
            (None, None) => KernelEmulator::new(self.catalog),
        };

        let model = SessionModel::new(self.path, self.name, self.session_type, kernel.model());

        let session = SessionConnection {
            model: RefCell::new(model),
            kernel: RefCell::new(Some(kernel.clone())),
            registry: self.registry,
            connection_status: Cell::new(ConnectionStatus::Connected),
            status_changed: Signal::new(),
            connection_status_changed: Signal::new(),
            kernel_changed: Signal::new(),
            broadcast_message: Signal::new(),
            unhandled_message: Signal::new(),
            property_changed: Signal::new(),
            disposed: Signal::new(),
            relay: RefCell::new(None),
            is_disposed: Cell::new(false),
        };
        session.wire_kernel(&kernel);
        session
    }
}

/// In-memory emulation of a session connection
///
/// Binds one kernel emulator to a logical document and re-broadcasts
/// the kernel's events on its own streams, one re-emission per origin
/// emission, in origin order.
pub struct SessionConnection {
    model: RefCell<SessionModel>,
    kernel: RefCell<Option<KernelEmulator>>,
    registry: Rc<RunningKernelRegistry>,
    connection_status: Cell<ConnectionStatus>,
    status_changed: Signal<KernelStatus>,
    connection_status_changed: Signal<ConnectionStatus>,
    kernel_changed: Signal<KernelChange>,
    broadcast_message: Signal<BroadcastMessage>,
    unhandled_message: Signal<BroadcastMessage>,
    property_changed: Signal<SessionProperty>,
    disposed: Signal<()>,
    relay: RefCell<Option<KernelRelay>>,
    is_disposed: Cell<bool>,
}

impl SessionConnection {
    /// Subscribes to the kernel's streams and re-emits on our own
    fn wire_kernel(&self, kernel: &KernelEmulator) {
        let status_signal = kernel.status_changed();
        let relayed_status = self.status_changed.clone();
        let status_sub = status_signal.connect(move |status| relayed_status.emit(status));

        let broadcast_signal = kernel.broadcast_message();
        let relayed_broadcast = self.broadcast_message.clone();
        let broadcast_sub =
            broadcast_signal.connect(move |message| relayed_broadcast.emit(message));

        *self.relay.borrow_mut() = Some(KernelRelay {
            status_signal,
            status_sub,
            broadcast_signal,
            broadcast_sub,
        });
    }

    /// Returns the session's unique id
    pub fn id(&self) -> SessionId {
        self.model.borrow().id
    }

    /// Returns the document path
    pub fn path(&self) -> String {
        self.model.borrow().path.clone()
    }

    /// Returns the document name
    pub fn name(&self) -> String {
        self.model.borrow().name.clone()
    }

    /// Returns the document type
    pub fn session_type(&self) -> String {
        self.model.borrow().session_type.clone()
    }

    /// Returns a copy of the session model
    pub fn model(&self) -> SessionModel {
        self.model.borrow().clone()
    }

    /// Returns a handle to the bound kernel, if one is bound
    pub fn kernel(&self) -> Option<KernelEmulator> {
        self.kernel.borrow().clone()
    }

    /// Returns the connection status
    pub fn connection_status(&self) -> ConnectionStatus {
        self.connection_status.get()
    }

    /// Returns whether this session has been disposed
    pub fn is_disposed(&self) -> bool {
        self.is_disposed.get()
    }

    /// Returns a handle to the relayed status-change stream
    pub fn status_changed(&self) -> Signal<KernelStatus> {
        self.status_changed.clone()
    }

    /// Returns a handle to the connection-status stream
    pub fn connection_status_changed(&self) -> Signal<ConnectionStatus> {
        self.connection_status_changed.clone()
    }

    /// Returns a handle to the kernel-changed stream
    pub fn kernel_changed(&self) -> Signal<KernelChange> {
        self.kernel_changed.clone()
    }

    /// Returns a handle to the relayed broadcast stream
    pub fn broadcast_message(&self) -> Signal<BroadcastMessage> {
        self.broadcast_message.clone()
    }

    /// Returns a handle to the unhandled-message stream
    pub fn unhandled_message(&self) -> Signal<BroadcastMessage> {
        self.unhandled_message.clone()
    }

    /// Returns a handle to the property-changed stream
    pub fn property_changed(&self) -> Signal<SessionProperty> {
        self.property_changed.clone()
    }

    /// Returns a handle to the disposed stream
    pub fn disposed(&self) -> Signal<()> {
        self.disposed.clone()
    }

    /// Updates the document path, emitting one property change
    pub fn set_path(&self, path: impl Into<String>) {
        self.model.borrow_mut().path = path.into();
        self.property_changed.emit(&SessionProperty::Path);
    }

    /// Updates the document name, emitting one property change
    pub fn set_name(&self, name: impl Into<String>) {
        self.model.borrow_mut().name = name.into();
        self.property_changed.emit(&SessionProperty::Name);
    }

    /// Updates the document type, emitting one property change
    pub fn set_type(&self, session_type: impl Into<String>) {
        self.model.borrow_mut().session_type = session_type.into();
        self.property_changed.emit(&SessionProperty::Type);
    }

    /// Updates the connection status, emitting one event
    pub fn set_connection_status(&self, status: ConnectionStatus) {
        self.connection_status.set(status);
        self.connection_status_changed.emit(&status);
    }

    /// Switches the bound kernel to a running-registry slot
    ///
    /// Delegates to the shared kernel-switch algorithm. On success the
    /// session model's kernel reflects the new identity and exactly
    /// one `kernel_changed` event fires, after the swap is complete.
    pub fn change_kernel(
        &self,
        request: &KernelSwitchRequest,
    ) -> Result<KernelModel, ProtocolError> {
        let kernel = self.kernel().ok_or(ProtocolError::Disposed)?;
        let old_kernel = self.model.borrow().kernel.clone();

        let new_model = switch_kernel(&kernel, &self.registry, request)?;
        self.model.borrow_mut().kernel = new_model.clone();

        self.kernel_changed.emit(&KernelChange {
            old_kernel: Some(old_kernel),
            new_kernel: Some(new_model.clone()),
        });
        Ok(new_model)
    }

    /// Placeholder for an interactive kernel chooser
    ///
    /// The real system would present a dialog; the emulation neither
    /// throws nor alters state.
    pub fn select_kernel(&self) {}

    /// Shuts the session down
    ///
    /// Resolves immediately; no further observable effects.
    pub fn shutdown(&self) -> Result<(), ProtocolError> {
        Ok(())
    }

    /// Test hook: emits a message on the unhandled stream
    ///
    /// Lets dependent test suites exercise their handling of messages
    /// the session layer does not recognize.
    pub fn inject_unhandled(&self, message: BroadcastMessage) {
        self.unhandled_message.emit(&message);
    }

    /// Releases this session
    ///
    /// Severs the kernel relays, drops the kernel binding, emits one
    /// `disposed` event, and drops all remaining subscribers.
    /// Idempotent.
    pub fn dispose(&self) {
        if self.is_disposed.replace(true) {
            return;
        }
        if let Some(relay) = self.relay.borrow_mut().take() {
            relay.sever();
        }
        *self.kernel.borrow_mut() = None;
        self.disposed.emit(&());

        self.status_changed.disconnect_all();
        self.connection_status_changed.disconnect_all();
        self.kernel_changed.disconnect_all();
        self.broadcast_message.disconnect_all();
        self.unhandled_message.disconnect_all();
        self.property_changed.disconnect_all();
        self.disposed.disconnect_all();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use protocol::{BroadcastContent, ExecuteRequest};
    use signals::Recorder;

    fn fixture() -> (Rc<KernelSpecCatalog>, Rc<RunningKernelRegistry>) {
        let catalog = Rc::new(KernelSpecCatalog::default_catalog());
        let registry = Rc::new(RunningKernelRegistry::from_catalog(&catalog));
        (catalog, registry)
    }

    fn session() -> SessionConnection {
        let (catalog, registry) = fixture();
        SessionConnectionBuilder::new(catalog, registry)
            .with_path("work/notebook.ipynb")
            .with_name("notebook")
            .with_type("notebook")
            .build()
    }

    #[test]
    fn test_build_binds_default_kernel() {
        let session = session();
        let kernel = session.kernel().unwrap();
        assert_eq!(kernel.name(), "python3");
        assert_eq!(session.model().kernel, kernel.model());
        assert_eq!(session.connection_status(), ConnectionStatus::Connected);
    }

    #[test]
    fn test_build_with_kernel_name() {
        let (catalog, registry) = fixture();
        let session = SessionConnectionBuilder::new(catalog, registry)
            .with_kernel_name("echo")
            .build();
        assert_eq!(session.kernel().unwrap().name(), "echo");
    }

    #[test]
    fn test_build_with_supplied_kernel() {
        let (catalog, registry) = fixture();
        let kernel = KernelEmulator::with_name(Rc::clone(&catalog), "echo");
        let id = kernel.id();
        let session = SessionConnectionBuilder::new(catalog, registry)
            .with_kernel(kernel)
            .build();
        assert_eq!(session.kernel().unwrap().id(), id);
    }

    #[test]
    fn test_status_relayed_once_in_order() {
        let session = session();
        let kernel = session.kernel().unwrap();
        let relayed = Recorder::new();
        relayed.attach(&session.status_changed());

        kernel.set_status(KernelStatus::Busy);
        kernel.set_status(KernelStatus::Idle);

        assert_eq!(
            relayed.events(),
            vec![KernelStatus::Busy, KernelStatus::Idle]
        );
    }

    #[test]
    fn test_broadcasts_relayed_identically() {
        let session = session();
        let kernel = session.kernel().unwrap();

        let origin = Recorder::new();
        origin.attach(&kernel.broadcast_message());
        let relayed = Recorder::new();
        relayed.attach(&session.broadcast_message());

        kernel.request_execute(ExecuteRequest::new("2 + 2")).unwrap();
        kernel.set_status(KernelStatus::Busy);

        // Event identity and ordering preserved, nothing dropped or
        // duplicated.
        assert_eq!(origin.events(), relayed.events());
        assert_eq!(relayed.len(), 2);
        assert_eq!(relayed.events()[0].kind(), "execute_input");
        assert_eq!(relayed.events()[1].kind(), "status");
    }

    #[test]
    fn test_change_kernel_by_name_updates_model() {
        let session = session();
        let changes = Recorder::new();
        changes.attach(&session.kernel_changed());

        let model = session
            .change_kernel(&KernelSwitchRequest::by_name("echo"))
            .unwrap();

        assert_eq!(model.name, "echo");
        assert_eq!(session.model().kernel, model);
        assert_eq!(changes.len(), 1);
        let change = &changes.events()[0];
        assert_eq!(change.old_kernel.as_ref().unwrap().name, "python3");
        assert_eq!(change.new_kernel.as_ref().unwrap(), &model);
    }

    #[test]
    fn test_change_kernel_by_id() {
        let (catalog, registry) = fixture();
        let session = SessionConnectionBuilder::new(catalog, Rc::clone(&registry)).build();
        let target = registry.models()[1].clone();

        let model = session
            .change_kernel(&KernelSwitchRequest::by_id(target.id))
            .unwrap();
        assert_eq!(model, target);
        assert_eq!(session.model().kernel, target);
    }

    #[test]
    fn test_change_kernel_failure_leaves_model_untouched() {
        let session = session();
        let before = session.model();
        let changes = Recorder::new();
        changes.attach(&session.kernel_changed());

        let result = session.change_kernel(&KernelSwitchRequest::by_name("julia"));

        assert!(result.is_err());
        assert_eq!(session.model(), before);
        assert!(changes.is_empty());
    }

    #[test]
    fn test_kernel_changed_fires_after_swap_completes() {
        let session = Rc::new(session());
        let observed = Rc::new(RefCell::new(Vec::new()));

        let inner_session = Rc::clone(&session);
        let sink = Rc::clone(&observed);
        session.kernel_changed().connect(move |change| {
            // The model already reflects the new kernel when the
            // event is observed.
            sink.borrow_mut().push((
                inner_session.model().kernel.clone(),
                change.new_kernel.clone().unwrap(),
            ));
        });

        session
            .change_kernel(&KernelSwitchRequest::by_name("echo"))
            .unwrap();

        let observed = observed.borrow();
        assert_eq!(observed.len(), 1);
        assert_eq!(observed[0].0, observed[0].1);
    }

    #[test]
    fn test_select_kernel_is_inert() {
        let session = session();
        let before = session.model();
        session.select_kernel();
        assert_eq!(session.model(), before);
    }

    #[test]
    fn test_shutdown_resolves() {
        let session = session();
        assert_eq!(session.shutdown(), Ok(()));
    }

    #[test]
    fn test_property_setters_emit_changes() {
        let session = session();
        let properties = Recorder::new();
        properties.attach(&session.property_changed());

        session.set_path("moved.ipynb");
        session.set_name("moved");
        session.set_type("file");

        assert_eq!(session.path(), "moved.ipynb");
        assert_eq!(session.name(), "moved");
        assert_eq!(session.session_type(), "file");
        assert_eq!(
            properties.events(),
            vec![
                SessionProperty::Path,
                SessionProperty::Name,
                SessionProperty::Type
            ]
        );
    }

    #[test]
    fn test_connection_status_transitions() {
        let session = session();
        let statuses = Recorder::new();
        statuses.attach(&session.connection_status_changed());

        session.set_connection_status(ConnectionStatus::Disconnected);
        assert_eq!(session.connection_status(), ConnectionStatus::Disconnected);
        assert_eq!(statuses.events(), vec![ConnectionStatus::Disconnected]);
    }

    #[test]
    fn test_inject_unhandled() {
        let session = session();
        let kernel = session.kernel().unwrap();
        let unhandled = Recorder::new();
        unhandled.attach(&session.unhandled_message());

        let message = BroadcastMessage::new(
            kernel.client_id(),
            "",
            "",
            BroadcastContent::Status {
                execution_state: KernelStatus::Unknown,
            },
        );
        session.inject_unhandled(message.clone());
        assert_eq!(unhandled.events(), vec![message]);
    }

    #[test]
    fn test_dispose_severs_relays() {
        let session = session();
        let kernel = session.kernel().unwrap();
        let relayed = Recorder::new();
        relayed.attach(&session.status_changed());
        let disposed = Recorder::new();
        disposed.attach(&session.disposed());

        session.dispose();
        assert!(session.is_disposed());
        assert!(session.kernel().is_none());
        assert_eq!(disposed.len(), 1);

        // The kernel is still live, but nothing reaches the session's
        // streams anymore.
        kernel.set_status(KernelStatus::Busy);
        assert!(relayed.is_empty());

        session.dispose();
        assert_eq!(disposed.len(), 1);
    }

    #[test]
    fn test_change_kernel_after_dispose_fails() {
        let session = session();
        session.dispose();
        let result = session.change_kernel(&KernelSwitchRequest::by_name("echo"));
        assert_eq!(result, Err(ProtocolError::Disposed));
    }
}
