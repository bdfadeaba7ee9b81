//! # Simulated Kernel
//!
//! This crate provides an in-memory emulation of an interactive
//! compute kernel.
//!
//! ## Purpose
//!
//! The kernel emulator lets client code be exercised without a live
//! kernel process or network connection:
//! - Runs under `cargo test`
//! - Deterministic (synchronous event propagation, no real concurrency)
//! - Fast (no process spawn, no I/O)
//! - Inspectable (status, counters, and correlation state are all
//!   readable)
//!
//! ## Philosophy
//!
//! **Testability is a first-class design constraint.**
//!
//! The emulator reproduces the ordering, identity-correlation, and
//! event-propagation guarantees of the real asynchronous messaging
//! protocol using purely synchronous, in-memory substitutes. Any
//! divergence would produce false negatives or positives in dependent
//! test suites, so those guarantees are the contract, not the
//! transport.

pub mod registry;
pub mod switch;

pub use registry::RunningKernelRegistry;
pub use switch::{switch_kernel, KernelSwitchRequest};

use core_types::{ClientId, KernelId, MessageId};
use kernelspec_registry::KernelSpecCatalog;
use protocol::{
    BroadcastContent, BroadcastMessage, ExecuteReply, ExecuteRequest, HistoryReply,
    HistoryRequest, KernelModel, KernelSpec, KernelStatus, ProtocolError, ReplyStatus,
};
use signals::Signal;
use std::cell::{Cell, RefCell};
use std::rc::Rc;

/// Settled future returned by [`KernelEmulator::request_execute`]
///
/// Models the shell round trip of an execute request. The emulation
/// performs no actual execution, so the future is complete the moment
/// it is returned.
#[derive(Debug, Clone)]
pub struct ExecuteFuture {
    msg_id: MessageId,
    reply: ExecuteReply,
}

impl ExecuteFuture {
    /// Returns the identifier of the originating request
    ///
    /// Broadcasts caused by this request carry the same identifier in
    /// their parent header.
    pub fn msg_id(&self) -> MessageId {
        self.msg_id
    }

    /// Returns the reply without consuming the future
    pub fn reply(&self) -> &ExecuteReply {
        &self.reply
    }

    /// Resolves the future, yielding the execute reply
    pub fn done(self) -> ExecuteReply {
        self.reply
    }
}

struct KernelState {
    model: RefCell<KernelModel>,
    client_id: ClientId,
    username: RefCell<String>,
    status: Cell<KernelStatus>,
    execution_count: Cell<u64>,
    /// Most recent outbound request id, "" before the first request.
    /// Stamped into the parent header of every broadcast.
    last_request: RefCell<String>,
    status_changed: Signal<KernelStatus>,
    broadcast_message: Signal<BroadcastMessage>,
    catalog: Rc<KernelSpecCatalog>,
    disposed: Cell<bool>,
}

/// In-memory emulation of one kernel connection
///
/// The emulator holds the kernel's status, identity, and execution
/// counter, and emits status-change and broadcast-message events
/// synchronously. Cloning the handle (via `Clone`) shares the same
/// emulated kernel; [`KernelEmulator::clone_connection`] instead
/// creates a new logical connection multiplexed onto this one.
///
/// Status starts at `Idle` immediately upon construction; no
/// `Starting` phase is modeled.
pub struct KernelEmulator {
    state: Rc<KernelState>,
}

impl Clone for KernelEmulator {
    fn clone(&self) -> Self {
        Self {
            state: Rc::clone(&self.state),
        }
    }
}

impl KernelEmulator {
    /// Creates an emulator running the catalog's first spec
    ///
    /// With an empty catalog the kernel gets an empty name; its
    /// `spec()` lookup will then fail, mirroring an unknown kernel.
    pub fn new(catalog: Rc<KernelSpecCatalog>) -> Self {
        let name = catalog.default_name().unwrap_or_default().to_string();
        Self::with_name(catalog, name)
    }

    /// Creates an emulator running the named spec
    pub fn with_name(catalog: Rc<KernelSpecCatalog>, name: impl Into<String>) -> Self {
        Self {
            state: Rc::new(KernelState {
                model: RefCell::new(KernelModel::new(name)),
                client_id: ClientId::new(),
                username: RefCell::new(String::new()),
                status: Cell::new(KernelStatus::Idle),
                execution_count: Cell::new(0),
                last_request: RefCell::new(String::new()),
                status_changed: Signal::new(),
                broadcast_message: Signal::new(),
                catalog,
                disposed: Cell::new(false),
            }),
        }
    }

    /// Sets the username stamped into emitted message headers
    pub fn with_username(self, username: impl Into<String>) -> Self {
        *self.state.username.borrow_mut() = username.into();
        self
    }

    /// Returns the kernel's unique id
    pub fn id(&self) -> KernelId {
        self.state.model.borrow().id
    }

    /// Returns the kernel's spec name
    pub fn name(&self) -> String {
        self.state.model.borrow().name.clone()
    }

    /// Returns a copy of the kernel's model
    pub fn model(&self) -> KernelModel {
        self.state.model.borrow().clone()
    }

    /// Returns the client id of this connection
    pub fn client_id(&self) -> ClientId {
        self.state.client_id
    }

    /// Returns the username of this connection
    pub fn username(&self) -> String {
        self.state.username.borrow().clone()
    }

    /// Returns the current execution state
    pub fn status(&self) -> KernelStatus {
        self.state.status.get()
    }

    /// Returns the execution counter
    pub fn execution_count(&self) -> u64 {
        self.state.execution_count.get()
    }

    /// Returns the most recent outbound request id ("" if none)
    pub fn last_request(&self) -> String {
        self.state.last_request.borrow().clone()
    }

    /// Returns whether this connection has been disposed
    pub fn is_disposed(&self) -> bool {
        self.state.disposed.get()
    }

    /// Returns a handle to the status-change stream
    pub fn status_changed(&self) -> Signal<KernelStatus> {
        self.state.status_changed.clone()
    }

    /// Returns a handle to the broadcast-message stream
    pub fn broadcast_message(&self) -> Signal<BroadcastMessage> {
        self.state.broadcast_message.clone()
    }

    /// Resolves the catalog entry matching this kernel's name
    pub fn spec(&self) -> Result<KernelSpec, ProtocolError> {
        self.state.catalog.get(&self.name()).cloned()
    }

    /// Sets the execution state, emitting one status-change event and
    /// one `status` broadcast message
    ///
    /// A no-op after disposal: disposed connections originate no
    /// further events.
    pub fn set_status(&self, status: KernelStatus) {
        if self.state.disposed.get() {
            return;
        }
        self.state.status.set(status);
        self.state.status_changed.emit(&status);
        self.broadcast(BroadcastContent::Status {
            execution_state: status,
        });
    }

    /// Simulates an execute request
    ///
    /// Increments the execution counter, records the request id for
    /// correlation, emits one `execute_input` broadcast carrying the
    /// code and the new count, and returns an already-settled future.
    /// No code actually runs.
    pub fn request_execute(
        &self,
        request: ExecuteRequest,
    ) -> Result<ExecuteFuture, ProtocolError> {
        if self.state.disposed.get() {
            return Err(ProtocolError::Disposed);
        }

        let count = self.state.execution_count.get() + 1;
        self.state.execution_count.set(count);

        let msg_id = MessageId::new();
        *self.state.last_request.borrow_mut() = msg_id.as_uuid().to_string();

        self.broadcast(BroadcastContent::ExecuteInput {
            code: request.code,
            execution_count: count,
        });

        Ok(ExecuteFuture {
            msg_id,
            reply: ExecuteReply {
                status: ReplyStatus::Ok,
                execution_count: count,
            },
        })
    }

    /// Resolves a history request with an empty history, status ok
    pub fn request_history(
        &self,
        _request: HistoryRequest,
    ) -> Result<HistoryReply, ProtocolError> {
        if self.state.disposed.get() {
            return Err(ProtocolError::Disposed);
        }
        Ok(HistoryReply::empty())
    }

    /// Creates a new logical connection to this kernel
    ///
    /// The clone is an independently disposable instance with its own
    /// id and client id, sharing the kernel's name and username. Its
    /// status-change and broadcast emissions also re-emit on this
    /// connection's streams, and its observable status field tracks
    /// this connection's status changes. This models several
    /// front-end connections multiplexed onto one backend kernel.
    pub fn clone_connection(&self) -> KernelEmulator {
        let clone = KernelEmulator::with_name(Rc::clone(&self.state.catalog), self.name());
        *clone.state.username.borrow_mut() = self.username();
        clone.state.status.set(self.status());

        let original_status = self.state.status_changed.clone();
        clone
            .state
            .status_changed
            .connect(move |status| original_status.emit(status));

        let original_broadcast = self.state.broadcast_message.clone();
        clone
            .state
            .broadcast_message
            .connect(move |message| original_broadcast.emit(message));

        // Weak so a dropped clone does not linger in the original's
        // observer list as a strong cycle.
        let tracked = Rc::downgrade(&clone.state);
        self.state.status_changed.connect(move |status| {
            if let Some(state) = tracked.upgrade() {
                state.status.set(*status);
            }
        });

        clone
    }

    /// Releases this connection
    ///
    /// Disposal severs all outbound relaying: both streams drop their
    /// subscribers and no further events originate from this instance.
    /// Idempotent.
    pub fn dispose(&self) {
        if self.state.disposed.replace(true) {
            return;
        }
        self.state.status_changed.disconnect_all();
        self.state.broadcast_message.disconnect_all();
    }

    /// Rebinds this kernel's model to a registry slot's model
    ///
    /// Used by the kernel-switch algorithm; the swap is complete
    /// before any observer can run.
    pub(crate) fn rebind_model(&self, model: KernelModel) {
        *self.state.model.borrow_mut() = model;
    }

    fn broadcast(&self, content: BroadcastContent) {
        let message = BroadcastMessage::new(
            self.state.client_id,
            self.username(),
            self.state.last_request.borrow().clone(),
            content,
        );
        self.state.broadcast_message.emit(&message);
    }
}
