//! # Simulated Session
//!
//! In-memory emulation of the session layer: the connection that
//! binds one kernel to a document, and the client-facing context that
//! wraps it.
//!
//! ## Philosophy
//!
//! - **Events re-broadcast, never merely forward**: Each layer owns
//!   its own streams and re-emits what it receives from the layer
//!   below, so a listener attached at any level observes every event
//!   exactly once per origin emission.
//! - **Synchronous propagation**: For a single originating event,
//!   every layer's re-emission completes before the originating call
//!   returns (kernel, then session, then context), so tests can assert
//!   event order immediately.
//! - **Atomic rebinding**: At most one kernel is bound to a session at
//!   any instant; a kernel switch is complete before any observer
//!   runs.

pub mod context;
pub mod events;
pub mod session;

pub use context::{SessionContext, SessionContextBuilder};
pub use events::{KernelChange, SessionProperty};
pub use session::{SessionConnection, SessionConnectionBuilder};
