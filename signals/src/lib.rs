//! # Signals
//!
//! Typed publish/subscribe primitives for the emulation layer.
//!
//! ## Philosophy
//!
//! - **Explicit, not ambient**: Every event category is its own
//!   `Signal<T>` owned by the emitting struct, never bolted on after
//!   construction.
//! - **Deterministic delivery**: Subscribers run synchronously, in
//!   subscription order, before `emit` returns. Tests can assert event
//!   order immediately after triggering an action.
//! - **Single-threaded by design**: The emulation model is
//!   cooperative and in-process, so signals use `Rc`/`RefCell`, not
//!   locks.
//!
//! ## Example
//!
//! ```
//! use signals::Signal;
//! use std::cell::Cell;
//! use std::rc::Rc;
//!
//! let signal: Signal<u32> = Signal::new();
//! let seen = Rc::new(Cell::new(0));
//!
//! let sink = Rc::clone(&seen);
//! signal.connect(move |value| sink.set(*value));
//!
//! signal.emit(&7);
//! assert_eq!(seen.get(), 7);
//! ```

pub mod recorder;
pub mod signal;

pub use recorder::Recorder;
pub use signal::{Signal, SubscriptionId};
