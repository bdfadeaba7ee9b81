//! # Simulated Services
//!
//! Aggregator over the individual emulators, exposing one handle with
//! the same surface dependents reach for on the real backend.
//!
//! ## Philosophy
//!
//! - **One fixture, whole backend**: Constructing a [`ServiceManager`]
//!   yields a catalog, a running-kernel registry, a contents store,
//!   and a session manager that all share the same state.
//! - **Already ready**: There is no startup handshake to emulate;
//!   `ready()` resolves immediately.
//! - **Shared by handle**: Managers hand out `Rc` handles, so a test
//!   and the code under test observe the same emulated backend.

pub mod manager;
pub mod sessions;
pub mod specs;

pub use manager::ServiceManager;
pub use sessions::{SessionManager, SessionStartOptions};
pub use specs::KernelSpecManager;
