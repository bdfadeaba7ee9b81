//! # Core Types
//!
//! Shared identifier types for the emulation layer.
//!
//! ## Philosophy
//!
//! - **Strongly typed, not stringly typed**: Every entity gets its own
//!   identifier newtype so a kernel id can never be confused with a
//!   session id at a call site.
//! - **Unique per test run**: Identifiers are random v4 UUIDs, so two
//!   emulators constructed in the same process never collide.
//! - **Opaque**: Callers compare and display identifiers; they never
//!   parse them.

pub mod ids;

pub use ids::{CheckpointId, ClientId, KernelId, MessageId, SessionId};
