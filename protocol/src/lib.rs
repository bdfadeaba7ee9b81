//! # Protocol
//!
//! Message and model types for the emulated kernel/session protocol.
//!
//! ## Philosophy
//!
//! - **Typed, not stringly-typed**: Messages and models are explicit
//!   structs with every field given an explicit value at construction.
//!   Nothing is assembled by spreading defaults over a prototype.
//! - **Correlated**: Every broadcast message carries a parent header
//!   stamping the request that caused it, so observers can correlate
//!   out-of-band events with their originating request.
//! - **Wire-shaped**: Serialized forms mirror the real protocol
//!   (lowercase status strings, `msg_type` tags, `type` field names),
//!   so code under test exercises its real parsing paths.

pub mod error;
pub mod messages;
pub mod models;
pub mod shell;
pub mod status;

pub use error::ProtocolError;
pub use messages::{BroadcastContent, BroadcastMessage, MessageHeader, ParentHeader};
pub use models::{KernelModel, KernelSpec, SessionModel};
pub use shell::{ExecuteReply, ExecuteRequest, HistoryEntry, HistoryReply, HistoryRequest, ReplyStatus};
pub use status::{ConnectionStatus, KernelStatus};
