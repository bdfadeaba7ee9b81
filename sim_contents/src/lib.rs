//! # Simulated Contents
//!
//! In-memory emulation of the document/content store.
//!
//! ## Philosophy
//!
//! - **Deterministic**: Timestamps are a logical tick counter bumped
//!   on every mutation, so "last modified moved forward" is assertable
//!   without a wall clock.
//! - **Real error shapes**: A missing path fails with a
//!   404-equivalent condition, so error-handling code under test
//!   exercises its real failure path.
//! - **Observable**: Every create, save, and delete fires one
//!   `file_changed` event.

pub mod model;
pub mod store;

pub use model::{Checkpoint, FileModel, FileType};
pub use store::{ContentsError, ContentsStore, CreateOptions, FileChange, SaveOptions};
