//! Session and kernel-switch contract tests
//!
//! These tests define the stable guarantees of the session layers:
//! switch resolution and failure modes, disposal isolation, and the
//! service aggregator's shared state.
