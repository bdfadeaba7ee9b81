//! Contents store contract tests
//!
//! These tests define the stable guarantees of the document store as
//! reached through the service aggregator.
