//! Kernel emulation contract tests
//!
//! These tests define the stable guarantees of the kernel emulator as
//! observed through the whole stack: event ordering, execution
//! counting, and request/broadcast correlation.
