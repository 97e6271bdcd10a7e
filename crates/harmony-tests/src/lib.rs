//! Integration tests for the harmony crates.
//!
//! These tests drive the full decode -> harmonize -> encode flow across
//! harmony-io, harmony-core and harmony-ops.
