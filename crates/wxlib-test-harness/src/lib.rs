//! wxlib-test-harness: Test utilities and mock transports for wxlib.
//!
//! This crate provides [`MockTransport`] for deterministic unit testing of
//! the station protocol driver without requiring real weather hardware.

pub mod mock_serial;

pub use mock_serial::MockTransport;
