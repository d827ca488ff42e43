//! wxlib-core: Core traits, types, and error definitions for wxlib.
//!
//! This crate defines the protocol-agnostic abstractions that wxlib
//! station drivers implement. Data collectors and other applications
//! depend on these types without pulling in any specific driver.
//!
//! # Key types
//!
//! - [`WeatherStation`] -- the unified trait for polling any station
//! - [`Transport`] -- byte-level communication channel
//! - [`WeatherReading`] -- one decoded current-conditions response
//! - [`Error`] / [`Result`] -- error handling

pub mod error;
pub mod station;
pub mod transport;
pub mod types;

// Re-export key types at crate root for ergonomic `use wxlib_core::*`.
pub use error::{Error, Result};
pub use station::WeatherStation;
pub use transport::Transport;
pub use types::*;
