//! # wxlib -- Weather Station Polling for TWI Hardware
//!
//! `wxlib` is an asynchronous Rust library for reading Texas Weather
//! Instruments stations (WLS-8000, WRL-25, WR-25, WPS-10) over their
//! one-letter serial protocol. It is designed for data collectors,
//! archivers, and dashboards that poll a station on a fixed cadence and
//! must ride out the flaky cabling weather hardware lives with.
//!
//! ## Quick Start
//!
//! Add `wxlib` to your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! wxlib = "0.1"
//! tokio = { version = "1", features = ["full"] }
//! ```
//!
//! Connect to a station and read the current conditions:
//!
//! ```no_run
//! use wxlib::WeatherStation;
//! use wxlib::twi::{TwiBuilder, models::wrl_25};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let station = TwiBuilder::new(wrl_25())
//!         .serial_port("/dev/ttyUSB0")
//!         .build()
//!         .await?;
//!
//!     let reading = station.current_conditions().await?;
//!     println!("outside: {:?} F", reading.temperature_out);
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! The library is organized as a workspace of focused crates:
//!
//! | Crate                | Purpose                                          |
//! |----------------------|--------------------------------------------------|
//! | `wxlib-core`         | Traits ([`WeatherStation`], [`Transport`]), types, errors |
//! | `wxlib-transport`    | Serial transport implementation                  |
//! | `wxlib-twi`          | TWI one-letter protocol driver                   |
//! | `wxlib-test-harness` | Mock transport for protocol tests                |
//! | **`wxlib`**          | This facade crate -- re-exports everything       |
//!
//! The driver implements the [`WeatherStation`] trait, so application
//! code can work with `dyn WeatherStation` and stay protocol-agnostic.
//!
//! ## Failure model
//!
//! Transient channel failures (timeouts, I/O errors) are retried inside
//! the driver up to a configured budget with backoff; an exhausted
//! budget surfaces as [`Error::RetriesExceeded`] and is scoped to that
//! one command -- a polling host skips the cycle and asks again. A
//! response that does not match the station grammar is
//! [`Error::Protocol`] and is never retried on the same bytes.

pub use wxlib_core::*;

/// TWI one-letter protocol backend.
///
/// Provides [`TwiStation`](twi::TwiStation) and
/// [`TwiBuilder`](twi::TwiBuilder) for polling Texas Weather Instruments
/// stations, plus the pure response parser and loop-packet conversion.
pub mod twi {
    pub use wxlib_twi::*;
}

/// Transport implementations.
///
/// Provides [`SerialTransport`](transport::SerialTransport); the driver
/// opens one itself via [`TwiBuilder::build`](twi::TwiBuilder::build),
/// so most applications never touch this module directly.
pub mod transport {
    pub use wxlib_transport::*;
}

/// Returns a flat list of all supported station models.
///
/// This is the primary entry point for applications that need to
/// enumerate supported hardware (e.g. for a model picker dropdown).
///
/// # Example
///
/// ```
/// for station in wxlib::supported_stations() {
///     println!("{} ({} baud)", station.model_name, station.default_baud_rate);
/// }
/// ```
pub fn supported_stations() -> Vec<StationDefinition> {
    wxlib_twi::models::all_twi_models()
        .iter()
        .map(StationDefinition::from)
        .collect()
}
