//! Texas Weather Instruments station driver for wxlib.
//!
//! This crate implements the one-letter serial protocol spoken by the
//! TWI WLS/WRL/WR/WPS station family. It provides:
//!
//! - **Command set** ([`commands`]) -- the single-byte request tokens,
//!   including both vendor current-conditions variants (`R` and `r`).
//! - **Response grammar** ([`protocol`]) -- pure decoding of the fixed
//!   12-token current-conditions line with per-field unit stripping and
//!   tolerant numeric recovery.
//! - **Model definitions** ([`models`]) -- static data for the supported
//!   stations (WLS-8000, WRL-25, WR-25, WPS-10).
//! - **Station driver** ([`station`]) -- full
//!   [`WeatherStation`](wxlib_core::WeatherStation) trait implementation
//!   with transport abstraction and bounded-retry command execution.
//! - **Builder** ([`builder`]) -- fluent builder API for constructing
//!   [`TwiStation`] instances with vendor defaults.
//! - **Loop packets** ([`packet`]) -- repackaging readings for a polling
//!   host, including rain-accumulator-to-delta conversion.
//!
//! # Protocol sketch
//!
//! Every request is one ASCII letter; every response is one CR/LF
//! terminated line. `V`, `S`, and `I` answer with free-form vendor text.
//! `r` (or `R`) answers with twelve positional whitespace-separated
//! tokens:
//!
//! ```text
//! 13:28 06/02/16 WSW 00MPH 460F 081F 086F 054% 29.31F 00.00"D 00.00"M 00.00"R
//! ```
//!
//! # Example
//!
//! ```
//! use wxlib_twi::protocol::parse_current_conditions;
//!
//! let line = "13:28 06/02/16 WSW 00MPH 460F 081F 086F 054% 29.31F 00.00\"D 00.00\"M 00.00\"R";
//! let reading = parse_current_conditions(line).unwrap();
//! assert_eq!(reading.humidity, Some(54.0));
//! assert_eq!(reading.pressure, Some(29.31));
//! ```

pub mod builder;
pub mod commands;
pub mod models;
pub mod packet;
pub mod protocol;
pub mod station;

// Re-export the primary types for ergonomic `use wxlib_twi::*`.
pub use builder::TwiBuilder;
pub use commands::{Command, ConditionsVariant};
pub use models::TwiModel;
pub use packet::{LoopPacket, PacketConverter};
pub use station::TwiStation;
