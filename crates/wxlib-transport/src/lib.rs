//! Transport implementations for wxlib.
//!
//! This crate provides the concrete implementation of the
//! [`Transport`](wxlib_core::Transport) trait from `wxlib-core` for the
//! serial connections TWI stations use:
//!
//! - [`SerialTransport`]: USB virtual COM ports and RS-232 serial
//!   connections, 19200 baud 8N1 per the vendor wiring
//!
//! # Example
//!
//! ```no_run
//! use wxlib_transport::SerialTransport;
//! use wxlib_core::transport::Transport;
//! use std::time::Duration;
//!
//! # async fn example() -> wxlib_core::Result<()> {
//! // Connect to a station.
//! let mut transport = SerialTransport::open("/dev/ttyUSB0", 19200).await?;
//!
//! // Send a command.
//! transport.send(b"V").await?;
//!
//! // Receive response.
//! let mut buf = [0u8; 256];
//! let n = transport.receive(&mut buf, Duration::from_secs(3)).await?;
//! # Ok(())
//! # }
//! ```

pub mod serial;

pub use serial::{DataBits, FlowControl, Parity, SerialConfig, SerialTransport, StopBits};
