//! Transport trait for station communication.
//!
//! The [`Transport`] trait abstracts over the physical link to a weather
//! station. The production implementation wraps a serial port
//! (`wxlib-transport`); tests use the deterministic `MockTransport` from
//! the `wxlib-test-harness` crate.
//!
//! Protocol drivers (e.g. the TWI driver in `wxlib-twi`) operate on a
//! `Transport` rather than directly on a serial port, so the same
//! command/response and retry logic runs unchanged against real hardware
//! and against pre-loaded test exchanges.

use async_trait::async_trait;
use std::time::Duration;

use crate::error::Result;

/// Asynchronous byte-level transport to a weather station.
///
/// Implementations own the channel exclusively: exactly one transport
/// instance holds a given serial device at a time, acquired for the
/// lifetime of the driver session and released on [`close`](Transport::close)
/// or drop. Line framing and command semantics are handled by the protocol
/// driver that consumes this trait.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Send raw bytes to the station.
    ///
    /// Implementations should block until all bytes have been written to
    /// the underlying channel (serial TX buffer).
    async fn send(&mut self, data: &[u8]) -> Result<()>;

    /// Receive bytes from the station into the provided buffer.
    ///
    /// Returns the number of bytes actually read. Will wait up to `timeout`
    /// for data to arrive; returns [`Error::Timeout`](crate::error::Error::Timeout)
    /// if no data is received within the deadline.
    async fn receive(&mut self, buf: &mut [u8], timeout: Duration) -> Result<usize>;

    /// Close the transport connection.
    ///
    /// Idempotent: closing an already-closed transport is a no-op. After
    /// calling `close()`, subsequent `send()` and `receive()` calls
    /// return [`Error::NotConnected`](crate::error::Error::NotConnected).
    async fn close(&mut self) -> Result<()>;

    /// Check whether the transport is currently connected.
    fn is_connected(&self) -> bool;
}
