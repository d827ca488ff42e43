//! The station capability trait.
//!
//! [`WeatherStation`] is the seam between protocol drivers and hosting
//! applications (data collectors, archivers, display front-ends). Hosts
//! depend on `dyn WeatherStation` and never see the command bytes, retry
//! policy, or response grammar underneath — the driver adapts itself to
//! the host rather than the host subclassing the driver.

use async_trait::async_trait;

use crate::error::Result;
use crate::types::{StationInfo, WeatherReading};

/// A connected weather station, whatever its wire protocol.
///
/// All methods take `&self`; implementations serialize access to the
/// underlying channel internally, so a reading in progress is never
/// interleaved with another command. Each call occupies the caller for
/// the full exchange, including any retry backoff.
#[async_trait]
pub trait WeatherStation: Send + Sync {
    /// Identity of the connected station.
    fn info(&self) -> &StationInfo;

    /// Fetch and decode one current-conditions reading.
    ///
    /// Intended to be called repeatedly on a fixed polling cadence. A
    /// failure is scoped to this invocation; the caller is expected to
    /// skip the cycle and poll again rather than abort.
    async fn current_conditions(&self) -> Result<WeatherReading>;

    /// The station's firmware version, as free-form vendor text.
    async fn firmware_version(&self) -> Result<String>;

    /// The station's firmware serial number, as free-form vendor text.
    async fn firmware_serial(&self) -> Result<String>;

    /// The station's unit id, as free-form vendor text.
    async fn unit_id(&self) -> Result<String>;

    /// Release the underlying channel.
    ///
    /// Idempotent; further commands fail with
    /// [`Error::NotConnected`](crate::error::Error::NotConnected).
    async fn close(&self) -> Result<()>;
}
