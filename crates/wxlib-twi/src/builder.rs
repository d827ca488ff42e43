//! TwiBuilder -- fluent builder for constructing [`TwiStation`] instances.
//!
//! Separates configuration from construction so that callers can set up
//! serial port parameters, the retry policy, and the conditions-command
//! variant before the transport is opened.
//!
//! # Example
//!
//! ```no_run
//! use wxlib_twi::builder::TwiBuilder;
//! use wxlib_twi::models::wrl_25;
//! use std::time::Duration;
//!
//! # async fn example() -> wxlib_core::Result<()> {
//! let station = TwiBuilder::new(wrl_25())
//!     .serial_port("/dev/ttyUSB0")
//!     .max_tries(5)
//!     .retry_wait(Duration::from_secs(10))
//!     .build()
//!     .await?;
//! # Ok(())
//! # }
//! ```

use std::time::Duration;

use wxlib_core::error::{Error, Result};
use wxlib_core::transport::Transport;

use crate::commands::ConditionsVariant;
use crate::models::TwiModel;
use crate::station::{
    DEFAULT_MAX_TRIES, DEFAULT_READ_TIMEOUT, DEFAULT_RETRY_WAIT, TwiStation,
};

/// Fluent builder for [`TwiStation`].
///
/// All configuration has defaults derived from the [`TwiModel`] and the
/// vendor protocol, except the serial port path, which has no sensible
/// universal default and must be stated by the caller:
///
/// ```ignore
/// let station = TwiBuilder::new(wrl_25())
///     .serial_port("/dev/ttyUSB0")
///     .build()
///     .await?;
/// ```
pub struct TwiBuilder {
    model: TwiModel,
    serial_port: Option<String>,
    baud_rate: Option<u32>,
    read_timeout: Duration,
    max_tries: u32,
    retry_wait: Duration,
    conditions: ConditionsVariant,
}

impl TwiBuilder {
    /// Create a new builder for the given TWI model.
    pub fn new(model: TwiModel) -> Self {
        TwiBuilder {
            model,
            serial_port: None,
            baud_rate: None,
            read_timeout: DEFAULT_READ_TIMEOUT,
            max_tries: DEFAULT_MAX_TRIES,
            retry_wait: DEFAULT_RETRY_WAIT,
            conditions: ConditionsVariant::default(),
        }
    }

    /// Set the serial port path (e.g. `/dev/ttyUSB0`, `/dev/ttyS0`, `COM3`).
    pub fn serial_port(mut self, port: &str) -> Self {
        self.serial_port = Some(port.to_string());
        self
    }

    /// Override the default baud rate for this model.
    ///
    /// The whole TWI family runs at 19200; this exists for bench setups
    /// with rate converters in between.
    pub fn baud_rate(mut self, baud: u32) -> Self {
        self.baud_rate = Some(baud);
        self
    }

    /// Set the deadline for reading a single response line (default: 3 s).
    pub fn read_timeout(mut self, timeout: Duration) -> Self {
        self.read_timeout = timeout;
        self
    }

    /// Set the retry budget per command, first attempt included
    /// (default: 10, minimum 1).
    pub fn max_tries(mut self, tries: u32) -> Self {
        self.max_tries = tries;
        self
    }

    /// Set the backoff between failed attempts (default: 10 s).
    pub fn retry_wait(mut self, wait: Duration) -> Self {
        self.retry_wait = wait;
        self
    }

    /// Select which vendor current-conditions command to issue:
    /// [`Term`](ConditionsVariant::Term) (`r`, the default) or
    /// [`Rate`](ConditionsVariant::Rate) (`R`).
    pub fn conditions_variant(mut self, variant: ConditionsVariant) -> Self {
        self.conditions = variant;
        self
    }

    /// Build a [`TwiStation`] with a caller-provided transport.
    ///
    /// This is the primary entry point for testing (pass a
    /// `MockTransport` from `wxlib-test-harness`) and for advanced use
    /// cases where the caller manages the transport lifecycle directly.
    pub async fn build_with_transport(self, transport: Box<dyn Transport>) -> Result<TwiStation> {
        if self.max_tries < 1 {
            return Err(Error::InvalidParameter(
                "max_tries must be at least 1".into(),
            ));
        }

        Ok(TwiStation::new(
            transport,
            self.model,
            self.read_timeout,
            self.max_tries,
            self.retry_wait,
            self.conditions,
        ))
    }

    /// Build a [`TwiStation`] using a serial transport.
    ///
    /// Requires that [`serial_port()`](Self::serial_port) has been
    /// called. The baud rate defaults to the model's (19200) if not
    /// overridden.
    pub async fn build(self) -> Result<TwiStation> {
        let port = self
            .serial_port
            .as_ref()
            .ok_or_else(|| Error::InvalidParameter("serial_port is required for build()".into()))?;
        let baud = self.baud_rate.unwrap_or(self.model.default_baud_rate);

        let transport = wxlib_transport::SerialTransport::open(port, baud).await?;
        self.build_with_transport(Box::new(transport)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{wls_8000, wrl_25};
    use wxlib_core::WeatherStation;
    use wxlib_test_harness::MockTransport;

    #[tokio::test]
    async fn builder_defaults() {
        let mock = MockTransport::new();
        let station = TwiBuilder::new(wrl_25())
            .build_with_transport(Box::new(mock))
            .await
            .unwrap();

        assert_eq!(station.info().model_name, "WRL-25");
        assert_eq!(station.info().model_id, "WRL");
    }

    #[tokio::test]
    async fn builder_custom_settings() {
        let mock = MockTransport::new();
        let station = TwiBuilder::new(wls_8000())
            .serial_port("/dev/ttyUSB0")
            .baud_rate(9600)
            .read_timeout(Duration::from_secs(1))
            .max_tries(5)
            .retry_wait(Duration::from_secs(2))
            .conditions_variant(ConditionsVariant::Rate)
            .build_with_transport(Box::new(mock))
            .await
            .unwrap();

        assert_eq!(station.info().model_name, "WLS-8000");
        assert!(station.model().has_logger);
    }

    #[tokio::test]
    async fn builder_serial_port_required_for_build() {
        let result = TwiBuilder::new(wrl_25()).build().await;
        assert!(matches!(result, Err(Error::InvalidParameter(_))));
    }

    #[tokio::test]
    async fn builder_rejects_zero_retry_budget() {
        let mock = MockTransport::new();
        let result = TwiBuilder::new(wrl_25())
            .max_tries(0)
            .build_with_transport(Box::new(mock))
            .await;
        assert!(matches!(result, Err(Error::InvalidParameter(_))));
    }

    #[tokio::test]
    async fn builder_fluent_chain() {
        let mock = MockTransport::new();
        let station = TwiBuilder::new(wrl_25())
            .serial_port("/dev/ttyS0")
            .max_tries(2)
            .retry_wait(Duration::from_millis(100))
            .build_with_transport(Box::new(mock))
            .await
            .unwrap();

        assert_eq!(station.info().to_string(), "TWI WRL-25");
    }
}
