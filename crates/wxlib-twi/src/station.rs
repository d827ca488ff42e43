//! TwiStation -- the [`WeatherStation`] implementation for TWI hardware.
//!
//! This module ties the command set and response grammar ([`commands`],
//! [`protocol`]) to a [`Transport`] to produce a working station driver.
//! It owns the two layers between the caller and the wire:
//!
//! - the **line exchange**: write one command byte, read until the line
//!   terminator or the read deadline, hand back the decoded line;
//! - the **retry executor**: run an exchange up to `max_tries` times with
//!   `retry_wait` backoff between attempts, the only place in the driver
//!   where transient channel failures are absorbed.
//!
//! The parser never retries (same bytes, same result) and the transport
//! never retries (it reports one attempt's outcome); everything above
//! `execute` sees either a line or a terminal error.

use std::time::Duration;

use tokio::sync::Mutex;
use tracing::{debug, error, info, warn};

use async_trait::async_trait;
use wxlib_core::error::{Error, Result};
use wxlib_core::station::WeatherStation;
use wxlib_core::transport::Transport;
use wxlib_core::types::{StationInfo, WeatherReading};

use crate::commands::{Command, ConditionsVariant};
use crate::models::TwiModel;
use crate::protocol::{self, LINE_TERMINATOR};

/// Default read deadline for one response line.
pub const DEFAULT_READ_TIMEOUT: Duration = Duration::from_secs(3);

/// Default retry budget for one command, first attempt included.
pub const DEFAULT_MAX_TRIES: u32 = 10;

/// Default backoff between failed attempts.
pub const DEFAULT_RETRY_WAIT: Duration = Duration::from_secs(10);

/// Maximum accumulated line size before the exchange gives up.
///
/// A conditions line is under 80 bytes; anything past this is line noise
/// or a wedged station, and refetching is cheaper than growing a buffer.
const MAX_LINE: usize = 1024;

/// A connected TWI weather station.
///
/// Constructed via [`TwiBuilder`](crate::builder::TwiBuilder). All
/// station communication goes through the [`Transport`] provided at
/// build time, serialized by an internal mutex so exchanges never
/// overlap.
pub struct TwiStation {
    transport: Mutex<Box<dyn Transport>>,
    model: TwiModel,
    info: StationInfo,
    read_timeout: Duration,
    max_tries: u32,
    retry_wait: Duration,
    conditions: ConditionsVariant,
}

impl TwiStation {
    /// Create a new `TwiStation` from its constituent parts.
    ///
    /// This is called by [`TwiBuilder`](crate::builder::TwiBuilder);
    /// callers should use the builder API instead.
    pub(crate) fn new(
        transport: Box<dyn Transport>,
        model: TwiModel,
        read_timeout: Duration,
        max_tries: u32,
        retry_wait: Duration,
        conditions: ConditionsVariant,
    ) -> Self {
        let info = StationInfo {
            model_name: model.name.to_string(),
            model_id: model.model_id.to_string(),
        };
        TwiStation {
            transport: Mutex::new(transport),
            model,
            info,
            read_timeout,
            max_tries,
            retry_wait,
            conditions,
        }
    }

    /// The model this station was built for.
    pub fn model(&self) -> &TwiModel {
        &self.model
    }

    /// Send a command and return the station's response line, retrying
    /// transient channel failures up to the configured budget.
    ///
    /// On each channel or timeout failure the attempt is logged at info
    /// level and the executor sleeps `retry_wait` before trying again;
    /// there is no sleep after the final attempt. When the budget is
    /// exhausted the command fails with
    /// [`Error::RetriesExceeded`], logged at error level. A budget of 1
    /// means exactly one attempt and no sleep.
    pub async fn execute(&self, command: Command) -> Result<String> {
        let mut transport = self.transport.lock().await;

        for attempt in 1..=self.max_tries {
            match exchange(&mut **transport, command, self.read_timeout).await {
                Ok(line) => return Ok(line),
                Err(e) if e.is_retryable() => {
                    info!(
                        attempt,
                        max_tries = self.max_tries,
                        command = %command,
                        error = %e,
                        "failed attempt to get readings"
                    );
                    if attempt < self.max_tries {
                        tokio::time::sleep(self.retry_wait).await;
                    }
                }
                Err(e) => return Err(e),
            }
        }

        error!(
            command = %command,
            tries = self.max_tries,
            "max retries exceeded"
        );
        Err(Error::RetriesExceeded {
            command: command.letter(),
            tries: self.max_tries,
        })
    }

    /// Fetch one current-conditions line without parsing it.
    ///
    /// Useful for diagnostics; [`current_conditions`](Self::current_conditions)
    /// is the normal path.
    pub async fn raw_current_conditions(&self) -> Result<String> {
        self.execute(Command::CurrentConditions(self.conditions))
            .await
    }
}

#[async_trait]
impl WeatherStation for TwiStation {
    fn info(&self) -> &StationInfo {
        &self.info
    }

    async fn current_conditions(&self) -> Result<WeatherReading> {
        let line = self.raw_current_conditions().await?;
        debug!(raw = %line, "raw data");
        let reading = protocol::parse_current_conditions(&line)?;
        debug!(?reading, "parsed data");
        Ok(reading)
    }

    async fn firmware_version(&self) -> Result<String> {
        self.execute(Command::FirmwareVersion).await
    }

    async fn firmware_serial(&self) -> Result<String> {
        self.execute(Command::FirmwareSerial).await
    }

    async fn unit_id(&self) -> Result<String> {
        self.execute(Command::UnitId).await
    }

    async fn close(&self) -> Result<()> {
        let mut transport = self.transport.lock().await;
        transport.close().await
    }
}

/// One command/response exchange: write the command byte, read one line.
///
/// Reads until the line terminator arrives or the deadline passes,
/// whichever is first. A deadline with data in hand returns the partial
/// line (stations occasionally drop the terminator; the grammar check
/// upstream decides whether what arrived is usable). A deadline with no
/// data at all is a timeout.
async fn exchange(
    transport: &mut dyn Transport,
    command: Command,
    read_timeout: Duration,
) -> Result<String> {
    transport.send(&[command.byte()]).await?;

    let deadline = tokio::time::Instant::now() + read_timeout;
    let mut line: Vec<u8> = Vec::new();
    let mut buf = [0u8; 256];

    loop {
        let now = tokio::time::Instant::now();
        if now >= deadline {
            break;
        }

        match transport.receive(&mut buf, deadline - now).await {
            Ok(n) => {
                line.extend_from_slice(&buf[..n]);
                if line.len() > MAX_LINE {
                    warn!(
                        command = %command,
                        len = line.len(),
                        "response line exceeded maximum length, discarding"
                    );
                    return Err(Error::Transport(format!(
                        "response to '{}' exceeded {} bytes",
                        command.letter(),
                        MAX_LINE
                    )));
                }
                if line.contains(&LINE_TERMINATOR) {
                    break;
                }
            }
            Err(Error::Timeout) => break,
            Err(e) => return Err(e),
        }
    }

    if line.is_empty() {
        return Err(Error::Timeout);
    }

    debug!(command = %command, raw = %hex_render(&line), "station said");
    Ok(protocol::decode_line(&line))
}

/// Render received bytes as space-separated hex for debug logs.
fn hex_render(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|b| format!("{b:02X}"))
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::TwiBuilder;
    use crate::models::wrl_25;
    use wxlib_test_harness::MockTransport;

    const CONDITIONS_LINE: &[u8] =
        b"5:15 07/24/90 SSE 04MPH 052F 069F 078F 099% 30.04R 00.19\"D 01.38\"M 11.78\"T\r\n";

    /// Builder with test-friendly retry settings.
    fn test_builder() -> TwiBuilder {
        TwiBuilder::new(wrl_25())
            .max_tries(3)
            .retry_wait(Duration::from_millis(10))
    }

    #[tokio::test]
    async fn current_conditions_round_trip() {
        let mut mock = MockTransport::new();
        mock.expect(b"r", CONDITIONS_LINE);

        let station = test_builder()
            .build_with_transport(Box::new(mock))
            .await
            .unwrap();

        let reading = station.current_conditions().await.unwrap();
        assert_eq!(reading.time, "5:15");
        assert_eq!(reading.wind_dir.map(|d| d.degrees()), Some(157.5));
        assert_eq!(reading.pressure, Some(30.04));
    }

    #[tokio::test]
    async fn rate_variant_sends_uppercase_command() {
        let mut mock = MockTransport::new();
        mock.expect(b"R", CONDITIONS_LINE);

        let station = test_builder()
            .conditions_variant(ConditionsVariant::Rate)
            .build_with_transport(Box::new(mock))
            .await
            .unwrap();

        let reading = station.current_conditions().await.unwrap();
        assert_eq!(reading.rain_total, Some(11.78));
    }

    #[tokio::test]
    async fn companion_commands_return_raw_text() {
        let mut mock = MockTransport::new();
        mock.expect(b"I", b"12345\r\n");
        mock.expect(b"V", b"25.01 050517\r\n");
        mock.expect(b"S", b"S/N 004627\r\n");

        let station = test_builder()
            .build_with_transport(Box::new(mock))
            .await
            .unwrap();

        assert_eq!(station.unit_id().await.unwrap(), "12345");
        assert_eq!(station.firmware_version().await.unwrap(), "25.01 050517");
        assert_eq!(station.firmware_serial().await.unwrap(), "S/N 004627");
    }

    #[tokio::test]
    async fn partial_line_without_terminator_is_accepted() {
        // Deadline with data in hand: what arrived is handed upstream.
        let mut mock = MockTransport::new();
        mock.expect(b"V", b"25.01 050517");

        let station = test_builder()
            .build_with_transport(Box::new(mock))
            .await
            .unwrap();

        assert_eq!(station.firmware_version().await.unwrap(), "25.01 050517");
    }

    #[tokio::test(start_paused = true)]
    async fn silent_station_exhausts_retry_budget() {
        // Three attempts, all timeouts: exactly three channel exchanges
        // and two backoff sleeps, then RetriesExceeded.
        let mut mock = MockTransport::new();
        mock.expect(b"r", b"");
        mock.expect(b"r", b"");
        mock.expect(b"r", b"");

        let retry_wait = Duration::from_secs(10);
        let station = TwiBuilder::new(wrl_25())
            .max_tries(3)
            .retry_wait(retry_wait)
            .build_with_transport(Box::new(mock))
            .await
            .unwrap();

        let start = tokio::time::Instant::now();
        let result = station.raw_current_conditions().await;

        match result {
            Err(Error::RetriesExceeded { command, tries }) => {
                assert_eq!(command, 'r');
                assert_eq!(tries, 3);
            }
            other => panic!("expected RetriesExceeded, got {other:?}"),
        }

        // Two sleeps between three attempts, none after the last.
        assert_eq!(start.elapsed(), retry_wait * 2);
    }

    #[tokio::test(start_paused = true)]
    async fn success_on_later_attempt_stops_retrying() {
        // Attempts one and two time out, attempt three answers: the
        // executor returns after exactly two sleeps and consumes exactly
        // three expectations.
        let mut mock = MockTransport::new();
        mock.expect(b"r", b"");
        mock.expect(b"r", b"");
        mock.expect(b"r", CONDITIONS_LINE);

        let retry_wait = Duration::from_secs(10);
        let station = TwiBuilder::new(wrl_25())
            .max_tries(5)
            .retry_wait(retry_wait)
            .build_with_transport(Box::new(mock))
            .await
            .unwrap();

        let start = tokio::time::Instant::now();
        let line = station.raw_current_conditions().await.unwrap();

        assert!(line.starts_with("5:15"));
        assert_eq!(start.elapsed(), retry_wait * 2);
    }

    #[tokio::test]
    async fn single_try_budget_fails_immediately() {
        let mut mock = MockTransport::new();
        mock.expect(b"r", b"");

        let station = TwiBuilder::new(wrl_25())
            .max_tries(1)
            .retry_wait(Duration::from_secs(600))
            .build_with_transport(Box::new(mock))
            .await
            .unwrap();

        // With a 10 minute retry_wait, completing promptly proves the
        // single-attempt budget slept zero times.
        let result = station.raw_current_conditions().await;
        assert!(matches!(
            result,
            Err(Error::RetriesExceeded { tries: 1, .. })
        ));
    }

    #[tokio::test]
    async fn malformed_conditions_line_is_a_protocol_error() {
        // Channel is fine, grammar is not: no retry, terminal error.
        let mut mock = MockTransport::new();
        mock.expect(b"r", b"5:15 07/24/90 SSE\r\n");

        let station = test_builder()
            .build_with_transport(Box::new(mock))
            .await
            .unwrap();

        let result = station.current_conditions().await;
        assert!(matches!(result, Err(Error::Protocol(_))));
    }

    #[tokio::test]
    async fn close_is_idempotent_and_terminal() {
        let mut mock = MockTransport::new();
        mock.expect(b"r", CONDITIONS_LINE);

        let station = test_builder()
            .build_with_transport(Box::new(mock))
            .await
            .unwrap();

        station.close().await.unwrap();
        station.close().await.unwrap();

        // Commands after close fail without touching the retry budget.
        let result = station.raw_current_conditions().await;
        assert!(matches!(result, Err(Error::NotConnected)));
    }

    #[tokio::test]
    async fn station_is_usable_as_trait_object() {
        let mut mock = MockTransport::new();
        mock.expect(b"I", b"12345\r\n");

        let station: Box<dyn WeatherStation> = Box::new(
            test_builder()
                .build_with_transport(Box::new(mock))
                .await
                .unwrap(),
        );

        assert_eq!(station.info().model_name, "WRL-25");
        assert_eq!(station.unit_id().await.unwrap(), "12345");
    }

    #[test]
    fn hex_render_matches_debug_format() {
        assert_eq!(hex_render(b"r\r\n"), "72 0D 0A");
        assert_eq!(hex_render(&[]), "");
    }
}
