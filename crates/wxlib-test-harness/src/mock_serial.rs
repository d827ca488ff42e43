//! Mock transport for deterministic testing of the station driver.
//!
//! [`MockTransport`] implements the [`Transport`] trait with pre-loaded
//! command/response pairs. This lets you test command framing, line
//! reading, retry behavior, and response parsing without a station on the
//! bench.
//!
//! # Example
//!
//! ```
//! use wxlib_test_harness::MockTransport;
//!
//! let mut mock = MockTransport::new();
//! // Pre-load: when the driver sends this command, return this line.
//! mock.expect(b"V", b"25.01 050517\r\n");
//! mock.expect(
//!     b"r",
//!     b"13:28 06/02/16 WSW 00MPH 460F 081F 086F 054% 29.31F 00.00\"D 00.00\"M 00.00\"R\r\n",
//! );
//! ```

use async_trait::async_trait;
use std::collections::VecDeque;
use std::time::Duration;

use wxlib_core::error::{Error, Result};
use wxlib_core::transport::Transport;

/// A pre-loaded command/response pair for the mock transport.
#[derive(Debug, Clone)]
struct Expectation {
    /// The exact bytes we expect to be sent.
    request: Vec<u8>,
    /// The bytes to return when the matching request is received.
    response: Vec<u8>,
}

/// A mock [`Transport`] for testing the station driver without hardware.
///
/// Expectations are consumed in order. When `send()` is called, the sent
/// data is recorded and matched against the next expectation. The
/// corresponding response is then returned by subsequent `receive()`
/// calls, in as many chunks as the caller's buffer requires.
///
/// An empty response simulates a station that never answers: `receive()`
/// reports [`Error::Timeout`], which is how a powered-off or unplugged
/// station looks to the retry loop.
///
/// If no expectation matches or the queue is exhausted, an error is
/// returned.
#[derive(Debug)]
pub struct MockTransport {
    /// Ordered queue of expected command/response pairs.
    expectations: VecDeque<Expectation>,
    /// The response data pending for the next `receive()` call.
    pending_response: Option<Vec<u8>>,
    /// Cursor into the pending response (how many bytes have been read so far).
    response_cursor: usize,
    /// Whether the transport is "connected".
    connected: bool,
    /// Log of all bytes sent through this transport.
    sent_log: Vec<Vec<u8>>,
}

impl MockTransport {
    /// Create a new mock transport in the connected state.
    pub fn new() -> Self {
        MockTransport {
            expectations: VecDeque::new(),
            pending_response: None,
            response_cursor: 0,
            connected: true,
            sent_log: Vec::new(),
        }
    }

    /// Add an expected command/response pair.
    ///
    /// When `send()` is called with data matching `request`, subsequent
    /// `receive()` calls will return `response`. Responses should carry
    /// the station's line terminator (`\r\n`) unless the test is
    /// exercising terminator handling itself.
    pub fn expect(&mut self, request: &[u8], response: &[u8]) {
        self.expectations.push_back(Expectation {
            request: request.to_vec(),
            response: response.to_vec(),
        });
    }

    /// Return a reference to all data that has been sent through this transport.
    ///
    /// Each element is the byte slice from one `send()` call. Useful for
    /// asserting how many attempts a retry loop made.
    pub fn sent_data(&self) -> &[Vec<u8>] {
        &self.sent_log
    }

    /// Return the number of expectations that have not yet been consumed.
    pub fn remaining_expectations(&self) -> usize {
        self.expectations.len()
    }

    /// Set the connected state of the mock transport.
    ///
    /// When set to `false`, subsequent `send()` and `receive()` calls will
    /// return [`Error::NotConnected`].
    pub fn set_connected(&mut self, connected: bool) {
        self.connected = connected;
    }
}

impl Default for MockTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn send(&mut self, data: &[u8]) -> Result<()> {
        if !self.connected {
            return Err(Error::NotConnected);
        }

        // Record what was sent.
        self.sent_log.push(data.to_vec());

        // Match against the next expectation.
        if let Some(expectation) = self.expectations.pop_front() {
            if data != expectation.request.as_slice() {
                return Err(Error::Protocol(format!(
                    "unexpected send data: expected {:02X?}, got {:02X?}",
                    expectation.request, data
                )));
            }
            self.pending_response = Some(expectation.response);
            self.response_cursor = 0;
            Ok(())
        } else {
            Err(Error::Protocol(
                "no more expectations in mock transport".into(),
            ))
        }
    }

    async fn receive(&mut self, buf: &mut [u8], _timeout: Duration) -> Result<usize> {
        if !self.connected {
            return Err(Error::NotConnected);
        }

        if let Some(ref response) = self.pending_response {
            let remaining = &response[self.response_cursor..];
            if remaining.is_empty() {
                self.pending_response = None;
                self.response_cursor = 0;
                return Err(Error::Timeout);
            }
            let n = remaining.len().min(buf.len());
            buf[..n].copy_from_slice(&remaining[..n]);
            self.response_cursor += n;
            if self.response_cursor >= response.len() {
                // All response bytes consumed; clear for next exchange.
                self.pending_response = None;
                self.response_cursor = 0;
            }
            Ok(n)
        } else {
            Err(Error::Timeout)
        }
    }

    async fn close(&mut self) -> Result<()> {
        self.connected = false;
        self.pending_response = None;
        self.response_cursor = 0;
        Ok(())
    }

    fn is_connected(&self) -> bool {
        self.connected
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wxlib_core::transport::Transport;

    const CONDITIONS_LINE: &[u8] =
        b"13:28 06/02/16 WSW 00MPH 460F 081F 086F 054% 29.31F 00.00\"D 00.00\"M 00.00\"R\r\n";

    #[tokio::test]
    async fn mock_transport_basic_send_receive() {
        let mut mock = MockTransport::new();
        mock.expect(b"r", CONDITIONS_LINE);

        // Send the expected command.
        mock.send(b"r").await.unwrap();

        // Receive the pre-loaded line.
        let mut buf = [0u8; 128];
        let n = mock
            .receive(&mut buf, Duration::from_millis(100))
            .await
            .unwrap();

        assert_eq!(n, CONDITIONS_LINE.len());
        assert_eq!(&buf[..n], CONDITIONS_LINE);
    }

    #[tokio::test]
    async fn mock_transport_tracks_sent_data() {
        let mut mock = MockTransport::new();

        mock.expect(b"V", b"25.01 050517\r\n");
        mock.expect(b"I", b"12345\r\n");

        mock.send(b"V").await.unwrap();
        mock.send(b"I").await.unwrap();

        assert_eq!(mock.sent_data().len(), 2);
        assert_eq!(mock.sent_data()[0], b"V");
        assert_eq!(mock.sent_data()[1], b"I");
    }

    #[tokio::test]
    async fn mock_transport_wrong_data_errors() {
        let mut mock = MockTransport::new();
        mock.expect(b"V", b"25.01\r\n");

        let result = mock.send(b"S").await;
        assert!(result.is_err());
        assert!(matches!(result.unwrap_err(), Error::Protocol(_)));
    }

    #[tokio::test]
    async fn mock_transport_no_expectations_errors() {
        let mut mock = MockTransport::new();

        let result = mock.send(b"r").await;
        assert!(result.is_err());
        assert!(matches!(result.unwrap_err(), Error::Protocol(_)));
    }

    #[tokio::test]
    async fn mock_transport_receive_without_send_times_out() {
        let mut mock = MockTransport::new();
        let mut buf = [0u8; 64];

        let result = mock.receive(&mut buf, Duration::from_millis(10)).await;
        assert!(result.is_err());
        assert!(matches!(result.unwrap_err(), Error::Timeout));
    }

    #[tokio::test]
    async fn mock_transport_empty_response_times_out() {
        // A silent station: command accepted, no bytes ever arrive.
        let mut mock = MockTransport::new();
        mock.expect(b"r", b"");

        mock.send(b"r").await.unwrap();

        let mut buf = [0u8; 64];
        let result = mock.receive(&mut buf, Duration::from_millis(10)).await;
        assert!(matches!(result.unwrap_err(), Error::Timeout));
    }

    #[tokio::test]
    async fn mock_transport_disconnect() {
        let mut mock = MockTransport::new();
        assert!(mock.is_connected());

        mock.close().await.unwrap();
        assert!(!mock.is_connected());

        // Operations after close should fail.
        let result = mock.send(b"r").await;
        assert!(matches!(result.unwrap_err(), Error::NotConnected));
    }

    #[tokio::test]
    async fn mock_transport_set_connected() {
        let mut mock = MockTransport::new();
        mock.set_connected(false);
        assert!(!mock.is_connected());

        let result = mock.send(b"r").await;
        assert!(matches!(result.unwrap_err(), Error::NotConnected));

        let mut buf = [0u8; 8];
        let result = mock.receive(&mut buf, Duration::from_millis(10)).await;
        assert!(matches!(result.unwrap_err(), Error::NotConnected));
    }

    #[tokio::test]
    async fn mock_transport_remaining_expectations() {
        let mut mock = MockTransport::new();
        mock.expect(b"V", b"25.01\r\n");
        mock.expect(b"S", b"000000\r\n");
        assert_eq!(mock.remaining_expectations(), 2);

        mock.send(b"V").await.unwrap();
        assert_eq!(mock.remaining_expectations(), 1);

        mock.send(b"S").await.unwrap();
        assert_eq!(mock.remaining_expectations(), 0);
    }

    #[tokio::test]
    async fn mock_transport_partial_receive() {
        // A line longer than the read buffer arrives in chunks, the way a
        // real serial port delivers it.
        let mut mock = MockTransport::new();
        mock.expect(b"r", CONDITIONS_LINE);

        mock.send(b"r").await.unwrap();

        let mut collected = Vec::new();
        let mut buf = [0u8; 16];
        loop {
            match mock.receive(&mut buf, Duration::from_millis(100)).await {
                Ok(n) => collected.extend_from_slice(&buf[..n]),
                Err(Error::Timeout) => break,
                Err(e) => panic!("unexpected error: {e}"),
            }
        }
        assert_eq!(collected, CONDITIONS_LINE);
    }
}
