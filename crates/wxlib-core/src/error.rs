//! Error types for wxlib.
//!
//! All fallible operations across the library return [`Result<T>`], which
//! uses [`Error`] as the error type. Transport-layer, protocol-layer, and
//! retry-policy errors are all captured here.

/// The error type for all wxlib operations.
///
/// Variants cover the full range of failure modes encountered when
/// talking to a serial-connected weather station: physical channel
/// failures, response decode errors, timeouts, and an exhausted retry
/// budget.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A transport-level error (serial port unavailable, write failure).
    #[error("transport error: {0}")]
    Transport(String),

    /// A protocol-level error (response line does not match the station's
    /// fixed grammar).
    #[error("protocol error: {0}")]
    Protocol(String),

    /// Timed out waiting for a response from the station.
    ///
    /// This typically indicates the station is powered off, the baud rate
    /// is wrong, or the cable is disconnected.
    #[error("timeout waiting for response")]
    Timeout,

    /// The retry budget for a command was exhausted.
    ///
    /// Carries the command letter that was being sent and the number of
    /// attempts made. The caller (usually a polling loop) is expected to
    /// skip the current cycle rather than abort.
    #[error("max retries ({tries}) exceeded for command '{command}'")]
    RetriesExceeded {
        /// The single-letter command that kept failing.
        command: char,
        /// Total attempts made, including the first.
        tries: u32,
    },

    /// An invalid parameter was passed to a builder or station method.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// No connection to the station has been established.
    #[error("not connected")]
    NotConnected,

    /// The connection to the station was lost unexpectedly.
    #[error("connection lost")]
    ConnectionLost,

    /// An underlying I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Whether the retry executor may re-attempt the command after this
    /// error.
    ///
    /// Channel-level failures (transport, I/O, disconnect, timeout) are
    /// transient and retryable. Protocol errors are not: re-parsing the
    /// same bytes cannot succeed, and a fresh line requires a fresh
    /// command from the caller. `NotConnected` means the caller closed
    /// the channel on purpose, which no amount of retrying will reopen.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Error::Transport(_) | Error::Timeout | Error::ConnectionLost | Error::Io(_)
        )
    }
}

/// A convenience `Result` alias using [`Error`] as the error type.
pub type Result<T> = std::result::Result<T, Error>;
