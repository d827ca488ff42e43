//! TWI response grammar: line framing and the current-conditions parser.
//!
//! Every station response is one line terminated by CR/LF. The `V`, `S`,
//! and `I` responses are free-form vendor text and pass through as-is;
//! the current-conditions response is a fixed grammar of twelve
//! whitespace-separated positional tokens:
//!
//! ```text
//! 13:28 06/02/16 WSW 00MPH 460F 081F 086F 054% 29.31F 00.00"D 00.00"M 00.00"R
//! time  date     dir speed aux  in   out  hum  press  day     month   total
//! ```
//!
//! All functions here are pure -- they consume byte slices or string
//! slices without performing any I/O. The station driver feeds received
//! lines in; malformed numeric fields decode to `None` rather than
//! failing the whole line, because a flaky sensor should not cost the
//! caller the eleven other fields.

use wxlib_core::error::{Error, Result};
use wxlib_core::types::{CompassPoint, WeatherReading};

/// The byte that ends every station response line.
pub const LINE_TERMINATOR: u8 = b'\n';

/// Number of positional tokens in a current-conditions line.
pub const CONDITIONS_FIELD_COUNT: usize = 12;

/// Decode a received line to text.
///
/// Strips the trailing terminator (and any surrounding whitespace, which
/// covers the CR of a CRLF pair) and replaces any non-UTF-8 bytes rather
/// than failing: line noise on the serial cable shows up as replacement
/// characters in the affected token, which the tolerant field parsing
/// then treats as absent.
pub fn decode_line(raw: &[u8]) -> String {
    String::from_utf8_lossy(raw).trim().to_string()
}

/// Parse one current-conditions line into a [`WeatherReading`].
///
/// The only failure mode is a line with fewer than
/// [`CONDITIONS_FIELD_COUNT`] tokens. Individual fields that fail to
/// decode become `None`; re-parsing the same line always yields the same
/// reading.
pub fn parse_current_conditions(line: &str) -> Result<WeatherReading> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    if tokens.len() < CONDITIONS_FIELD_COUNT {
        return Err(Error::Protocol(format!(
            "expected {} fields in conditions line, got {}: {:?}",
            CONDITIONS_FIELD_COUNT,
            tokens.len(),
            line
        )));
    }

    Ok(WeatherReading {
        time: tokens[0].to_string(),
        date: tokens[1].to_string(),
        wind_dir: CompassPoint::from_token(tokens[2]),
        wind_speed: leading_float(tokens[3], 2),
        temperature_aux: leading_float(tokens[4], 3),
        temperature_in: leading_float(tokens[5], 3),
        temperature_out: leading_float(tokens[6], 3),
        humidity: leading_float(tokens[7], 3),
        pressure: trailing_float(tokens[8], 1),
        rain_day: trailing_float(tokens[9], 2),
        rain_month: trailing_float(tokens[10], 2),
        rain_total: trailing_float(tokens[11], 2),
    })
}

/// Parse the first `width` characters of a token as a float.
///
/// Used for the fields whose unit marker is a fixed-position suffix after
/// a fixed-width value (`04MPH` -> 4.0, `052F` -> 52.0, `099%` -> 99.0).
/// A token shorter than `width` is parsed whole; anything non-numeric in
/// the value yields `None`.
fn leading_float(token: &str, width: usize) -> Option<f64> {
    token.get(..width).unwrap_or(token).parse().ok()
}

/// Parse a token with its last `unit_len` characters stripped as a float.
///
/// Used for the fields whose value width varies but whose unit marker is
/// a fixed-length trailer (`29.31F` -> 29.31, `00.19"D` -> 0.19). A token
/// no longer than the trailer has no value left and yields `None`.
fn trailing_float(token: &str, unit_len: usize) -> Option<f64> {
    let end = token.len().saturating_sub(unit_len);
    token.get(..end)?.parse().ok()
}
