//! Core types shared by all wxlib crates.
//!
//! These are driver-agnostic: a reading produced by any station backend
//! uses the same [`WeatherReading`] shape, and applications that only
//! need to enumerate supported hardware work with [`StationDefinition`]
//! without pulling in a protocol driver.

use std::fmt;

/// One of the sixteen compass points a station reports for wind direction.
///
/// Station responses carry the abbreviated token (`"N"`, `"SSE"`, ...);
/// the numeric bearing in degrees is derived, with north at 0 and values
/// increasing clockwise in 22.5 degree steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[allow(clippy::upper_case_acronyms)]
pub enum CompassPoint {
    N,
    NNE,
    NE,
    ENE,
    E,
    ESE,
    SE,
    SSE,
    S,
    SSW,
    SW,
    WSW,
    W,
    WNW,
    NW,
    NNW,
}

impl CompassPoint {
    /// All sixteen points in clockwise order starting at north.
    pub const ALL: [CompassPoint; 16] = [
        CompassPoint::N,
        CompassPoint::NNE,
        CompassPoint::NE,
        CompassPoint::ENE,
        CompassPoint::E,
        CompassPoint::ESE,
        CompassPoint::SE,
        CompassPoint::SSE,
        CompassPoint::S,
        CompassPoint::SSW,
        CompassPoint::SW,
        CompassPoint::WSW,
        CompassPoint::W,
        CompassPoint::WNW,
        CompassPoint::NW,
        CompassPoint::NNW,
    ];

    /// Look up a compass point from the exact station token.
    ///
    /// The match is case-sensitive: stations send upper-case tokens, and
    /// anything else (including garbled data) yields `None` rather than
    /// an error.
    pub fn from_token(token: &str) -> Option<CompassPoint> {
        let point = match token {
            "N" => CompassPoint::N,
            "NNE" => CompassPoint::NNE,
            "NE" => CompassPoint::NE,
            "ENE" => CompassPoint::ENE,
            "E" => CompassPoint::E,
            "ESE" => CompassPoint::ESE,
            "SE" => CompassPoint::SE,
            "SSE" => CompassPoint::SSE,
            "S" => CompassPoint::S,
            "SSW" => CompassPoint::SSW,
            "SW" => CompassPoint::SW,
            "WSW" => CompassPoint::WSW,
            "W" => CompassPoint::W,
            "WNW" => CompassPoint::WNW,
            "NW" => CompassPoint::NW,
            "NNW" => CompassPoint::NNW,
            _ => return None,
        };
        Some(point)
    }

    /// The bearing in degrees, north = 0, clockwise.
    pub fn degrees(&self) -> f64 {
        match self {
            CompassPoint::N => 0.0,
            CompassPoint::NNE => 22.5,
            CompassPoint::NE => 45.0,
            CompassPoint::ENE => 67.5,
            CompassPoint::E => 90.0,
            CompassPoint::ESE => 112.5,
            CompassPoint::SE => 135.0,
            CompassPoint::SSE => 157.5,
            CompassPoint::S => 180.0,
            CompassPoint::SSW => 202.5,
            CompassPoint::SW => 225.0,
            CompassPoint::WSW => 247.5,
            CompassPoint::W => 270.0,
            CompassPoint::WNW => 292.5,
            CompassPoint::NW => 315.0,
            CompassPoint::NNW => 337.5,
        }
    }

    /// The station's token for this point (`"N"`, `"SSE"`, ...).
    pub fn token(&self) -> &'static str {
        match self {
            CompassPoint::N => "N",
            CompassPoint::NNE => "NNE",
            CompassPoint::NE => "NE",
            CompassPoint::ENE => "ENE",
            CompassPoint::E => "E",
            CompassPoint::ESE => "ESE",
            CompassPoint::SE => "SE",
            CompassPoint::SSE => "SSE",
            CompassPoint::S => "S",
            CompassPoint::SSW => "SSW",
            CompassPoint::SW => "SW",
            CompassPoint::WSW => "WSW",
            CompassPoint::W => "W",
            CompassPoint::WNW => "WNW",
            CompassPoint::NW => "NW",
            CompassPoint::NNW => "NNW",
        }
    }
}

impl fmt::Display for CompassPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

/// One decoded current-conditions response.
///
/// All measurements are in the station's native US customary units:
/// degrees Fahrenheit, miles per hour, inches of mercury, inches of rain.
/// A `None` field means the station sent something unparseable in that
/// position — an explicit "no usable data", distinct from a failed parse
/// of the whole line.
///
/// The `time` and `date` fields are kept as the station's local-time
/// strings (`"13:28"`, `"06/02/16"`); interpretation is up to the caller.
#[derive(Debug, Clone, PartialEq)]
pub struct WeatherReading {
    /// Station local time of day, as sent (token 0).
    pub time: String,
    /// Station local date, as sent (token 1).
    pub date: String,
    /// Wind direction, if the compass token was recognized.
    pub wind_dir: Option<CompassPoint>,
    /// Wind speed in miles per hour.
    pub wind_speed: Option<f64>,
    /// Auxiliary temperature probe, degrees Fahrenheit.
    pub temperature_aux: Option<f64>,
    /// Indoor temperature, degrees Fahrenheit.
    pub temperature_in: Option<f64>,
    /// Outdoor temperature, degrees Fahrenheit.
    pub temperature_out: Option<f64>,
    /// Relative humidity, percent.
    pub humidity: Option<f64>,
    /// Barometric pressure, inches of mercury.
    pub pressure: Option<f64>,
    /// Rain since midnight, inches.
    pub rain_day: Option<f64>,
    /// Rain this month, inches.
    pub rain_month: Option<f64>,
    /// Rain total since the accumulator was last reset, inches.
    pub rain_total: Option<f64>,
}

/// Identity of a connected station.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StationInfo {
    /// Human-readable model name (e.g. "WRL-25").
    pub model_name: String,
    /// Machine-readable model identifier.
    pub model_id: String,
}

impl fmt::Display for StationInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TWI {}", self.model_name)
    }
}

/// Static description of a supported station model.
///
/// Returned by `wxlib::supported_stations()` for applications that need
/// to enumerate hardware (e.g. a model picker) without constructing a
/// driver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StationDefinition {
    /// Human-readable model name.
    pub model_name: &'static str,
    /// Default serial baud rate for this model.
    pub default_baud_rate: u32,
    /// Whether the model has an on-board data logger.
    pub has_logger: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compass_full_table() {
        let expected: [(&str, f64); 16] = [
            ("N", 0.0),
            ("NNE", 22.5),
            ("NE", 45.0),
            ("ENE", 67.5),
            ("E", 90.0),
            ("ESE", 112.5),
            ("SE", 135.0),
            ("SSE", 157.5),
            ("S", 180.0),
            ("SSW", 202.5),
            ("SW", 225.0),
            ("WSW", 247.5),
            ("W", 270.0),
            ("WNW", 292.5),
            ("NW", 315.0),
            ("NNW", 337.5),
        ];
        for (token, degrees) in expected {
            let point = CompassPoint::from_token(token)
                .unwrap_or_else(|| panic!("token {token} not recognized"));
            assert_eq!(point.degrees(), degrees, "bearing mismatch for {token}");
            assert_eq!(point.token(), token);
        }
    }

    #[test]
    fn compass_all_is_clockwise() {
        for pair in CompassPoint::ALL.windows(2) {
            assert_eq!(pair[1].degrees() - pair[0].degrees(), 22.5);
        }
    }

    #[test]
    fn compass_unknown_token() {
        assert_eq!(CompassPoint::from_token("XXX"), None);
        assert_eq!(CompassPoint::from_token(""), None);
        assert_eq!(CompassPoint::from_token("NNNW"), None);
    }

    #[test]
    fn compass_match_is_case_sensitive() {
        assert_eq!(CompassPoint::from_token("n"), None);
        assert_eq!(CompassPoint::from_token("sse"), None);
        assert_eq!(CompassPoint::from_token("Sse"), None);
    }

    #[test]
    fn compass_display_round_trips() {
        for point in CompassPoint::ALL {
            assert_eq!(CompassPoint::from_token(&point.to_string()), Some(point));
        }
    }

    #[test]
    fn station_info_display() {
        let info = StationInfo {
            model_name: "WRL-25".into(),
            model_id: "WRL".into(),
        };
        assert_eq!(info.to_string(), "TWI WRL-25");
    }
}
