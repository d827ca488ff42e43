//! Loop packets: readings shaped for a hosting data collector.
//!
//! A [`WeatherReading`] is what the station said; a [`LoopPacket`] is
//! what an archiving host wants: a timestamp, the observations, and rain
//! as the amount that fell *since the previous poll* instead of the
//! station's ever-growing accumulator. [`PacketConverter`] carries the
//! single piece of state (the previous rain total) needed to derive the
//! per-poll delta.
//!
//! Units stay US customary throughout -- degrees Fahrenheit, miles per
//! hour, inches of mercury, inches of rain -- matching what the station
//! reports on the wire.

use std::time::SystemTime;

use tracing::debug;

use wxlib_core::types::WeatherReading;

/// One reading repackaged for a polling host.
#[derive(Debug, Clone, PartialEq)]
pub struct LoopPacket {
    /// Host wall-clock time the packet was produced (not the station's
    /// own time-of-day string, which has no date anchor of its own).
    pub timestamp: SystemTime,
    /// Wind direction in degrees, north = 0, clockwise.
    pub wind_dir_degrees: Option<f64>,
    /// Wind speed, miles per hour.
    pub wind_speed_mph: Option<f64>,
    /// Indoor temperature, degrees Fahrenheit.
    pub temperature_in_f: Option<f64>,
    /// Outdoor temperature, degrees Fahrenheit.
    pub temperature_out_f: Option<f64>,
    /// Auxiliary probe temperature, degrees Fahrenheit.
    pub temperature_aux_f: Option<f64>,
    /// Relative humidity, percent.
    pub humidity_pct: Option<f64>,
    /// Barometric pressure, inches of mercury.
    pub pressure_inhg: Option<f64>,
    /// Rain since the previous poll, inches. `None` until a baseline
    /// total has been seen.
    pub rain_in: Option<f64>,
}

/// Stateful reading-to-packet converter.
///
/// Create one per station and feed it every reading in poll order; the
/// rain delta depends on the previous reading's total.
#[derive(Debug, Default)]
pub struct PacketConverter {
    last_rain_total: Option<f64>,
}

impl PacketConverter {
    /// Create a converter with no rain baseline yet.
    pub fn new() -> Self {
        Self::default()
    }

    /// The most recent rain total seen, if any.
    pub fn last_rain_total(&self) -> Option<f64> {
        self.last_rain_total
    }

    /// Convert a reading to a packet stamped with the current wall clock.
    pub fn convert(&mut self, reading: &WeatherReading) -> LoopPacket {
        self.convert_at(reading, SystemTime::now())
    }

    /// Convert a reading to a packet with an explicit timestamp.
    pub fn convert_at(&mut self, reading: &WeatherReading, timestamp: SystemTime) -> LoopPacket {
        let rain_in = rain_delta(reading.rain_total, self.last_rain_total);
        self.last_rain_total = reading.rain_total;

        LoopPacket {
            timestamp,
            wind_dir_degrees: reading.wind_dir.map(|d| d.degrees()),
            wind_speed_mph: reading.wind_speed,
            temperature_in_f: reading.temperature_in,
            temperature_out_f: reading.temperature_out,
            temperature_aux_f: reading.temperature_aux,
            humidity_pct: reading.humidity,
            pressure_inhg: reading.pressure,
            rain_in,
        }
    }
}

/// Rain that fell between two accumulator totals.
///
/// With no baseline (first poll, or the station dropped the field last
/// time) there is no delta. A total below the baseline means the
/// accumulator was reset between polls; everything on the new counter
/// counts as fallen rain.
fn rain_delta(total: Option<f64>, last: Option<f64>) -> Option<f64> {
    match (total, last) {
        (Some(new), Some(old)) if new >= old => Some(new - old),
        (Some(new), Some(old)) => {
            debug!(new, old, "rain total decreased, assuming counter reset");
            Some(new)
        }
        _ => None,
    }
}
