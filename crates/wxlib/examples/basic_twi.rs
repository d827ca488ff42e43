//! Basic station polling example.
//!
//! Demonstrates connecting to a TWI WRL-25, identifying the unit, and
//! reading one set of current conditions.
//!
//! # Requirements
//!
//! - A TWI station (WLS/WRL/WR/WPS family) connected via serial
//! - The serial port path adjusted for your system (e.g., `/dev/ttyUSB0`
//!   on Linux, `COM3` on Windows)
//!
//! # Usage
//!
//! ```sh
//! cargo run -p wxlib --example basic_twi
//! ```

use wxlib::WeatherStation;
use wxlib::twi::models::wrl_25;
use wxlib::twi::TwiBuilder;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Adjust this to match your system's serial port.
    let serial_port = "/dev/ttyUSB0";

    println!("Connecting to WRL-25 on {}...", serial_port);

    let station = TwiBuilder::new(wrl_25())
        .serial_port(serial_port)
        .build()
        .await?;

    // Identify the unit, the way an installer sanity-checks the wiring.
    println!("Connected: {}", station.info());
    println!("Unit id: {}", station.unit_id().await?);
    println!("Firmware version: {}", station.firmware_version().await?);
    println!("Firmware serial: {}", station.firmware_serial().await?);

    // Read one set of current conditions.
    let reading = station.current_conditions().await?;
    println!("\nStation time: {} {}", reading.time, reading.date);
    if let Some(dir) = reading.wind_dir {
        println!("Wind: {} ({} deg)", dir, dir.degrees());
    }
    if let Some(speed) = reading.wind_speed {
        println!("Wind speed: {} mph", speed);
    }
    if let Some(temp) = reading.temperature_out {
        println!("Outside: {} F", temp);
    }
    if let Some(humidity) = reading.humidity {
        println!("Humidity: {} %", humidity);
    }
    if let Some(pressure) = reading.pressure {
        println!("Pressure: {} inHg", pressure);
    }

    station.close().await?;
    println!("\nDone.");
    Ok(())
}
