//! Continuous polling example.
//!
//! Polls a station every 15 seconds and converts each reading into a
//! loop packet, turning the station's rain accumulator into per-poll
//! rain amounts -- the shape an archiving host wants.
//!
//! # Usage
//!
//! ```sh
//! cargo run -p wxlib --example poll_packets
//! ```

use std::time::Duration;

use wxlib::WeatherStation;
use wxlib::twi::models::wrl_25;
use wxlib::twi::{PacketConverter, TwiBuilder};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let station = TwiBuilder::new(wrl_25())
        .serial_port("/dev/ttyUSB0")
        .build()
        .await?;

    println!("Polling {}; ctrl-c to stop.", station.info());

    let mut converter = PacketConverter::new();

    loop {
        // A failed cycle is logged by the driver and skipped here; the
        // station will still be there next time around.
        match station.current_conditions().await {
            Ok(reading) => {
                let packet = converter.convert(&reading);
                println!(
                    "out {:?} F  wind {:?} mph  pressure {:?} inHg  rain {:?} in",
                    packet.temperature_out_f,
                    packet.wind_speed_mph,
                    packet.pressure_inhg,
                    packet.rain_in,
                );
            }
            Err(e) => eprintln!("poll failed, skipping cycle: {e}"),
        }

        tokio::time::sleep(Duration::from_secs(15)).await;
    }
}
