// wxlib test application -- CLI tool for exercising the TWI station
// driver against real hardware or a mock transport.
//
// Usage:
//   wx-test-app list
//   wx-test-app --port /dev/ttyUSB0 info
//   wx-test-app --port /dev/ttyUSB0 current
//   wx-test-app --model WLS-8000 --port /dev/ttyS0 --rate current
//   wx-test-app --port /dev/ttyUSB0 watch --interval 15
//   wx-test-app --mock current
//
// The --mock flag swaps in a pre-loaded transport, useful for verifying
// CLI parsing and builder wiring without a station on the bench.

use std::time::Duration;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};

use wxlib::twi::{ConditionsVariant, TwiBuilder, TwiModel, PacketConverter};
use wxlib::twi::models::all_twi_models;
use wxlib::WeatherStation;
use wxlib_test_harness::MockTransport;

/// One canned conditions line for --mock runs.
const MOCK_CONDITIONS: &[u8] =
    b"13:28 06/02/16 WSW 00MPH 460F 081F 086F 054% 29.31F 00.00\"D 00.00\"M 00.00\"R\r\n";

// ---------------------------------------------------------------------------
// CLI argument definitions
// ---------------------------------------------------------------------------

/// wxlib test application -- exercises the station driver from the command line.
#[derive(Parser)]
#[command(name = "wx-test-app", version, about)]
struct Cli {
    /// Station model name (e.g. WRL-25, WLS-8000). Defaults to WRL-25.
    #[arg(long, default_value = "WRL-25")]
    model: String,

    /// Serial port path (e.g. /dev/ttyUSB0, /dev/ttyS0, COM3).
    /// Required for all commands except `list` unless --mock is used.
    #[arg(long)]
    port: Option<String>,

    /// Override the default baud rate (19200).
    #[arg(long)]
    baud: Option<u32>,

    /// Retry budget per command, first attempt included.
    #[arg(long, default_value_t = 10)]
    max_tries: u32,

    /// Seconds to wait between retry attempts.
    #[arg(long, default_value_t = 10)]
    retry_wait: u64,

    /// Use the rate-based `R` conditions command instead of `r`.
    #[arg(long)]
    rate: bool,

    /// Use a mock transport instead of a real serial port.
    #[arg(long)]
    mock: bool,

    /// Display diagnostic information while running.
    #[arg(long)]
    debug: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List supported station models.
    List,
    /// Print unit id and firmware identification.
    Info,
    /// Fetch and print one current-conditions reading.
    Current,
    /// Fetch one current-conditions line without parsing it.
    Raw,
    /// Poll current conditions on a fixed cadence, printing loop packets.
    Watch {
        /// Seconds between polls.
        #[arg(long, default_value_t = 15)]
        interval: u64,
        /// Stop after this many polls (0 = run until ctrl-c).
        #[arg(long, default_value_t = 0)]
        count: u32,
    },
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Select the process-wide log sink once, before any driver activity.
    let filter = if cli.debug { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .init();

    match cli.command {
        Command::List => cmd_list(),
        Command::Info => cmd_info(&cli).await,
        Command::Current => cmd_current(&cli).await,
        Command::Raw => cmd_raw(&cli).await,
        Command::Watch { interval, count } => cmd_watch(&cli, interval, count).await,
    }
}

// ---------------------------------------------------------------------------
// Station construction
// ---------------------------------------------------------------------------

fn lookup_model(name: &str) -> Result<TwiModel> {
    all_twi_models()
        .into_iter()
        .find(|m| m.name.eq_ignore_ascii_case(name) || m.model_id.eq_ignore_ascii_case(name))
        .with_context(|| {
            format!(
                "unknown model '{}'. Valid: {}",
                name,
                all_twi_models()
                    .iter()
                    .map(|m| m.name)
                    .collect::<Vec<_>>()
                    .join(", ")
            )
        })
}

fn conditions_variant(cli: &Cli) -> ConditionsVariant {
    if cli.rate {
        ConditionsVariant::Rate
    } else {
        ConditionsVariant::Term
    }
}

fn builder_from_cli(cli: &Cli) -> Result<TwiBuilder> {
    let mut builder = TwiBuilder::new(lookup_model(&cli.model)?)
        .max_tries(cli.max_tries)
        .retry_wait(Duration::from_secs(cli.retry_wait))
        .conditions_variant(conditions_variant(cli));
    if let Some(baud) = cli.baud {
        builder = builder.baud_rate(baud);
    }
    Ok(builder)
}

/// Build a station, either on the real serial port or on a mock
/// transport pre-loaded with the given exchanges.
async fn build_station(
    cli: &Cli,
    mock_exchanges: &[(&[u8], &[u8])],
) -> Result<wxlib::twi::TwiStation> {
    let builder = builder_from_cli(cli)?;

    if cli.mock {
        let mut mock = MockTransport::new();
        for (request, response) in mock_exchanges {
            mock.expect(request, response);
        }
        return Ok(builder.build_with_transport(Box::new(mock)).await?);
    }

    let Some(port) = &cli.port else {
        bail!("--port is required (or use --mock)");
    };
    let station = builder
        .serial_port(port)
        .build()
        .await
        .with_context(|| format!("failed to open station on {port}"))?;
    Ok(station)
}

fn conditions_request(cli: &Cli) -> &'static [u8] {
    if cli.rate { b"R" } else { b"r" }
}

// ---------------------------------------------------------------------------
// Subcommands
// ---------------------------------------------------------------------------

fn cmd_list() -> Result<()> {
    println!("{:<10} {:>6}  {}", "MODEL", "BAUD", "LOGGER");
    for station in wxlib::supported_stations() {
        println!(
            "{:<10} {:>6}  {}",
            station.model_name,
            station.default_baud_rate,
            if station.has_logger { "yes" } else { "no" }
        );
    }
    Ok(())
}

async fn cmd_info(cli: &Cli) -> Result<()> {
    let station = build_station(
        cli,
        &[
            (b"I", b"12345\r\n"),
            (b"V", b"25.01 050517\r\n"),
            (b"S", b"S/N 004627\r\n"),
        ],
    )
    .await?;

    println!("Station: {}", station.info());
    println!("Unit id: {}", station.unit_id().await?);
    println!("Firmware version: {}", station.firmware_version().await?);
    println!("Firmware serial: {}", station.firmware_serial().await?);

    station.close().await?;
    Ok(())
}

async fn cmd_current(cli: &Cli) -> Result<()> {
    let station = build_station(cli, &[(conditions_request(cli), MOCK_CONDITIONS)]).await?;

    let reading = station.current_conditions().await?;
    println!("Station time: {} {}", reading.time, reading.date);
    println!(
        "Wind: {} at {:?} mph",
        reading
            .wind_dir
            .map(|d| d.to_string())
            .unwrap_or_else(|| "--".into()),
        reading.wind_speed
    );
    println!("Temperature in/out/aux (F): {:?} / {:?} / {:?}",
        reading.temperature_in, reading.temperature_out, reading.temperature_aux);
    println!("Humidity: {:?} %", reading.humidity);
    println!("Pressure: {:?} inHg", reading.pressure);
    println!(
        "Rain day/month/total (in): {:?} / {:?} / {:?}",
        reading.rain_day, reading.rain_month, reading.rain_total
    );

    station.close().await?;
    Ok(())
}

async fn cmd_raw(cli: &Cli) -> Result<()> {
    let station = build_station(cli, &[(conditions_request(cli), MOCK_CONDITIONS)]).await?;

    let line = station.raw_current_conditions().await?;
    println!("{line}");

    station.close().await?;
    Ok(())
}

async fn cmd_watch(cli: &Cli, interval: u64, count: u32) -> Result<()> {
    if cli.mock && count == 0 {
        bail!("--mock watch requires --count (the mock has a finite script)");
    }

    // Pre-load one exchange per poll for mock runs.
    let request = conditions_request(cli);
    let mock_exchanges: Vec<(&[u8], &[u8])> =
        (0..count).map(|_| (request, MOCK_CONDITIONS)).collect();

    let station = build_station(cli, &mock_exchanges).await?;
    let mut converter = PacketConverter::new();
    let mut polled = 0u32;

    println!("Polling {} every {interval} s; ctrl-c to stop.", station.info());

    loop {
        match station.current_conditions().await {
            Ok(reading) => {
                let packet = converter.convert(&reading);
                println!(
                    "[{} {}] out {:?} F  wind {:?} mph  humidity {:?} %  \
                     pressure {:?} inHg  rain {:?} in",
                    reading.time,
                    reading.date,
                    packet.temperature_out_f,
                    packet.wind_speed_mph,
                    packet.humidity_pct,
                    packet.pressure_inhg,
                    packet.rain_in,
                );
            }
            // A lost cycle is the driver's business to report; ours is to
            // keep polling.
            Err(e) => eprintln!("poll failed, skipping cycle: {e}"),
        }

        polled += 1;
        if count > 0 && polled >= count {
            break;
        }

        tokio::select! {
            _ = tokio::time::sleep(Duration::from_secs(interval)) => {}
            _ = tokio::signal::ctrl_c() => {
                println!("interrupted");
                break;
            }
        }
    }

    station.close().await?;
    Ok(())
}
