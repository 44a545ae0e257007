//! PAN / TILT drive simulator
//!
//! Serves Modbus RTU frames over UDP so the drive controller can run against
//! a fake device.
//!
//! Usage: cargo run --bin drive_sim -- [--bind 127.0.0.1:502] [--validate-crc]

use std::future::Future;
use std::io;

use clap::Parser;
use tracing::{debug, error, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use rtu_udp_sim::{
    EngineConfig, ModbusResult, RegisterStore, SimulatorConfig, UdpSimulator,
    DEFAULT_BIND_ADDRESS, MAX_READ_REGISTERS, MAX_WRITE_REGISTERS,
};

/// Modbus RTU-over-UDP drive simulator
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Local address to listen on
    #[arg(long, default_value = DEFAULT_BIND_ADDRESS)]
    bind: String,

    /// Drop requests whose trailing CRC does not match
    #[arg(long)]
    validate_crc: bool,

    /// Maximum registers per read request
    #[arg(long, default_value_t = MAX_READ_REGISTERS)]
    max_read_registers: u16,

    /// Maximum registers per write multiple request
    #[arg(long, default_value_t = MAX_WRITE_REGISTERS)]
    max_write_registers: u16,

    /// Start with every register at zero instead of the drive table
    #[arg(long)]
    empty: bool,

    /// Override a drive register at startup, e.g. `--set pan_temp=60`
    #[arg(long = "set", value_name = "NAME=VALUE", value_parser = parse_override)]
    overrides: Vec<(String, u16)>,

    /// Enable debug logging (frame dumps)
    #[arg(short, long)]
    debug: bool,
}

#[tokio::main]
async fn main() -> ModbusResult<()> {
    let args = Args::parse();

    let filter = if args.debug {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };
    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false))
        .with(filter)
        .init();

    info!("{}", rtu_udp_sim::info());

    let engine = EngineConfig::new()
        .with_request_crc_validation(args.validate_crc)
        .with_max_read_registers(args.max_read_registers)
        .with_max_write_registers(args.max_write_registers);
    let config = SimulatorConfig::new(&args.bind)?.with_engine(engine);

    let mut store = if args.empty {
        RegisterStore::new()
    } else {
        RegisterStore::with_drive_defaults()
    };
    for (name, value) in &args.overrides {
        store.set_named(name, *value)?;
    }

    let mut sim = UdpSimulator::bind(config, store).await?;
    sim.run_until(shutdown_on(tokio::signal::ctrl_c())).await?;

    let stats = sim.stats();
    info!(
        "Served {} requests: {} answered, {} dropped ({} bytes in, {} bytes out)",
        stats.requests, stats.responses, stats.dropped, stats.bytes_received, stats.bytes_sent
    );
    for (address, value) in sim.engine().store().holding_snapshot() {
        debug!("HR[{}] = {}", address, value);
    }

    Ok(())
}

/// Resolve when `signal` fires. If the signal cannot be installed, keep
/// serving until the process is killed.
async fn shutdown_on(signal: impl Future<Output = io::Result<()>>) {
    if let Err(e) = signal.await {
        error!("Failed to listen for Ctrl-C: {}", e);
        std::future::pending::<()>().await;
    }
}

fn parse_override(arg: &str) -> Result<(String, u16), String> {
    let (name, value) = arg
        .split_once('=')
        .ok_or_else(|| format!("expected NAME=VALUE, got {}", arg))?;
    let value = value
        .trim()
        .parse::<u16>()
        .map_err(|e| format!("invalid value for {}: {}", name, e))?;
    Ok((name.trim().to_string(), value))
}
