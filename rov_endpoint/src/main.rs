//! # ROV Endpoint Binary
//!
//! On-board control endpoint: accepts command frames over TCP and drives the
//! motors and camera through the interlock.
//!
//! # Usage
//!
//! ```bash
//! # Simulation backends, default port
//! rov_endpoint --simulate
//!
//! # Rig configuration
//! rov_endpoint --config /etc/rov/endpoint.toml
//!
//! # Verbose JSON logs on another port
//! rov_endpoint -s -v --json --port 50001
//! ```

use clap::Parser;
use rov_common::actuator::config::SIMULATION_BACKEND;
use rov_common::config::LogLevel;
use rov_endpoint::config::EndpointConfig;
use rov_endpoint::dispatch::Actuators;
use rov_endpoint::drivers::{builtin_camera_registry, builtin_motor_registry};
use rov_endpoint::error::EndpointError;
use rov_endpoint::server::ControlServer;
use std::path::PathBuf;
use std::sync::atomic::Ordering;
use tracing::{Level, error, info, warn};
use tracing_subscriber::EnvFilter;

/// ROV Endpoint - remote-control receiver for motors and camera
#[derive(Parser, Debug)]
#[command(name = "rov_endpoint")]
#[command(author = "RTS007")]
#[command(version)]
#[command(about = "ROV control endpoint: command frames in, motor and camera calls out")]
#[command(long_about = None)]
struct Args {
    /// Path to endpoint configuration file (endpoint.toml).
    /// Built-in defaults are used when omitted.
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Override the listen port
    #[arg(short, long)]
    port: Option<u16>,

    /// Force simulation backends for motors and camera
    #[arg(short = 's', long)]
    simulate: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Output logs in JSON format
    #[arg(long)]
    json: bool,
}

fn main() {
    let args = Args::parse();

    // Logging is configured from the file, so load it first.
    let config = match EndpointConfig::load_or_default(args.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            setup_tracing(&args, LogLevel::default());
            error!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };
    setup_tracing(&args, config.shared.log_level);

    if let Err(e) = run(args, config) {
        error!("Endpoint failed: {}", e);
        std::process::exit(1);
    }
}

fn run(args: Args, mut config: EndpointConfig) -> Result<(), EndpointError> {
    info!(
        "{} v{} starting...",
        config.shared.service_name,
        env!("CARGO_PKG_VERSION")
    );

    if args.simulate {
        info!("Simulation mode enabled");
        config.motors.backend = SIMULATION_BACKEND.to_string();
        config.camera.backend = SIMULATION_BACKEND.to_string();
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }

    let mut actuators = Actuators::from_config(
        &config.motors,
        &config.camera,
        &builtin_motor_registry(),
        &builtin_camera_registry(),
    )?;
    if let Err(e) = actuators.setup() {
        // Leave nothing spinning on a half-initialized rig.
        if let Err(stop_err) = actuators.stop_all() {
            warn!("Failed to stop motors after setup error: {}", stop_err);
        }
        return Err(e.into());
    }

    let mut server = ControlServer::bind(config.server.clone(), actuators)?;

    let running = server.running_flag();
    ctrlc::set_handler(move || {
        info!("Received shutdown signal");
        running.store(false, Ordering::SeqCst);
    })?;

    let result = server.run();
    if let Err(ref e) = result {
        error!("Accept loop error: {}", e);
    }

    server.shutdown()?;
    let state = result?;
    let stats = server.stats();
    info!(
        "Shutdown complete (final state {}, {} frames applied, {} rejected)",
        state, stats.applied, stats.rejected
    );
    Ok(())
}

/// Setup tracing subscriber from configuration and CLI arguments.
fn setup_tracing(args: &Args, level: LogLevel) {
    let level = if args.verbose {
        Level::DEBUG
    } else {
        match level {
            LogLevel::Trace => Level::TRACE,
            LogLevel::Debug => Level::DEBUG,
            LogLevel::Info => Level::INFO,
            LogLevel::Warn => Level::WARN,
            LogLevel::Error => Level::ERROR,
        }
    };

    let filter = EnvFilter::from_default_env().add_directive(level.into());

    if args.json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}
