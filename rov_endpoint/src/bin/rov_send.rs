//! # ROV Frame Sender
//!
//! Sends one command frame to a running endpoint.
//!
//! # Usage
//!
//! ```bash
//! # Drive backward while shooting
//! rov_send 1 0 0 0 0 0 0 1
//!
//! # Forward (negative values are accepted as-is)
//! rov_send --addr 192.168.0.20:50000 -- -1 0 0 0 0 0 0 0
//!
//! # Unchecked payload
//! rov_send --raw "0||0||0"
//! ```

use clap::Parser;
use rov_common::consts::{DEFAULT_PORT, FRAME_DELIMITER, FRAME_FIELDS};
use rov_endpoint::client::{send_frame, send_raw};
use rov_endpoint::frame::parse_frame;
use tracing::{Level, error, info};
use tracing_subscriber::EnvFilter;

/// ROV Send - transmit one command frame
#[derive(Parser, Debug)]
#[command(name = "rov_send")]
#[command(author = "RTS007")]
#[command(version)]
#[command(about = "Send one command frame to the ROV endpoint")]
struct Args {
    /// Endpoint address
    #[arg(short, long, default_value_t = format!("127.0.0.1:{DEFAULT_PORT}"))]
    addr: String,

    /// Send this payload verbatim, without validation
    #[arg(long, conflicts_with = "values")]
    raw: Option<String>,

    /// Eight field values: longitudinal lateral pitch zoom_out zoom_in descend ascend shutter
    #[arg(allow_negative_numbers = true, num_args = FRAME_FIELDS, required_unless_present = "raw")]
    values: Vec<f64>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let args = Args::parse();

    let level = if args.verbose { Level::DEBUG } else { Level::INFO };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(level.into()))
        .init();

    let result = match &args.raw {
        Some(raw) => send_raw(&args.addr, raw.as_bytes()).map(|_| raw.clone()),
        None => {
            let text = args
                .values
                .iter()
                .map(|v| v.to_string())
                .collect::<Vec<_>>()
                .join(FRAME_DELIMITER);
            match parse_frame(text.as_bytes()) {
                Ok(frame) => send_frame(&args.addr, &frame).map(|_| frame.to_wire()),
                Err(e) => {
                    error!("Refusing to send: {}", e);
                    std::process::exit(2);
                }
            }
        }
    };

    match result {
        Ok(sent) => info!("Sent '{}' to {}", sent, args.addr),
        Err(e) => {
            error!("Failed to send to {}: {}", args.addr, e);
            std::process::exit(1);
        }
    }
}
