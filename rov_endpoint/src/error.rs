//! Endpoint error type.

use crate::frame::FrameError;
use rov_common::actuator::driver::ActuatorError;
use rov_common::config::ConfigError;
use thiserror::Error;

/// Errors that stop the endpoint (startup, accept loop or shutdown).
///
/// Per-frame problems are not fatal: a rejected frame is a [`FrameError`]
/// and a failed actuator call is reported in the dispatch report. They only
/// appear here when surfaced by a caller that wants to propagate them.
#[derive(Debug, Error)]
pub enum EndpointError {
    /// Socket setup or accept failure.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration could not be loaded or is invalid.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Actuator backend failure.
    #[error("Actuator error: {0}")]
    Actuator(#[from] ActuatorError),

    /// Malformed or out-of-domain frame.
    #[error("Frame error: {0}")]
    Frame(#[from] FrameError),

    /// Signal handler could not be installed.
    #[error("Signal handler error: {0}")]
    Signal(#[from] ctrlc::Error),
}
