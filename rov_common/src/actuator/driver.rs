//! Actuator traits and error types.
//!
//! This module defines:
//! - `Motor` trait - Interface for one directional motor (H-bridge pin pair)
//! - `Camera` trait - Interface for the on-board camera
//! - `ActuatorError` enum - Error types for actuator operations
//! - `MotorFactory` / `CameraFactory` type aliases - Backend factory functions

use crate::actuator::config::{CameraConfig, MotorConfig};
use crate::actuator::types::{CameraAction, Direction, MotorId};
use thiserror::Error;

/// Error types for actuator operations.
#[derive(Debug, Clone, Error)]
pub enum ActuatorError {
    /// Backend initialization failed
    #[error("Initialization failed: {0}")]
    InitFailed(String),

    /// Hardware communication error
    #[error("Hardware communication error: {0}")]
    CommunicationError(String),

    /// Camera transport reported a failure
    #[error("Camera transport error: {0}")]
    TransportError(String),

    /// Backend not found
    #[error("Backend not found: {0}")]
    BackendNotFound(String),
}

/// Factory function type for creating a motor backend instance.
pub type MotorFactory = fn(&MotorConfig, MotorId) -> Result<Box<dyn Motor>, ActuatorError>;

/// Factory function type for creating a camera backend instance.
pub type CameraFactory = fn(&CameraConfig) -> Result<Box<dyn Camera>, ActuatorError>;

/// One directional motor.
///
/// # Lifecycle
///
/// 1. `setup()` - Called once before the server starts accepting
/// 2. `drive_forward()` / `drive_reverse()` / `stop()` - Called on state transitions
///
/// All calls are synchronous; a returned error means the motor may not be
/// in the requested state.
pub trait Motor: Send {
    /// Returns the backend identifier (e.g., "simulation", "gpio").
    fn backend(&self) -> &'static str;

    /// Prepare the motor outputs.
    fn setup(&mut self) -> Result<(), ActuatorError>;

    /// Spin forward.
    fn drive_forward(&mut self) -> Result<(), ActuatorError>;

    /// Spin in reverse.
    fn drive_reverse(&mut self) -> Result<(), ActuatorError>;

    /// Stop spinning.
    fn stop(&mut self) -> Result<(), ActuatorError>;

    /// Drive in the given direction.
    fn drive(&mut self, direction: Direction) -> Result<(), ActuatorError> {
        match direction {
            Direction::Forward => self.drive_forward(),
            Direction::Reverse => self.drive_reverse(),
            Direction::Off => self.stop(),
        }
    }
}

/// The on-board camera.
pub trait Camera: Send {
    /// Returns the backend identifier (e.g., "simulation", "command").
    fn backend(&self) -> &'static str;

    /// One-time initialization before the server starts accepting.
    ///
    /// Default implementation does nothing.
    fn prepare(&mut self) -> Result<(), ActuatorError> {
        Ok(())
    }

    /// Release the shutter.
    fn shoot(&mut self) -> Result<(), ActuatorError>;

    /// Step the zoom in.
    fn zoom_in(&mut self) -> Result<(), ActuatorError>;

    /// Step the zoom out.
    fn zoom_out(&mut self) -> Result<(), ActuatorError>;

    /// Release the camera. Default: no-op.
    fn close(&mut self) -> Result<(), ActuatorError> {
        Ok(())
    }

    /// Perform a camera action.
    fn perform(&mut self, action: CameraAction) -> Result<(), ActuatorError> {
        match action {
            CameraAction::Shutter => self.shoot(),
            CameraAction::ZoomIn => self.zoom_in(),
            CameraAction::ZoomOut => self.zoom_out(),
        }
    }
}
