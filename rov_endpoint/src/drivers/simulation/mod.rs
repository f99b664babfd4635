//! Simulation backends.
//!
//! Software motors and camera for development and testing without the rig.
//! Every successful call is appended to a [`SimulationLog`]; instances built
//! with the same log record into one ordered trace.

mod camera;
mod log;
mod motor;

pub use camera::SimulationCamera;
pub use log::SimulationLog;
pub use motor::SimulationMotor;

use rov_common::actuator::config::{CameraConfig, MotorConfig};
use rov_common::actuator::driver::{ActuatorError, Camera, Motor};
use rov_common::actuator::types::MotorId;

/// Factory function to create a simulated motor.
pub fn create_motor(_config: &MotorConfig, id: MotorId) -> Result<Box<dyn Motor>, ActuatorError> {
    Ok(Box::new(SimulationMotor::new(id)))
}

/// Factory function to create a simulated camera.
pub fn create_camera(_config: &CameraConfig) -> Result<Box<dyn Camera>, ActuatorError> {
    Ok(Box::new(SimulationCamera::new()))
}
