//! Prelude module for common re-exports.
//!
//! ```rust
//! use rov_common::prelude::*;
//! ```

// ─── Configuration ──────────────────────────────────────────────────
pub use crate::config::{ConfigError, ConfigLoader, LogLevel, SharedConfig};

// ─── Actuators ──────────────────────────────────────────────────────
pub use crate::actuator::config::{CameraConfig, MotorConfig, SIMULATION_BACKEND};
pub use crate::actuator::driver::{ActuatorError, Camera, CameraFactory, Motor, MotorFactory};
pub use crate::actuator::types::{ActuatorCommand, CameraAction, Direction, MotorId};

// ─── System Constants ───────────────────────────────────────────────
pub use crate::consts::{FRAME_DELIMITER, FRAME_FIELDS, MOTOR_COUNT};
