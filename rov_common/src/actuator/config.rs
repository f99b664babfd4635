//! Actuator backend configuration.
//!
//! - `MotorConfig` - `[motors]` section: backend name and H-bridge pin pairs
//! - `CameraConfig` - `[camera]` section: backend name and transport settings

use crate::actuator::types::MotorId;
use crate::config::ConfigError;
use crate::consts::{
    CAMERA_MODE_SWITCH_SETTLE_MS, DEFAULT_CAMERA_PROGRAM, DEFAULT_CAMERA_SETTLE_MS,
    DEFAULT_MOTOR_PINS, MOTOR_COUNT,
};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Name of the built-in simulation backend (motors and camera).
pub const SIMULATION_BACKEND: &str = "simulation";

fn default_backend() -> String {
    SIMULATION_BACKEND.to_string()
}

fn default_pins() -> [[u8; 2]; MOTOR_COUNT] {
    DEFAULT_MOTOR_PINS
}

fn default_program() -> String {
    DEFAULT_CAMERA_PROGRAM.to_string()
}

fn default_settle_ms() -> u64 {
    DEFAULT_CAMERA_SETTLE_MS
}

fn default_mode_switch_settle_ms() -> u64 {
    CAMERA_MODE_SWITCH_SETTLE_MS
}

/// `[motors]` configuration section.
///
/// # TOML Example
///
/// ```toml
/// [motors]
/// backend = "gpio"
/// pins = [[18, 23], [24, 25], [8, 7], [17, 27]]
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MotorConfig {
    /// Motor backend name.
    #[serde(default = "default_backend")]
    pub backend: String,

    /// BCM pin pair (pin0, pin1) per motor, indexed by `MotorId::index()`.
    #[serde(default = "default_pins")]
    pub pins: [[u8; 2]; MOTOR_COUNT],
}

impl Default for MotorConfig {
    fn default() -> Self {
        Self {
            backend: default_backend(),
            pins: default_pins(),
        }
    }
}

impl MotorConfig {
    /// Pin pair for one motor.
    #[inline]
    pub fn pins_for(&self, motor: MotorId) -> [u8; 2] {
        self.pins[motor.index()]
    }

    /// Validate the motor configuration.
    ///
    /// # Validation Rules
    /// 1. `backend` not empty
    /// 2. No pin used twice across all motors
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.backend.is_empty() {
            return Err(ConfigError::ValidationError(
                "motors.backend cannot be empty".to_string(),
            ));
        }

        let mut seen = HashSet::new();
        for (idx, pair) in self.pins.iter().enumerate() {
            for pin in pair {
                if !seen.insert(*pin) {
                    return Err(ConfigError::ValidationError(format!(
                        "Duplicate motor pin {} (motor {})",
                        pin, idx
                    )));
                }
            }
        }
        Ok(())
    }
}

/// `[camera]` configuration section.
///
/// # TOML Example
///
/// ```toml
/// [camera]
/// backend = "command"
/// program = "chdkptp"
/// args = ["-c", "-e"]
/// init_settle_ms = 500
/// mode_switch_settle_ms = 1000
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CameraConfig {
    /// Camera backend name.
    #[serde(default = "default_backend")]
    pub backend: String,

    /// External program executing camera scripts (command backend).
    #[serde(default = "default_program")]
    pub program: String,

    /// Arguments placed before the script argument (command backend).
    #[serde(default)]
    pub args: Vec<String>,

    /// Settle delay after each flash property change, in milliseconds.
    #[serde(default = "default_settle_ms")]
    pub init_settle_ms: u64,

    /// Settle delay after switching into USB control mode, in milliseconds.
    #[serde(default = "default_mode_switch_settle_ms")]
    pub mode_switch_settle_ms: u64,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            backend: default_backend(),
            program: default_program(),
            args: Vec::new(),
            init_settle_ms: default_settle_ms(),
            mode_switch_settle_ms: default_mode_switch_settle_ms(),
        }
    }
}

impl CameraConfig {
    /// Validate the camera configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.backend.is_empty() {
            return Err(ConfigError::ValidationError(
                "camera.backend cannot be empty".to_string(),
            ));
        }
        if self.backend != SIMULATION_BACKEND && self.program.trim().is_empty() {
            return Err(ConfigError::ValidationError(format!(
                "camera.program required for backend '{}'",
                self.backend
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_motor_config_defaults() {
        let config: MotorConfig = toml::from_str("").unwrap();
        assert_eq!(config.backend, SIMULATION_BACKEND);
        assert_eq!(config.pins_for(MotorId::TopFront), [8, 7]);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_motor_config_duplicate_pin() {
        let config: MotorConfig = toml::from_str(
            r#"
backend = "gpio"
pins = [[18, 23], [24, 25], [8, 7], [17, 18]]
"#,
        )
        .unwrap();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("Duplicate motor pin 18"));
    }

    #[test]
    fn test_motor_config_wrong_pin_count_rejected_by_parser() {
        let result = toml::from_str::<MotorConfig>("pins = [[18, 23], [24, 25]]");
        assert!(result.is_err());
    }

    #[test]
    fn test_camera_config_requires_program() {
        let config = CameraConfig {
            backend: "command".to_string(),
            program: " ".to_string(),
            ..CameraConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::ValidationError(_))
        ));

        // Simulation ignores the program.
        let config = CameraConfig {
            program: String::new(),
            ..CameraConfig::default()
        };
        assert!(config.validate().is_ok());
    }
}
