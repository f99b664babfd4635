//! Actuator command types.
//!
//! This module defines the data structures exchanged between the interlock
//! and the actuator backends:
//! - `MotorId` - One of the four directional motors
//! - `Direction` - Motor drive direction (forward / reverse / off)
//! - `CameraAction` - Momentary camera operation
//! - `ActuatorCommand` - Tagged actuator instruction

use crate::consts::MOTOR_COUNT;
use serde::{Deserialize, Serialize};
use static_assertions::const_assert_eq;
use std::fmt;

/// Identifies one of the four directional motors.
///
/// Motors 0/1 provide translation (drive and turn), motors 2/3 provide
/// vertical thrust and pitch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MotorId {
    /// Motor 0, left drive.
    Left,
    /// Motor 1, right drive.
    Right,
    /// Motor 2, top front thruster.
    TopFront,
    /// Motor 3, top rear thruster.
    TopRear,
}

impl MotorId {
    /// All motors in index order.
    pub const ALL: [MotorId; MOTOR_COUNT] = [
        MotorId::Left,
        MotorId::Right,
        MotorId::TopFront,
        MotorId::TopRear,
    ];

    /// Zero-based motor index.
    #[inline]
    pub const fn index(self) -> usize {
        match self {
            MotorId::Left => 0,
            MotorId::Right => 1,
            MotorId::TopFront => 2,
            MotorId::TopRear => 3,
        }
    }

    /// Motor for a zero-based index.
    pub const fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(MotorId::Left),
            1 => Some(MotorId::Right),
            2 => Some(MotorId::TopFront),
            3 => Some(MotorId::TopRear),
            _ => None,
        }
    }

    /// Human-readable name.
    pub const fn name(self) -> &'static str {
        match self {
            MotorId::Left => "left",
            MotorId::Right => "right",
            MotorId::TopFront => "top_front",
            MotorId::TopRear => "top_rear",
        }
    }
}

const_assert_eq!(MotorId::ALL.len(), MOTOR_COUNT);

/// Motor drive direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    /// Both H-bridge inputs low.
    #[default]
    Off,
    /// Spin forward.
    Forward,
    /// Spin reverse.
    Reverse,
}

/// Momentary camera operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CameraAction {
    /// Release the shutter.
    Shutter,
    /// Step the zoom in.
    ZoomIn,
    /// Step the zoom out.
    ZoomOut,
}

impl CameraAction {
    /// CHDK Lua snippet performing this action on the camera.
    pub const fn script(self) -> &'static str {
        match self {
            CameraAction::Shutter => "shoot()",
            CameraAction::ZoomIn => "click('zoom_in')",
            CameraAction::ZoomOut => "click('zoom_out')",
        }
    }
}

/// One step of the camera initialization sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CameraInitStep {
    /// CHDK Lua snippet to execute.
    pub script: &'static str,
    /// Whether to wait the mode-switch delay (true) or the configured
    /// property settle delay (false) afterwards.
    pub mode_switch: bool,
}

/// Camera initialization: USB control mode, manual flash, flash off.
pub const CAMERA_INIT_SEQUENCE: [CameraInitStep; 3] = [
    CameraInitStep {
        script: "switch_mode_usb(1)",
        mode_switch: true,
    },
    // Property 121: flash adjust mode (1 = manual).
    CameraInitStep {
        script: "set_prop(121, 1)",
        mode_switch: false,
    },
    // Property 143: flash mode (2 = off).
    CameraInitStep {
        script: "set_prop(143, 2)",
        mode_switch: false,
    },
];

/// A single actuator instruction emitted by the interlock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActuatorCommand {
    /// Drive a motor in a direction (or stop it).
    Motor {
        /// Target motor.
        motor: MotorId,
        /// Requested direction.
        direction: Direction,
    },
    /// Trigger a camera action.
    Camera(CameraAction),
}

impl ActuatorCommand {
    /// Shorthand for a motor command.
    #[inline]
    pub const fn motor(motor: MotorId, direction: Direction) -> Self {
        ActuatorCommand::Motor { motor, direction }
    }

    /// Shorthand for a camera command.
    #[inline]
    pub const fn camera(action: CameraAction) -> Self {
        ActuatorCommand::Camera(action)
    }
}

impl fmt::Display for ActuatorCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActuatorCommand::Motor { motor, direction } => {
                let call = match direction {
                    Direction::Forward => "drive_forward",
                    Direction::Reverse => "drive_reverse",
                    Direction::Off => "stop",
                };
                write!(f, "motor{}.{}()", motor.index(), call)
            }
            ActuatorCommand::Camera(action) => {
                let call = match action {
                    CameraAction::Shutter => "shoot",
                    CameraAction::ZoomIn => "zoom_in",
                    CameraAction::ZoomOut => "zoom_out",
                };
                write!(f, "camera.{}()", call)
            }
        }
    }
}
