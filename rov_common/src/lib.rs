//! ROV Common Library
//!
//! This crate provides the actuator interface, the actuator command types and
//! the configuration loading utilities shared by all ROV workspace crates.
//!
//! # Module Structure
//!
//! - [`actuator`] - Motor/camera traits, actuator commands and backend configuration
//! - [`config`] - Configuration loading traits and types
//! - [`consts`] - Workspace-wide defaults and limits
//! - [`prelude`] - Common re-exports for convenience
//!
//! # Usage
//!
//! ```rust
//! use rov_common::prelude::*;
//!
//! let cmd = ActuatorCommand::motor(MotorId::Left, Direction::Reverse);
//! assert_eq!(cmd.to_string(), "motor0.drive_reverse()");
//! ```

pub mod actuator;
pub mod config;
pub mod consts;
pub mod prelude;
