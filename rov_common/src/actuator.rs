//! Actuator interface, command types and backend configuration.
//!
//! This module contains the capability traits the endpoint drives
//! (motors and camera) and the data types that describe actuator calls.

pub mod config;
pub mod driver;
pub mod types;
