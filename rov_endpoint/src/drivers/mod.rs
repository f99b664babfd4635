//! Actuator backend implementations.
//!
//! - [`simulation`] - Software motors and camera recording every call
//! - [`command`] - Camera driven through an external CHDK PTP client
//! - `gpio` - Raspberry Pi H-bridge motors (`rpi` feature, Linux only)
//!
//! # Adding New Backends
//!
//! 1. Create a new submodule under `drivers/`
//! 2. Implement `Motor` or `Camera` from `rov_common::actuator::driver`
//! 3. Register the factory in `builtin_motor_registry()` or
//!    `builtin_camera_registry()`

pub mod command;
#[cfg(all(feature = "rpi", target_os = "linux"))]
pub mod gpio;
pub mod simulation;

use crate::driver_registry::DriverRegistry;
use rov_common::actuator::config::SIMULATION_BACKEND;
use rov_common::actuator::driver::{CameraFactory, MotorFactory};

/// Backend name of the external-command camera.
pub const COMMAND_BACKEND: &str = "command";

/// Backend name of the GPIO motors.
pub const GPIO_BACKEND: &str = "gpio";

/// Registry holding every built-in motor backend.
pub fn builtin_motor_registry() -> DriverRegistry<MotorFactory> {
    let mut registry: DriverRegistry<MotorFactory> = DriverRegistry::new();
    registry.register(SIMULATION_BACKEND, simulation::create_motor);

    #[cfg(all(feature = "rpi", target_os = "linux"))]
    registry.register(GPIO_BACKEND, gpio::create_motor);

    registry
}

/// Registry holding every built-in camera backend.
pub fn builtin_camera_registry() -> DriverRegistry<CameraFactory> {
    let mut registry: DriverRegistry<CameraFactory> = DriverRegistry::new();
    registry.register(SIMULATION_BACKEND, simulation::create_camera);
    registry.register(COMMAND_BACKEND, command::create_camera);
    registry
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_registries_contain_simulation() {
        assert!(builtin_motor_registry().get_factory(SIMULATION_BACKEND).is_some());
        assert_eq!(
            builtin_camera_registry().list_drivers(),
            vec![COMMAND_BACKEND, SIMULATION_BACKEND]
        );
    }

    #[cfg(not(feature = "rpi"))]
    #[test]
    fn gpio_backend_absent_without_feature() {
        assert!(builtin_motor_registry().get_factory(GPIO_BACKEND).is_none());
    }
}
