//! Driver registry for actuator backends.
//!
//! Provides a `DriverRegistry` struct for registering and retrieving backend
//! factories by name. One registry holds motor factories, another camera
//! factories. This uses constructor-injection rather than global state.

use std::collections::HashMap;

/// Registry of available backends of one kind.
///
/// Constructed at startup, populated via `register()`, and handed to
/// `Actuators::from_config`. Testable in isolation.
pub struct DriverRegistry<F: Copy> {
    factories: HashMap<&'static str, F>,
}

impl<F: Copy> DriverRegistry<F> {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            factories: HashMap::new(),
        }
    }

    /// Register a backend factory.
    ///
    /// # Panics
    /// Panics if a backend with the same name is already registered.
    pub fn register(&mut self, name: &'static str, factory: F) {
        if self.factories.contains_key(name) {
            panic!("Driver '{name}' is already registered");
        }
        self.factories.insert(name, factory);
    }

    /// Get a backend factory by name.
    pub fn get_factory(&self, name: &str) -> Option<F> {
        self.factories.get(name).copied()
    }

    /// List all registered backend names, sorted.
    pub fn list_drivers(&self) -> Vec<&'static str> {
        let mut names: Vec<&'static str> = self.factories.keys().copied().collect();
        names.sort_unstable();
        names
    }
}

impl<F: Copy> Default for DriverRegistry<F> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rov_common::actuator::config::MotorConfig;
    use rov_common::actuator::driver::{ActuatorError, Motor, MotorFactory};
    use rov_common::actuator::types::MotorId;

    struct TestMotor;

    impl Motor for TestMotor {
        fn backend(&self) -> &'static str {
            "test"
        }
        fn setup(&mut self) -> Result<(), ActuatorError> {
            Ok(())
        }
        fn drive_forward(&mut self) -> Result<(), ActuatorError> {
            Ok(())
        }
        fn drive_reverse(&mut self) -> Result<(), ActuatorError> {
            Ok(())
        }
        fn stop(&mut self) -> Result<(), ActuatorError> {
            Ok(())
        }
    }

    fn create_test_motor(
        _config: &MotorConfig,
        _id: MotorId,
    ) -> Result<Box<dyn Motor>, ActuatorError> {
        Ok(Box::new(TestMotor))
    }

    #[test]
    fn registry_register_and_create() {
        let mut reg: DriverRegistry<MotorFactory> = DriverRegistry::new();
        reg.register("test_driver", create_test_motor);

        let factory = reg.get_factory("test_driver").expect("should exist");
        let motor = factory(&MotorConfig::default(), MotorId::Left).expect("should create");
        assert_eq!(motor.backend(), "test");
    }

    #[test]
    fn registry_driver_not_found() {
        let reg: DriverRegistry<MotorFactory> = DriverRegistry::new();
        assert!(reg.get_factory("nonexistent").is_none());
    }

    #[test]
    fn registry_list_drivers() {
        let mut reg: DriverRegistry<MotorFactory> = DriverRegistry::new();
        reg.register("beta", create_test_motor);
        reg.register("alpha", create_test_motor);
        assert_eq!(reg.list_drivers(), vec!["alpha", "beta"]);
    }

    #[test]
    #[should_panic(expected = "already registered")]
    fn registry_duplicate_panics() {
        let mut reg: DriverRegistry<MotorFactory> = DriverRegistry::new();
        reg.register("dup", create_test_motor);
        reg.register("dup", create_test_motor);
    }
}
