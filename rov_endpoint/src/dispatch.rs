//! Actuator dispatch.
//!
//! [`Actuators`] owns the four motors and the camera. [`dispatch`] issues the
//! calls of a [`Plan`] in order and commits each field's transition into the
//! held [`AxisState`] only if all of that field's calls succeeded.
//!
//! A field whose calls fail part-way is not committed even though an earlier
//! call of the same field may already have switched its motor. Because the
//! held state is unchanged, the next frame repeating the request retries it.

use crate::driver_registry::DriverRegistry;
use crate::frame::FrameField;
use crate::interlock::Plan;
use crate::state::AxisState;
use rov_common::actuator::config::{CameraConfig, MotorConfig};
use rov_common::actuator::driver::{ActuatorError, Camera, CameraFactory, Motor, MotorFactory};
use rov_common::actuator::types::{ActuatorCommand, MotorId};
use rov_common::consts::{FRAME_FIELDS, MOTOR_COUNT};
use tracing::{debug, info, warn};

/// The rig's actuators.
pub struct Actuators {
    motors: [Box<dyn Motor>; MOTOR_COUNT],
    camera: Box<dyn Camera>,
}

impl Actuators {
    /// Assemble from backend instances, motors in `MotorId::index()` order.
    pub fn new(motors: [Box<dyn Motor>; MOTOR_COUNT], camera: Box<dyn Camera>) -> Self {
        Self { motors, camera }
    }

    /// Create backends by name from the registries.
    ///
    /// # Errors
    /// `ActuatorError::BackendNotFound` for unknown backend names, or the
    /// factory's own error.
    pub fn from_config(
        motor_config: &MotorConfig,
        camera_config: &CameraConfig,
        motor_registry: &DriverRegistry<MotorFactory>,
        camera_registry: &DriverRegistry<CameraFactory>,
    ) -> Result<Self, ActuatorError> {
        let motor_factory = motor_registry.get_factory(&motor_config.backend).ok_or_else(|| {
            ActuatorError::BackendNotFound(format!(
                "motor backend '{}' (available: {:?})",
                motor_config.backend,
                motor_registry.list_drivers()
            ))
        })?;
        let camera_factory =
            camera_registry.get_factory(&camera_config.backend).ok_or_else(|| {
                ActuatorError::BackendNotFound(format!(
                    "camera backend '{}' (available: {:?})",
                    camera_config.backend,
                    camera_registry.list_drivers()
                ))
            })?;

        let motors = [
            motor_factory(motor_config, MotorId::Left)?,
            motor_factory(motor_config, MotorId::Right)?,
            motor_factory(motor_config, MotorId::TopFront)?,
            motor_factory(motor_config, MotorId::TopRear)?,
        ];
        let camera = camera_factory(camera_config)?;

        info!(
            "Created actuators: motors='{}', camera='{}'",
            motor_config.backend,
            camera.backend()
        );
        Ok(Self::new(motors, camera))
    }

    /// Set up every motor, stop it, and prepare the camera.
    ///
    /// Called once before the server accepts connections.
    pub fn setup(&mut self) -> Result<(), ActuatorError> {
        for (idx, motor) in self.motors.iter_mut().enumerate() {
            motor.setup()?;
            motor.stop()?;
            debug!("Motor {} ({}) ready and stopped", idx, motor.backend());
        }
        info!("Motors are ready");

        self.camera.prepare()?;
        info!("Camera is ready ({})", self.camera.backend());
        Ok(())
    }

    /// Issue one actuator call.
    pub fn execute(&mut self, command: ActuatorCommand) -> Result<(), ActuatorError> {
        match command {
            ActuatorCommand::Motor { motor, direction } => {
                self.motors[motor.index()].drive(direction)
            }
            ActuatorCommand::Camera(action) => self.camera.perform(action),
        }
    }

    /// Stop every motor, attempting all of them even if one fails.
    ///
    /// Returns the first failure.
    pub fn stop_all(&mut self) -> Result<(), ActuatorError> {
        let mut first_error = None;
        for (idx, motor) in self.motors.iter_mut().enumerate() {
            if let Err(e) = motor.stop() {
                warn!("Failed to stop motor {}: {}", idx, e);
                first_error.get_or_insert(e);
            }
        }
        first_error.map_or(Ok(()), Err)
    }

    /// Stop all motors and release the camera.
    pub fn shutdown(&mut self) -> Result<(), ActuatorError> {
        let stopped = self.stop_all();
        let closed = self.camera.close();
        stopped.and(closed)
    }
}

/// A field whose transition was not committed because a call failed.
#[derive(Debug, Clone)]
pub struct FieldFault {
    /// Field whose transition was dropped.
    pub field: FrameField,
    /// Call that failed.
    pub command: ActuatorCommand,
    /// Backend error.
    pub error: ActuatorError,
}

/// Outcome of dispatching one plan.
#[derive(Debug, Clone, Default)]
pub struct DispatchReport {
    /// Fields whose transitions were committed, in order.
    pub committed: heapless::Vec<FrameField, FRAME_FIELDS>,
    /// Calls that completed successfully, in order.
    pub issued: Vec<ActuatorCommand>,
    /// Fields dropped because of an actuator failure.
    pub faults: Vec<FieldFault>,
}

impl DispatchReport {
    /// True if every transition of the plan was committed.
    #[inline]
    pub fn is_clean(&self) -> bool {
        self.faults.is_empty()
    }
}

/// Issue the plan's calls and commit each successful transition.
pub fn dispatch(plan: &Plan, state: &mut AxisState, actuators: &mut Actuators) -> DispatchReport {
    let mut report = DispatchReport::default();

    'transitions: for transition in plan.transitions() {
        for command in transition.calls.iter() {
            if let Err(error) = actuators.execute(*command) {
                warn!(
                    "{} failed for field '{}': {}; transition not committed",
                    command, transition.field, error
                );
                report.faults.push(FieldFault {
                    field: transition.field,
                    command: *command,
                    error,
                });
                continue 'transitions;
            }
            report.issued.push(*command);
        }

        *state = transition.apply(*state);
        // Capacity is one slot per field.
        let _ = report.committed.push(transition.field);
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame::parse_frame;
    use crate::interlock::plan;
    use rov_common::actuator::types::{CameraAction, Direction};

    struct FlakyMotor {
        fail_reverse: bool,
    }

    impl Motor for FlakyMotor {
        fn backend(&self) -> &'static str {
            "flaky"
        }
        fn setup(&mut self) -> Result<(), ActuatorError> {
            Ok(())
        }
        fn drive_forward(&mut self) -> Result<(), ActuatorError> {
            Ok(())
        }
        fn drive_reverse(&mut self) -> Result<(), ActuatorError> {
            if self.fail_reverse {
                Err(ActuatorError::CommunicationError("pin stuck".to_string()))
            } else {
                Ok(())
            }
        }
        fn stop(&mut self) -> Result<(), ActuatorError> {
            Ok(())
        }
    }

    struct NullCamera;

    impl Camera for NullCamera {
        fn backend(&self) -> &'static str {
            "null"
        }
        fn shoot(&mut self) -> Result<(), ActuatorError> {
            Ok(())
        }
        fn zoom_in(&mut self) -> Result<(), ActuatorError> {
            Ok(())
        }
        fn zoom_out(&mut self) -> Result<(), ActuatorError> {
            Ok(())
        }
    }

    fn actuators(fail_right_reverse: bool) -> Actuators {
        Actuators::new(
            [
                Box::new(FlakyMotor { fail_reverse: false }),
                Box::new(FlakyMotor {
                    fail_reverse: fail_right_reverse,
                }),
                Box::new(FlakyMotor { fail_reverse: false }),
                Box::new(FlakyMotor { fail_reverse: false }),
            ],
            Box::new(NullCamera),
        )
    }

    #[test]
    fn test_dispatch_commits_all_on_success() {
        let mut acts = actuators(false);
        let mut state = AxisState::default();
        let frame = parse_frame(b"1||0||0||0||0||0||0||1").unwrap();
        let report = dispatch(&plan(state, &frame), &mut state, &mut acts);

        assert!(report.is_clean());
        assert_eq!(state, AxisState::BACKWARD | AxisState::SHOOTING);
        assert_eq!(
            report.committed.as_slice(),
            &[FrameField::Longitudinal, FrameField::Shutter]
        );
        assert_eq!(report.issued.len(), 3);
    }

    #[test]
    fn test_failed_field_is_not_committed_and_others_are() {
        let mut acts = actuators(true);
        let mut state = AxisState::default();
        let frame = parse_frame(b"1||0||0||0||0||0||0||1").unwrap();
        let report = dispatch(&plan(state, &frame), &mut state, &mut acts);

        assert_eq!(report.faults.len(), 1);
        assert_eq!(report.faults[0].field, FrameField::Longitudinal);
        assert_eq!(
            report.faults[0].command,
            ActuatorCommand::motor(MotorId::Right, Direction::Reverse)
        );
        // Shutter still went through.
        assert_eq!(state, AxisState::SHOOTING);
        assert_eq!(
            report.issued,
            vec![
                ActuatorCommand::motor(MotorId::Left, Direction::Reverse),
                ActuatorCommand::camera(CameraAction::Shutter),
            ]
        );
    }

    #[test]
    fn test_uncommitted_field_is_retried_by_next_frame() {
        let mut acts = actuators(true);
        let mut state = AxisState::default();
        let frame = parse_frame(b"1||0||0||0||0||0||0||0").unwrap();
        dispatch(&plan(state, &frame), &mut state, &mut acts);
        assert!(state.is_empty());

        let mut acts = actuators(false);
        let report = dispatch(&plan(state, &frame), &mut state, &mut acts);
        assert!(report.is_clean());
        assert_eq!(state, AxisState::BACKWARD);
    }

    #[test]
    fn test_stop_all_and_shutdown() {
        let mut acts = actuators(false);
        assert!(acts.setup().is_ok());
        assert!(acts.stop_all().is_ok());
        assert!(acts.shutdown().is_ok());
    }
}
