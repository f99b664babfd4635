//! Simulated motor.

use super::log::SimulationLog;
use rov_common::actuator::driver::{ActuatorError, Motor};
use rov_common::actuator::types::{ActuatorCommand, Direction, MotorId};
use tracing::debug;

/// Motor that only tracks its direction.
#[derive(Debug)]
pub struct SimulationMotor {
    id: MotorId,
    direction: Direction,
    log: SimulationLog,
}

impl SimulationMotor {
    /// Create a motor with a private trace.
    pub fn new(id: MotorId) -> Self {
        Self::with_log(id, SimulationLog::new())
    }

    /// Create a motor recording into `log`.
    pub fn with_log(id: MotorId, log: SimulationLog) -> Self {
        Self {
            id,
            direction: Direction::Off,
            log,
        }
    }

    /// Current direction.
    pub fn direction(&self) -> Direction {
        self.direction
    }

    fn set(&mut self, direction: Direction) -> Result<(), ActuatorError> {
        debug!(
            "[sim] motor {} ({}): {:?} -> {:?}",
            self.id.index(),
            self.id.name(),
            self.direction,
            direction
        );
        self.direction = direction;
        self.log.record(ActuatorCommand::motor(self.id, direction));
        Ok(())
    }
}

impl Motor for SimulationMotor {
    fn backend(&self) -> &'static str {
        "simulation"
    }

    fn setup(&mut self) -> Result<(), ActuatorError> {
        debug!("[sim] motor {} set up", self.id.index());
        Ok(())
    }

    fn drive_forward(&mut self) -> Result<(), ActuatorError> {
        self.set(Direction::Forward)
    }

    fn drive_reverse(&mut self) -> Result<(), ActuatorError> {
        self.set(Direction::Reverse)
    }

    fn stop(&mut self) -> Result<(), ActuatorError> {
        self.set(Direction::Off)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tracks_direction_and_records_calls() {
        let log = SimulationLog::new();
        let mut motor = SimulationMotor::with_log(MotorId::TopRear, log.clone());
        assert_eq!(motor.direction(), Direction::Off);

        motor.drive_reverse().unwrap();
        assert_eq!(motor.direction(), Direction::Reverse);
        motor.stop().unwrap();

        assert_eq!(
            log.snapshot(),
            vec![
                ActuatorCommand::motor(MotorId::TopRear, Direction::Reverse),
                ActuatorCommand::motor(MotorId::TopRear, Direction::Off),
            ]
        );
    }
}
