//! Raspberry Pi H-bridge motors.
//!
//! Each motor is driven through two BCM output pins. Forward is pin0 low then
//! pin1 high, reverse is pin1 low then pin0 high, stop is both low. Lowering
//! the opposite input first keeps both inputs from being high at once.

use rov_common::actuator::config::MotorConfig;
use rov_common::actuator::driver::{ActuatorError, Motor};
use rov_common::actuator::types::MotorId;
use rppal::gpio::{Gpio, OutputPin};
use tracing::debug;

/// One motor on a pin pair.
pub struct GpioMotor {
    id: MotorId,
    pins: [u8; 2],
    outputs: Option<[OutputPin; 2]>,
}

impl GpioMotor {
    /// Create an unconfigured motor; pins are claimed in `setup()`.
    pub fn new(id: MotorId, pins: [u8; 2]) -> Self {
        Self {
            id,
            pins,
            outputs: None,
        }
    }

    fn outputs(&mut self) -> Result<&mut [OutputPin; 2], ActuatorError> {
        let id = self.id;
        self.outputs.as_mut().ok_or_else(|| {
            ActuatorError::CommunicationError(format!("motor {} used before setup", id.index()))
        })
    }
}

impl Motor for GpioMotor {
    fn backend(&self) -> &'static str {
        "gpio"
    }

    fn setup(&mut self) -> Result<(), ActuatorError> {
        let gpio = Gpio::new().map_err(|e| ActuatorError::InitFailed(e.to_string()))?;
        let claim = |pin: u8| {
            gpio.get(pin)
                .map(|p| p.into_output_low())
                .map_err(|e| ActuatorError::InitFailed(format!("pin {}: {}", pin, e)))
        };
        let pin0 = claim(self.pins[0])?;
        let pin1 = claim(self.pins[1])?;
        self.outputs = Some([pin0, pin1]);
        debug!(
            "Motor {} ({}) on pins {:?}",
            self.id.index(),
            self.id.name(),
            self.pins
        );
        Ok(())
    }

    fn drive_forward(&mut self) -> Result<(), ActuatorError> {
        let [pin0, pin1] = self.outputs()?;
        pin0.set_low();
        pin1.set_high();
        Ok(())
    }

    fn drive_reverse(&mut self) -> Result<(), ActuatorError> {
        let [pin0, pin1] = self.outputs()?;
        pin1.set_low();
        pin0.set_high();
        Ok(())
    }

    fn stop(&mut self) -> Result<(), ActuatorError> {
        let [pin0, pin1] = self.outputs()?;
        pin0.set_low();
        pin1.set_low();
        Ok(())
    }
}

/// Factory function to create a GPIO motor.
pub fn create_motor(config: &MotorConfig, id: MotorId) -> Result<Box<dyn Motor>, ActuatorError> {
    Ok(Box::new(GpioMotor::new(id, config.pins_for(id))))
}
