//! Simulated camera.

use super::log::SimulationLog;
use rov_common::actuator::driver::{ActuatorError, Camera};
use rov_common::actuator::types::{ActuatorCommand, CameraAction};
use tracing::{debug, info};

/// Camera counting shots and zoom steps.
#[derive(Debug, Default)]
pub struct SimulationCamera {
    log: SimulationLog,
    shots: u64,
    zoom: i32,
}

impl SimulationCamera {
    /// Create a camera with a private trace.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a camera recording into `log`.
    pub fn with_log(log: SimulationLog) -> Self {
        Self {
            log,
            ..Self::default()
        }
    }

    /// Shots taken so far.
    pub fn shots(&self) -> u64 {
        self.shots
    }

    /// Net zoom steps (positive = zoomed in).
    pub fn zoom(&self) -> i32 {
        self.zoom
    }
}

impl Camera for SimulationCamera {
    fn backend(&self) -> &'static str {
        "simulation"
    }

    fn prepare(&mut self) -> Result<(), ActuatorError> {
        info!("[sim] camera in control mode, flash off");
        Ok(())
    }

    fn shoot(&mut self) -> Result<(), ActuatorError> {
        self.shots += 1;
        debug!("[sim] shot #{}", self.shots);
        self.log.record(ActuatorCommand::camera(CameraAction::Shutter));
        Ok(())
    }

    fn zoom_in(&mut self) -> Result<(), ActuatorError> {
        self.zoom += 1;
        debug!("[sim] zoom in -> {}", self.zoom);
        self.log.record(ActuatorCommand::camera(CameraAction::ZoomIn));
        Ok(())
    }

    fn zoom_out(&mut self) -> Result<(), ActuatorError> {
        self.zoom -= 1;
        debug!("[sim] zoom out -> {}", self.zoom);
        self.log.record(ActuatorCommand::camera(CameraAction::ZoomOut));
        Ok(())
    }
}
