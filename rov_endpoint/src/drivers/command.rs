//! Camera driven through an external PTP client.
//!
//! Each camera action runs `program [args..] <script>` once, where `script`
//! is the CHDK Lua snippet of the action (for `chdkptp` a typical argument
//! list is `["-c", "-e"]`, connecting then executing the remaining
//! argument). A non-zero exit status is a transport failure.

use rov_common::actuator::config::CameraConfig;
use rov_common::actuator::driver::{ActuatorError, Camera};
use rov_common::actuator::types::{CAMERA_INIT_SEQUENCE, CameraAction};
use std::process::{Command, Stdio};
use std::time::Duration;
use tracing::{debug, info};

/// Camera controlled by spawning an external program per action.
#[derive(Debug, Clone)]
pub struct CommandCamera {
    program: String,
    args: Vec<String>,
    settle: Duration,
    mode_switch_settle: Duration,
}

impl CommandCamera {
    /// Create from the `[camera]` section.
    pub fn new(config: &CameraConfig) -> Self {
        Self {
            program: config.program.clone(),
            args: config.args.clone(),
            settle: Duration::from_millis(config.init_settle_ms),
            mode_switch_settle: Duration::from_millis(config.mode_switch_settle_ms),
        }
    }

    /// Execute one script on the camera.
    pub fn run_script(&self, script: &str) -> Result<(), ActuatorError> {
        debug!("{} {:?} '{}'", self.program, self.args, script);
        let status = Command::new(&self.program)
            .args(&self.args)
            .arg(script)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .status()
            .map_err(|e| {
                ActuatorError::TransportError(format!("failed to run '{}': {}", self.program, e))
            })?;

        if status.success() {
            Ok(())
        } else {
            Err(ActuatorError::TransportError(format!(
                "'{}' exited with {} for script '{}'",
                self.program, status, script
            )))
        }
    }

    fn action(&self, action: CameraAction) -> Result<(), ActuatorError> {
        self.run_script(action.script())
    }
}

impl Camera for CommandCamera {
    fn backend(&self) -> &'static str {
        "command"
    }

    fn prepare(&mut self) -> Result<(), ActuatorError> {
        for step in CAMERA_INIT_SEQUENCE {
            self.run_script(step.script)
                .map_err(|e| ActuatorError::InitFailed(e.to_string()))?;
            let settle = if step.mode_switch {
                self.mode_switch_settle
            } else {
                self.settle
            };
            std::thread::sleep(settle);
        }
        info!("Camera switched to control mode, flash off");
        Ok(())
    }

    fn shoot(&mut self) -> Result<(), ActuatorError> {
        self.action(CameraAction::Shutter)
    }

    fn zoom_in(&mut self) -> Result<(), ActuatorError> {
        self.action(CameraAction::ZoomIn)
    }

    fn zoom_out(&mut self) -> Result<(), ActuatorError> {
        self.action(CameraAction::ZoomOut)
    }
}

/// Factory function to create a command camera.
pub fn create_camera(config: &CameraConfig) -> Result<Box<dyn Camera>, ActuatorError> {
    if config.program.trim().is_empty() {
        return Err(ActuatorError::InitFailed(
            "camera.program is empty".to_string(),
        ));
    }
    Ok(Box::new(CommandCamera::new(config)))
}
