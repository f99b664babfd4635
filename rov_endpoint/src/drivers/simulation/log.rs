//! Shared call trace.

use parking_lot::Mutex;
use rov_common::actuator::types::ActuatorCommand;
use std::sync::Arc;

/// Ordered, shareable record of actuator calls.
///
/// Cloning yields a handle to the same trace.
#[derive(Debug, Clone, Default)]
pub struct SimulationLog {
    calls: Arc<Mutex<Vec<ActuatorCommand>>>,
}

impl SimulationLog {
    /// Create an empty trace.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one call.
    pub fn record(&self, command: ActuatorCommand) {
        self.calls.lock().push(command);
    }

    /// Copy of all calls recorded so far.
    pub fn snapshot(&self) -> Vec<ActuatorCommand> {
        self.calls.lock().clone()
    }

    /// Number of recorded calls.
    pub fn len(&self) -> usize {
        self.calls.lock().len()
    }

    /// True if nothing was recorded.
    pub fn is_empty(&self) -> bool {
        self.calls.lock().is_empty()
    }

    /// Remove and return all recorded calls.
    pub fn take(&self) -> Vec<ActuatorCommand> {
        std::mem::take(&mut *self.calls.lock())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rov_common::actuator::types::CameraAction;

    #[test]
    fn clones_share_the_trace() {
        let log = SimulationLog::new();
        let other = log.clone();
        other.record(ActuatorCommand::camera(CameraAction::Shutter));

        assert_eq!(log.len(), 1);
        assert_eq!(log.take(), vec![ActuatorCommand::camera(CameraAction::Shutter)]);
        assert!(other.is_empty());
    }
}
