//! Workspace-wide constants.
//!
//! Single source of truth for wire-format constants, limits and defaults.

/// Number of fields in one command frame.
pub const FRAME_FIELDS: usize = 8;

/// Field delimiter of the wire format.
pub const FRAME_DELIMITER: &str = "||";

/// Number of directional motors on the rig.
pub const MOTOR_COUNT: usize = 4;

/// Default TCP listen port.
pub const DEFAULT_PORT: u16 = 50000;

/// Default listen address (all interfaces).
pub const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0";

/// Default listen backlog.
pub const DEFAULT_BACKLOG: i32 = 5;

/// Default receive buffer size (5 MiB).
pub const DEFAULT_RECV_BUFFER_SIZE: usize = 5 * 1024 * 1024;

/// Default accept poll interval in milliseconds.
pub const DEFAULT_ACCEPT_POLL_MS: u64 = 50;

/// Default service name.
pub const DEFAULT_SERVICE_NAME: &str = "rov-endpoint";

/// Default configuration file path.
pub const DEFAULT_CONFIG_PATH: &str = "/etc/rov/endpoint.toml";

/// Default BCM pin pairs (pin0, pin1) for motors 0..3.
pub const DEFAULT_MOTOR_PINS: [[u8; 2]; MOTOR_COUNT] = [[18, 23], [24, 25], [8, 7], [17, 27]];

/// Default external program for the command camera transport.
pub const DEFAULT_CAMERA_PROGRAM: &str = "chdkptp";

/// Default settle delay after each camera property change, in milliseconds.
pub const DEFAULT_CAMERA_SETTLE_MS: u64 = 500;

/// Settle delay after switching the camera into USB control mode, in milliseconds.
pub const CAMERA_MODE_SWITCH_SETTLE_MS: u64 = 1000;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constants_are_consistent() {
        assert_eq!(FRAME_FIELDS, 8);
        assert_eq!(FRAME_DELIMITER.len(), 2);
        assert!(DEFAULT_BACKLOG > 0);
        assert!(DEFAULT_RECV_BUFFER_SIZE > 0);
        assert!(DEFAULT_ACCEPT_POLL_MS > 0);
    }

    #[test]
    fn default_pins_are_distinct() {
        let mut pins: Vec<u8> = DEFAULT_MOTOR_PINS.iter().flatten().copied().collect();
        pins.sort_unstable();
        pins.dedup();
        assert_eq!(pins.len(), MOTOR_COUNT * 2);
    }
}
