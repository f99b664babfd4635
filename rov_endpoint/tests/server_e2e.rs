//! End-to-end tests over loopback TCP.
//!
//! A `ControlServer` with simulated actuators runs on an ephemeral port in a
//! background thread; frames are sent with the client functions.

use rov_common::actuator::driver::Motor;
use rov_common::actuator::types::{ActuatorCommand, CameraAction, Direction, MotorId};
use rov_endpoint::client::{send_frame, send_raw};
use rov_endpoint::config::ServerConfig;
use rov_endpoint::dispatch::Actuators;
use rov_endpoint::drivers::simulation::{SimulationCamera, SimulationLog, SimulationMotor};
use rov_endpoint::frame::{CommandFrame, Tri};
use rov_endpoint::server::{ControlServer, FrameStats};
use rov_endpoint::state::AxisState;
use std::net::{SocketAddr, TcpStream};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

struct Harness {
    addr: SocketAddr,
    log: SimulationLog,
    running: Arc<AtomicBool>,
    handle: JoinHandle<(ControlServer, AxisState)>,
}

impl Harness {
    fn start() -> Self {
        let log = SimulationLog::new();
        let motors = MotorId::ALL
            .map(|id| Box::new(SimulationMotor::with_log(id, log.clone())) as Box<dyn Motor>);
        let actuators = Actuators::new(motors, Box::new(SimulationCamera::with_log(log.clone())));

        let config = ServerConfig {
            bind_address: "127.0.0.1".to_string(),
            port: 0,
            read_timeout_ms: Some(2000),
            accept_poll_ms: 5,
            ..ServerConfig::default()
        };
        let mut server = ControlServer::bind(config, actuators).expect("bind loopback");
        let addr = server.local_addr().expect("local addr");
        let running = server.running_flag();

        let handle = thread::spawn(move || {
            let state = server.run().expect("accept loop");
            (server, state)
        });

        Self {
            addr,
            log,
            running,
            handle,
        }
    }

    /// Wait until at least `count` calls were recorded.
    fn wait_for_calls(&self, count: usize) {
        let deadline = Instant::now() + Duration::from_secs(5);
        while self.log.len() < count {
            assert!(Instant::now() < deadline, "timed out waiting for {count} calls");
            thread::sleep(Duration::from_millis(5));
        }
    }

    fn stop(self) -> (ControlServer, AxisState) {
        self.running.store(false, Ordering::SeqCst);
        self.handle.join().expect("server thread")
    }
}

#[test]
fn frames_over_tcp_drive_the_rig() {
    let harness = Harness::start();

    let backward_and_shoot = CommandFrame {
        longitudinal: Tri::Positive,
        shutter: true,
        ..CommandFrame::REST
    };
    send_frame(harness.addr, &backward_and_shoot).unwrap();
    send_raw(harness.addr, b"1||0||0").unwrap();
    drop(TcpStream::connect(harness.addr).unwrap());
    send_frame(harness.addr, &CommandFrame::REST).unwrap();

    harness.wait_for_calls(5);
    let calls = harness.log.snapshot();
    let (server, state) = harness.stop();

    assert_eq!(
        calls,
        vec![
            ActuatorCommand::motor(MotorId::Left, Direction::Reverse),
            ActuatorCommand::motor(MotorId::Right, Direction::Reverse),
            ActuatorCommand::camera(CameraAction::Shutter),
            ActuatorCommand::motor(MotorId::Left, Direction::Off),
            ActuatorCommand::motor(MotorId::Right, Direction::Off),
        ]
    );
    assert!(state.is_empty());
    assert_eq!(
        server.stats(),
        FrameStats {
            connections: 4,
            empty_reads: 1,
            applied: 2,
            rejected: 1,
            actuator_faults: 0,
            read_errors: 0,
        }
    );
}

#[test]
fn state_persists_across_connections() {
    let harness = Harness::start();

    for _ in 0..3 {
        send_raw(harness.addr, b"0||0||0||0||0||1||0||0\n").unwrap();
    }
    send_raw(harness.addr, b"0||0||0||0||0||0||0||0\n").unwrap();

    harness.wait_for_calls(4);
    let (_, state) = harness.stop();
    assert!(state.is_empty());
}

#[test]
fn shutdown_after_run_stops_motors() {
    let harness = Harness::start();
    send_raw(harness.addr, b"-1||0||0||0||0||0||0||0").unwrap();
    harness.wait_for_calls(2);

    let log = harness.log.clone();
    let (mut server, state) = harness.stop();
    assert_eq!(state, AxisState::FORWARD);

    log.take();
    server.shutdown().unwrap();
    assert_eq!(
        log.snapshot(),
        MotorId::ALL
            .iter()
            .map(|id| ActuatorCommand::motor(*id, Direction::Off))
            .collect::<Vec<_>>()
    );
}
