//! Control server and accept loop.
//!
//! The `ControlServer` owns the listening socket and the actuators. Its
//! accept loop handles one connection at a time: accept, read one frame,
//! apply it, close. The held [`AxisState`] lives in the loop and is the only
//! state carried between connections.

use crate::config::ServerConfig;
use crate::dispatch::{Actuators, DispatchReport, dispatch};
use crate::error::EndpointError;
use crate::frame::{FrameError, parse_frame};
use crate::interlock::plan;
use crate::state::AxisState;
use socket2::{Domain, Protocol, Socket, Type};
use std::io::{ErrorKind, Read};
use std::net::{SocketAddr, TcpListener, TcpStream};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{debug, error, info, warn};

/// Counters of the accept loop.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct FrameStats {
    /// Connections accepted.
    pub connections: u64,
    /// Connections closed without sending anything.
    pub empty_reads: u64,
    /// Frames parsed and dispatched.
    pub applied: u64,
    /// Frames rejected by the parser.
    pub rejected: u64,
    /// Transitions dropped because an actuator call failed.
    pub actuator_faults: u64,
    /// Connections whose read failed.
    pub read_errors: u64,
}

/// TCP control endpoint.
pub struct ControlServer {
    config: ServerConfig,
    listener: TcpListener,
    actuators: Actuators,
    /// Running flag for accept loop control
    running: Arc<AtomicBool>,
    stats: FrameStats,
    buffer: Vec<u8>,
}

impl ControlServer {
    /// Bind the listening socket.
    ///
    /// The actuators must already be set up.
    ///
    /// # Errors
    /// Invalid bind address, or any socket error while binding.
    pub fn bind(config: ServerConfig, actuators: Actuators) -> Result<Self, EndpointError> {
        let addr = config.socket_addr()?;
        let listener = listen(addr, config.backlog)?;
        info!(
            "Listening on {} (backlog {})",
            listener.local_addr()?,
            config.backlog
        );

        let buffer = vec![0u8; config.recv_buffer_size];
        Ok(Self {
            config,
            listener,
            actuators,
            running: Arc::new(AtomicBool::new(true)),
            stats: FrameStats::default(),
            buffer,
        })
    }

    /// Address actually bound (resolves port 0).
    pub fn local_addr(&self) -> Result<SocketAddr, EndpointError> {
        Ok(self.listener.local_addr()?)
    }

    /// Get the running flag for signal handlers.
    pub fn running_flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.running)
    }

    /// Get loop counters.
    pub fn stats(&self) -> FrameStats {
        self.stats
    }

    /// Run the accept loop until the running flag is cleared.
    ///
    /// Returns the held state at exit.
    pub fn run(&mut self) -> Result<AxisState, EndpointError> {
        let mut state = AxisState::default();
        let poll = self.config.accept_poll();
        info!("Accept loop started");

        while self.running.load(Ordering::SeqCst) {
            match self.listener.accept() {
                Ok((stream, peer)) => {
                    self.stats.connections += 1;
                    self.serve(stream, peer, &mut state);
                }
                Err(ref e) if e.kind() == ErrorKind::WouldBlock => {
                    std::thread::sleep(poll);
                }
                Err(ref e) if e.kind() == ErrorKind::Interrupted => {}
                Err(e) => {
                    warn!("Accept error: {}", e);
                    std::thread::sleep(poll);
                }
            }
        }

        info!(
            "Accept loop stopped after {} connections (applied: {}, rejected: {}, faults: {})",
            self.stats.connections,
            self.stats.applied,
            self.stats.rejected,
            self.stats.actuator_faults
        );
        Ok(state)
    }

    /// Stop the loop, stop all motors and release the camera.
    pub fn shutdown(&mut self) -> Result<(), EndpointError> {
        info!("Shutdown requested");
        self.running.store(false, Ordering::SeqCst);
        self.actuators.shutdown()?;
        info!("All motors stopped");
        Ok(())
    }

    /// Handle one connection; the stream is closed on return.
    fn serve(&mut self, mut stream: TcpStream, peer: SocketAddr, state: &mut AxisState) {
        debug!("Connection from {}", peer);

        // Accepted sockets inherit non-blocking mode on some platforms.
        if let Err(e) = stream
            .set_nonblocking(false)
            .and_then(|_| stream.set_read_timeout(self.config.read_timeout()))
        {
            warn!("Failed to configure connection from {}: {}", peer, e);
            self.stats.read_errors += 1;
            return;
        }

        let len = match read_once(&mut stream, &mut self.buffer) {
            Ok(len) => len,
            Err(e) => {
                warn!("Read from {} failed: {}", peer, e);
                self.stats.read_errors += 1;
                return;
            }
        };
        if len == 0 {
            debug!("Empty read from {}", peer);
            self.stats.empty_reads += 1;
            return;
        }

        match process_frame(&self.buffer[..len], state, &mut self.actuators) {
            Ok(report) => {
                self.stats.applied += 1;
                self.stats.actuator_faults += report.faults.len() as u64;
            }
            Err(e) => {
                warn!("Rejected frame from {}: {}", peer, e);
                self.stats.rejected += 1;
            }
        }
    }
}

/// Parse one payload, run the interlock and dispatch the resulting calls.
///
/// A rejected frame leaves `state` and the actuators untouched.
pub fn process_frame(
    payload: &[u8],
    state: &mut AxisState,
    actuators: &mut Actuators,
) -> Result<DispatchReport, FrameError> {
    let frame = parse_frame(payload)?;
    let plan = plan(*state, &frame);
    let report = dispatch(&plan, state, actuators);

    if report.is_clean() {
        debug!("Frame {} -> state {}", frame, state);
    } else {
        error!(
            "Frame {} applied with {} faulted field(s) -> state {}",
            frame,
            report.faults.len(),
            state
        );
    }
    Ok(report)
}

fn listen(addr: SocketAddr, backlog: i32) -> std::io::Result<TcpListener> {
    let socket = Socket::new(Domain::for_address(addr), Type::STREAM, Some(Protocol::TCP))?;
    socket.set_reuse_address(true)?;
    socket.bind(&addr.into())?;
    socket.listen(backlog)?;
    let listener: TcpListener = socket.into();
    listener.set_nonblocking(true)?;
    Ok(listener)
}

fn read_once(stream: &mut TcpStream, buffer: &mut [u8]) -> std::io::Result<usize> {
    loop {
        match stream.read(buffer) {
            Err(ref e) if e.kind() == ErrorKind::Interrupted => continue,
            result => return result,
        }
    }
}
