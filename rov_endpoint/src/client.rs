//! Frame sender.
//!
//! Mirrors the control station side of the protocol: one connection per
//! frame, write the frame, close.

use crate::frame::CommandFrame;
use std::io::Write;
use std::net::{Shutdown, TcpStream, ToSocketAddrs};
use tracing::debug;

/// Send one frame to the endpoint.
pub fn send_frame<A: ToSocketAddrs>(addr: A, frame: &CommandFrame) -> std::io::Result<()> {
    send_raw(addr, frame.to_wire().as_bytes())
}

/// Send an arbitrary payload as one connection.
pub fn send_raw<A: ToSocketAddrs>(addr: A, payload: &[u8]) -> std::io::Result<()> {
    let mut stream = TcpStream::connect(addr)?;
    stream.write_all(payload)?;
    stream.flush()?;
    // End of frame. The endpoint may already have closed its side.
    let _ = stream.shutdown(Shutdown::Write);
    debug!("Sent {} bytes", payload.len());
    Ok(())
}
