//! # ROV Endpoint Library
//!
//! On-board control endpoint of a remotely operated underwater vehicle.
//!
//! The control station opens one TCP connection per command frame. Each
//! frame is decoded, passed through the interlock against the held axis
//! state, and the resulting motor and camera calls are dispatched to the
//! actuator backends.
//!
//! # Module Structure
//!
//! - [`frame`] - Wire format decoding and encoding
//! - [`state`] - Held axis state flags
//! - [`interlock`] - Edge-triggered transition rules
//! - [`dispatch`] - Actuator ownership and per-field commit
//! - [`server`] - Listening socket and accept loop
//! - [`client`] - Frame sender
//! - [`config`] - Endpoint configuration
//! - [`driver_registry`] - Backend factory registration
//! - [`drivers`] - Motor and camera backends
//!
//! # Architecture
//!
//! ```text
//! ┌───────────────────────────────────────────────────────────────┐
//! │                      rov_endpoint                             │
//! │  ┌──────────────┐   ┌────────────┐   ┌─────────────────────┐  │
//! │  │ ControlServer│──►│   frame    │──►│     interlock       │  │
//! │  │ (accept loop)│   │  (parse)   │   │ (AxisState → Plan)  │  │
//! │  └──────────────┘   └────────────┘   └──────────┬──────────┘  │
//! │                                                 ▼             │
//! │                                      ┌─────────────────────┐  │
//! │                                      │ dispatch (Actuators)│  │
//! │                                      └──────────┬──────────┘  │
//! │                                                 ▼             │
//! │                               Motor / Camera (trait objects)  │
//! └───────────────────────────────────────────────────────────────┘
//! ```

#![warn(missing_docs)]

pub mod client;
pub mod config;
pub mod dispatch;
pub mod driver_registry;
pub mod drivers;
pub mod error;
pub mod frame;
pub mod interlock;
pub mod server;
pub mod state;

// Re-export key types for convenience
pub use crate::config::{EndpointConfig, ServerConfig};
pub use crate::dispatch::{Actuators, DispatchReport};
pub use crate::driver_registry::DriverRegistry;
pub use crate::error::EndpointError;
pub use crate::frame::{CommandFrame, FrameError, parse_frame};
pub use crate::server::{ControlServer, FrameStats, process_frame};
pub use crate::state::AxisState;
