//! IRC protocol layer: engine connection, event normalization and dispatch.

pub mod client;
pub mod connection;
pub mod event;
pub mod registry;

pub use client::ProtocolClient;
pub use event::{EventKind, IrcEvent, UnknownEventKind};
pub use registry::{HandlerRegistry, RegisterError};
