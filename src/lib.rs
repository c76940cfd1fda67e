//! Adapter between an IRC connection and an application event-handler
//! registry.
//!
//! [`Bridge`] owns the connection settings and drives the `irc` crate's
//! message stream. Inbound traffic is normalized into [`IrcEvent`]s and
//! handed to the handler registered for its [`EventKind`]; outbound traffic
//! goes through a cloneable [`BridgeHandle`].

pub mod bridge;
pub mod config;
pub mod logging;
pub mod protocol;

pub use bridge::{split_message, Bridge, BridgeHandle, MESSAGE_SPLIT_LEN};
pub use protocol::{EventKind, HandlerRegistry, IrcEvent};
