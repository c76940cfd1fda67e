//! Single-slot handler registry keyed by [`EventKind`].
//!
//! Each kind holds at most one handler. Registering a handler for a kind that
//! already has one replaces it, and the replaced handler is returned to the
//! caller. Dispatch never fails: empty slots log a warning, and handler
//! errors or panics are logged and swallowed so the receive loop keeps going.

use crate::protocol::event::{EventKind, IrcEvent, UnknownEventKind};
use anyhow::Result;
use std::any::Any;
use std::collections::HashMap;
use std::panic::{catch_unwind, AssertUnwindSafe};

pub type ConnectedHandler = Box<dyn FnMut() -> Result<()> + Send>;
pub type EventHandler = Box<dyn FnMut(&IrcEvent) -> Result<()> + Send>;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum RegisterError {
    #[error(transparent)]
    UnknownKind(#[from] UnknownEventKind),
    #[error("'{0}' handlers take no event; register them with on_connected")]
    NoEventPayload(EventKind),
}

#[derive(Default)]
pub struct HandlerRegistry {
    connected: Option<ConnectedHandler>,
    events: HashMap<EventKind, EventHandler>,
}

impl HandlerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_connected<F>(&mut self, f: F) -> Option<ConnectedHandler>
    where
        F: FnMut() -> Result<()> + Send + 'static,
    {
        self.connected.replace(Box::new(f))
    }

    pub fn on_message<F>(&mut self, f: F) -> Option<EventHandler>
    where
        F: FnMut(&IrcEvent) -> Result<()> + Send + 'static,
    {
        self.replace(EventKind::Message, Box::new(f))
    }

    pub fn on_action<F>(&mut self, f: F) -> Option<EventHandler>
    where
        F: FnMut(&IrcEvent) -> Result<()> + Send + 'static,
    {
        self.replace(EventKind::Action, Box::new(f))
    }

    pub fn on_join<F>(&mut self, f: F) -> Option<EventHandler>
    where
        F: FnMut(&IrcEvent) -> Result<()> + Send + 'static,
    {
        self.replace(EventKind::Join, Box::new(f))
    }

    pub fn on_part<F>(&mut self, f: F) -> Option<EventHandler>
    where
        F: FnMut(&IrcEvent) -> Result<()> + Send + 'static,
    {
        self.replace(EventKind::Part, Box::new(f))
    }

    pub fn on_kick<F>(&mut self, f: F) -> Option<EventHandler>
    where
        F: FnMut(&IrcEvent) -> Result<()> + Send + 'static,
    {
        self.replace(EventKind::Kick, Box::new(f))
    }

    /// Put `handler` in the slot for `kind`, returning the handler it
    /// replaces. `connected` takes no event and is rejected here.
    pub fn register(
        &mut self,
        kind: EventKind,
        handler: EventHandler,
    ) -> std::result::Result<Option<EventHandler>, RegisterError> {
        if kind == EventKind::Connected {
            return Err(RegisterError::NoEventPayload(kind));
        }
        Ok(self.replace(kind, handler))
    }

    /// [`register`](Self::register) with the kind given by its wire name,
    /// e.g. `"kick"`.
    pub fn register_named(
        &mut self,
        name: &str,
        handler: EventHandler,
    ) -> std::result::Result<Option<EventHandler>, RegisterError> {
        self.register(name.parse()?, handler)
    }

    fn replace(&mut self, kind: EventKind, handler: EventHandler) -> Option<EventHandler> {
        debug_assert!(kind != EventKind::Connected);
        self.events.insert(kind, handler)
    }

    pub fn is_registered(&self, kind: EventKind) -> bool {
        match kind {
            EventKind::Connected => self.connected.is_some(),
            _ => self.events.contains_key(&kind),
        }
    }

    pub fn dispatch_connected(&mut self) {
        match self.connected.as_mut() {
            Some(handler) => invoke(EventKind::Connected, || handler()),
            None => unhandled(EventKind::Connected),
        }
    }

    pub fn dispatch(&mut self, kind: EventKind, event: &IrcEvent) {
        match self.events.get_mut(&kind) {
            Some(handler) => invoke(kind, || handler(event)),
            None => unhandled(kind),
        }
    }
}

fn unhandled(kind: EventKind) {
    tracing::warn!("Unhandled '{}' event", kind);
}

fn invoke(kind: EventKind, call: impl FnOnce() -> Result<()>) {
    match catch_unwind(AssertUnwindSafe(call)) {
        Ok(Ok(())) => {}
        Ok(Err(e)) => {
            tracing::error!(event = %kind, "Error in IRC event handler: {:#}", e);
        }
        Err(payload) => {
            tracing::error!(
                event = %kind,
                "IRC event handler panicked: {}",
                panic_message(payload.as_ref())
            );
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s
    } else {
        "non-string panic payload"
    }
}
