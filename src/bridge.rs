//! Bridge facade: owns the connection settings and the protocol client, and
//! exposes the operations the rest of an application builds on.

use crate::config::IrcConfig;
use crate::protocol::client::ProtocolClient;
use crate::protocol::connection::{self, Link};
use crate::protocol::registry::{EventHandler, HandlerRegistry, RegisterError};
use anyhow::{Context, Result};
use futures::StreamExt;
use irc::client::{Client, ClientStream};
use std::sync::Arc;

/// Messages of this many characters or more are sent in chunks of at most
/// this many characters.
pub const MESSAGE_SPLIT_LEN: usize = 420;

/// Split `text` into the chunks `send` puts on the wire. Counts characters,
/// never splits inside one, and never yields an empty trailing chunk.
pub fn split_message(text: &str) -> Vec<&str> {
    let mut chunks = Vec::new();
    let mut rest = text;
    loop {
        let end = rest
            .char_indices()
            .nth(MESSAGE_SPLIT_LEN)
            .map(|(i, _)| i)
            .unwrap_or(rest.len());
        let (head, tail) = rest.split_at(end);
        chunks.push(head);
        if tail.is_empty() {
            return chunks;
        }
        rest = tail;
    }
}

/// Cloneable handle for outbound operations, usable from inside handlers.
#[derive(Clone)]
pub struct BridgeHandle {
    link: Link,
}

impl BridgeHandle {
    pub fn is_connected(&self) -> bool {
        self.link.is_connected()
    }

    /// Request a join. Does not wait for the server to confirm.
    pub fn join(&self, channel: &str) -> Result<()> {
        let Some(out) = self.link.outbound() else {
            tracing::warn!("Not joining {} because IRC is not connected yet", channel);
            return Ok(());
        };
        out.join(channel)
    }

    /// Send `text` to `target`, split per [`split_message`]. Returns the
    /// number of messages handed to the connection; `0` when dropped because
    /// the connection is not up yet.
    pub fn send(&self, target: &str, text: &str) -> Result<usize> {
        let Some(out) = self.link.outbound() else {
            tracing::warn!("Dropping message(s) because IRC not connected yet");
            return Ok(0);
        };
        let chunks = split_message(text);
        for chunk in &chunks {
            out.privmsg(target, chunk)?;
        }
        Ok(chunks.len())
    }
}

pub struct Bridge {
    config: IrcConfig,
    client: ProtocolClient,
    link: Link,
}

impl Bridge {
    pub fn new(config: IrcConfig) -> Self {
        let link = Link::new();
        let client = ProtocolClient::new(
            config.nick.clone(),
            config.nick_password().map(String::from),
            link.clone(),
        );
        Self {
            config,
            client,
            link,
        }
    }

    /// Handler slots. Registering for a kind replaces its previous handler.
    pub fn handlers(&mut self) -> &mut HandlerRegistry {
        &mut self.client.registry
    }

    /// Bind `handler` to the event named `name`, returning the handler it
    /// replaces.
    pub fn register_handler(
        &mut self,
        name: &str,
        handler: EventHandler,
    ) -> std::result::Result<Option<EventHandler>, RegisterError> {
        self.client.registry.register_named(name, handler)
    }

    pub fn handle(&self) -> BridgeHandle {
        BridgeHandle {
            link: self.link.clone(),
        }
    }

    pub fn join(&self, channel: &str) -> Result<()> {
        self.handle().join(channel)
    }

    pub fn send(&self, target: &str, text: &str) -> Result<usize> {
        self.handle().send(target, text)
    }

    /// Connect and process messages until the server closes the connection.
    /// Transport errors end the loop and are returned; there is no reconnect.
    pub async fn run(&mut self) -> Result<()> {
        tracing::info!(
            "Connecting to {}:{} as {} (tls: {})",
            self.config.server,
            self.config.port,
            self.config.nick,
            self.config.ssl
        );
        let mut client = connection::open(&self.config).await?;
        let mut stream = client.stream().context("Failed to open IRC stream")?;
        self.client.reset_session();
        self.link.attach(Arc::new(client.sender()));

        let result = self.drive(&client, &mut stream).await;
        self.link.detach();
        match &result {
            Ok(()) => tracing::info!("IRC connection closed"),
            Err(e) => tracing::error!("IRC connection failed: {:#}", e),
        }
        result
    }

    async fn drive(&mut self, client: &Client, stream: &mut ClientStream) -> Result<()> {
        while let Some(message) = stream.next().await.transpose()? {
            self.client.set_nickname(client.current_nickname());
            self.client.handle_message(&message)?;
        }
        Ok(())
    }
}
