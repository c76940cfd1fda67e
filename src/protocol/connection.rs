use crate::config::IrcConfig;
use anyhow::{Context, Result};
use irc::client::prelude::*;
use std::sync::{Arc, RwLock};

/// Outbound half of a live connection.
pub trait Outbound: Send + Sync {
    fn privmsg(&self, target: &str, text: &str) -> Result<()>;
    fn join(&self, channel: &str) -> Result<()>;
}

impl Outbound for irc::client::Sender {
    fn privmsg(&self, target: &str, text: &str) -> Result<()> {
        self.send_privmsg(target, text)?;
        Ok(())
    }

    fn join(&self, channel: &str) -> Result<()> {
        self.send_join(channel)?;
        Ok(())
    }
}

/// Shared slot holding the outbound half once the connection is up.
///
/// Clones share the slot, so a link handed out before `run()` starts sees the
/// connection as soon as it is attached.
#[derive(Clone, Default)]
pub struct Link {
    slot: Arc<RwLock<Option<Arc<dyn Outbound>>>>,
}

impl Link {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn attach(&self, outbound: Arc<dyn Outbound>) {
        let mut slot = self.slot.write().unwrap_or_else(|e| e.into_inner());
        *slot = Some(outbound);
    }

    pub fn detach(&self) {
        let mut slot = self.slot.write().unwrap_or_else(|e| e.into_inner());
        *slot = None;
    }

    pub fn outbound(&self) -> Option<Arc<dyn Outbound>> {
        self.slot.read().unwrap_or_else(|e| e.into_inner()).clone()
    }

    pub fn is_connected(&self) -> bool {
        self.outbound().is_some()
    }
}

/// Engine configuration for one connection. Certificate verification is
/// always off when TLS is on.
pub fn engine_config(cfg: &IrcConfig) -> Config {
    Config {
        server: Some(cfg.server.clone()),
        port: Some(cfg.port),
        use_tls: Some(cfg.ssl),
        nickname: Some(cfg.nick.clone()),
        realname: Some(cfg.realname.clone()),
        channels: cfg.channels.clone(),
        dangerously_accept_invalid_certs: Some(cfg.ssl),
        ..Config::default()
    }
}

/// Open the transport and send registration.
pub async fn open(cfg: &IrcConfig) -> Result<Client> {
    let client = Client::from_config(engine_config(cfg))
        .await
        .with_context(|| format!("Failed to connect to {}:{}", cfg.server, cfg.port))?;
    client.identify().context("Failed to send IRC registration")?;
    Ok(client)
}
