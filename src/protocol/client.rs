//! Translation from engine messages to normalized dispatches.
//!
//! [`ProtocolClient::handle_message`] routes each incoming [`Message`] to one
//! of the `on_*` callbacks, which build an [`IrcEvent`] and hand it to the
//! registry. The callbacks are public so they can be driven without a socket.

use crate::protocol::connection::Link;
use crate::protocol::event::{EventKind, IrcEvent};
use crate::protocol::registry::HandlerRegistry;
use anyhow::Result;
use irc::client::prelude::{Command, Message, Response};

pub struct ProtocolClient {
    nickname: String,
    nick_password: Option<String>,
    registered: bool,
    pub registry: HandlerRegistry,
    link: Link,
}

impl ProtocolClient {
    pub fn new(nickname: String, nick_password: Option<String>, link: Link) -> Self {
        Self {
            nickname,
            nick_password,
            registered: false,
            registry: HandlerRegistry::new(),
            link,
        }
    }

    /// Forget registration state before a new connection starts.
    pub fn reset_session(&mut self) {
        self.registered = false;
    }

    /// Track the engine's view of our nickname (collision fallbacks, NICK).
    pub fn set_nickname(&mut self, nickname: &str) {
        if self.nickname != nickname {
            tracing::debug!("Own nickname is now {}", nickname);
            self.nickname = nickname.to_string();
        }
    }

    fn is_self(&self, nick: &str) -> bool {
        nick.eq_ignore_ascii_case(&self.nickname)
    }

    pub fn handle_message(&mut self, message: &Message) -> Result<()> {
        let nick_from = message.source_nickname().unwrap_or("").to_string();

        match &message.command {
            Command::Response(Response::RPL_ENDOFMOTD, _)
            | Command::Response(Response::ERR_NOMOTD, _) => self.on_connect()?,
            Command::PRIVMSG(target, text) => match parse_ctcp(text) {
                Some((verb, contents)) => self.on_ctcp(&nick_from, target, verb, contents),
                None => self.on_message(target, &nick_from, text),
            },
            Command::JOIN(channel, _, _) => self.on_join(channel, &nick_from),
            Command::PART(channel, reason) => self.on_part(channel, &nick_from, reason.as_deref()),
            Command::KICK(channel, target, reason) => {
                self.on_kick(channel, target, &nick_from, reason.as_deref())?
            }
            _ => {}
        }
        Ok(())
    }

    /// Runs once per session; later MOTD replies are ignored.
    pub fn on_connect(&mut self) -> Result<()> {
        if self.registered {
            tracing::debug!("Ignoring repeated end of MOTD");
            return Ok(());
        }
        self.registered = true;
        tracing::info!("IRC connection established");
        if let Some(password) = &self.nick_password {
            match self.link.outbound() {
                Some(out) => out.privmsg("NickServ", &format!("IDENTIFY {}", password))?,
                None => tracing::warn!("Cannot identify with NickServ: not connected"),
            }
        }
        self.registry.dispatch_connected();
        Ok(())
    }

    pub fn on_message(&mut self, target: &str, by: &str, text: &str) {
        let event = IrcEvent::new(target, by).with_message(text);
        self.registry.dispatch(EventKind::Message, &event);
    }

    pub fn on_ctcp(&mut self, by: &str, target: &str, verb: &str, contents: &str) {
        if verb != "ACTION" {
            return;
        }
        let event = IrcEvent::new(target, by).with_message(contents);
        self.registry.dispatch(EventKind::Action, &event);
    }

    pub fn on_join(&mut self, channel: &str, user: &str) {
        if self.is_self(user) {
            tracing::info!("Joined {}", channel);
            return;
        }
        self.registry.dispatch(EventKind::Join, &IrcEvent::new(channel, user));
    }

    /// The leave reason is not forwarded to handlers.
    pub fn on_part(&mut self, channel: &str, user: &str, _reason: Option<&str>) {
        self.registry.dispatch(EventKind::Part, &IrcEvent::new(channel, user));
    }

    pub fn on_kick(
        &mut self,
        channel: &str,
        target: &str,
        by: &str,
        reason: Option<&str>,
    ) -> Result<()> {
        if self.is_self(target) {
            tracing::warn!(
                "Kicked from {} by {} ({}), rejoining",
                channel,
                by,
                reason.unwrap_or("")
            );
            match self.link.outbound() {
                Some(out) => out.join(channel)?,
                None => tracing::warn!("Cannot rejoin {}: not connected", channel),
            }
            return Ok(());
        }
        let event = IrcEvent::new(channel, by).with_othernick(target);
        self.registry.dispatch(EventKind::Kick, &event);
        Ok(())
    }
}

/// Split `\x01VERB contents\x01` into its verb and contents.
fn parse_ctcp(text: &str) -> Option<(&str, &str)> {
    let inner = text.strip_prefix('\x01')?;
    let inner = inner.strip_suffix('\x01').unwrap_or(inner);
    Some(inner.split_once(' ').unwrap_or((inner, "")))
}
