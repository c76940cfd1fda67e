//! Normalized inbound events and the closed set of event kinds.

use std::fmt;
use std::str::FromStr;

/// Host mask attached to every event. Masks are not resolved from the network.
pub const PLACEHOLDER_MASK: &str = "dummy.host.mask";

/// One inbound IRC occurrence, as handed to application handlers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IrcEvent {
    pub nick: String,
    pub mask: String,
    /// `None` for private messages.
    pub channel: Option<String>,
    /// Text of a message or action.
    pub message: Option<String>,
    /// Nickname removed by a kick.
    pub othernick: Option<String>,
}

impl IrcEvent {
    pub fn new(target: &str, by: &str) -> Self {
        Self {
            nick: by.to_string(),
            mask: PLACEHOLDER_MASK.to_string(),
            channel: target.starts_with('#').then(|| target.to_string()),
            message: None,
            othernick: None,
        }
    }

    pub fn with_message(mut self, message: &str) -> Self {
        self.message = Some(message.to_string());
        self
    }

    pub fn with_othernick(mut self, othernick: &str) -> Self {
        self.othernick = Some(othernick.to_string());
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Connected,
    Message,
    Action,
    Join,
    Part,
    Kick,
}

impl EventKind {
    pub const ALL: [EventKind; 6] = [
        EventKind::Connected,
        EventKind::Message,
        EventKind::Action,
        EventKind::Join,
        EventKind::Part,
        EventKind::Kick,
    ];

    pub fn name(self) -> &'static str {
        match self {
            EventKind::Connected => "connected",
            EventKind::Message => "message",
            EventKind::Action => "action",
            EventKind::Join => "join",
            EventKind::Part => "part",
            EventKind::Kick => "kick",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("unknown IRC event kind '{0}'")]
pub struct UnknownEventKind(pub String);

impl FromStr for EventKind {
    type Err = UnknownEventKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EventKind::ALL
            .into_iter()
            .find(|kind| kind.name() == s)
            .ok_or_else(|| UnknownEventKind(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_channel_target() {
        let ev = IrcEvent::new("#rust", "alice");
        assert_eq!(ev.nick, "alice");
        assert_eq!(ev.mask, PLACEHOLDER_MASK);
        assert_eq!(ev.channel.as_deref(), Some("#rust"));
        assert_eq!(ev.message, None);
        assert_eq!(ev.othernick, None);
    }

    #[test]
    fn test_private_target_has_no_channel() {
        let ev = IrcEvent::new("bridgebot", "alice").with_message("hi");
        assert_eq!(ev.channel, None);
        assert_eq!(ev.message.as_deref(), Some("hi"));
    }

    #[test]
    fn test_only_hash_prefix_is_a_channel() {
        assert_eq!(IrcEvent::new("&local", "alice").channel, None);
    }

    #[test]
    fn test_kind_names() {
        for kind in EventKind::ALL {
            assert_eq!(kind.name().parse::<EventKind>(), Ok(kind));
            assert_eq!(kind.to_string(), kind.name());
        }
        assert_eq!(
            "quit".parse::<EventKind>(),
            Err(UnknownEventKind("quit".into()))
        );
    }
}
