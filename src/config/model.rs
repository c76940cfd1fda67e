//! Configuration data model.
//!
//! All structs derive `Serialize`/`Deserialize` for TOML persistence.
//! Optional keys have defaults so a minimal `[irc]` table is enough.

use serde::{Deserialize, Serialize};

use super::nickname::generate_nickname;

/// Root configuration file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default = "default_irc")]
    pub irc: IrcConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            irc: default_irc(),
            logging: LoggingConfig::default(),
        }
    }
}

/// Connection settings, captured once when the bridge is built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IrcConfig {
    pub server: String,
    pub port: u16,
    #[serde(default)]
    pub ssl: bool,
    pub nick: String,
    /// NickServ password. Empty strings count as unset.
    #[serde(default)]
    pub nickpassword: Option<String>,
    #[serde(default = "default_realname")]
    pub realname: String,
    /// Joined by the engine once registration completes.
    #[serde(default)]
    pub channels: Vec<String>,
}

impl IrcConfig {
    pub fn nick_password(&self) -> Option<&str> {
        self.nickpassword.as_deref().filter(|p| !p.is_empty())
    }
}

fn default_irc() -> IrcConfig {
    IrcConfig {
        server: "irc.libera.chat".into(),
        port: 6697,
        ssl: true,
        nick: generate_nickname(),
        nickpassword: None,
        realname: default_realname(),
        channels: vec![],
    }
}

fn default_realname() -> String {
    "ircbridge (IRC)".into()
}

/// Diagnostic logging settings. `RUST_LOG` takes precedence over `level`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_level")]
    pub level: String,
    #[serde(default = "default_true")]
    pub ansi: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            ansi: true,
        }
    }
}

fn default_level() -> String {
    "info".into()
}

fn default_true() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_irc_table() {
        let cfg: AppConfig = toml::from_str(
            r#"
            [irc]
            server = "irc.example.net"
            port = 6667
            nick = "bridgebot"
            "#,
        )
        .unwrap();
        assert_eq!(cfg.irc.server, "irc.example.net");
        assert_eq!(cfg.irc.port, 6667);
        assert!(!cfg.irc.ssl);
        assert_eq!(cfg.irc.nickpassword, None);
        assert_eq!(cfg.irc.realname, "ircbridge (IRC)");
        assert!(cfg.irc.channels.is_empty());
        assert_eq!(cfg.logging.level, "info");
        assert!(cfg.logging.ansi);
    }

    #[test]
    fn test_full_irc_table() {
        let cfg: AppConfig = toml::from_str(
            r##"
            [irc]
            server = "irc.example.net"
            port = 6697
            ssl = true
            nick = "bridgebot"
            nickpassword = "hunter2"
            realname = "relay"
            channels = ["#one", "#two"]

            [logging]
            level = "debug"
            ansi = false
            "##,
        )
        .unwrap();
        assert!(cfg.irc.ssl);
        assert_eq!(cfg.irc.nick_password(), Some("hunter2"));
        assert_eq!(cfg.irc.realname, "relay");
        assert_eq!(cfg.irc.channels, vec!["#one", "#two"]);
        assert_eq!(cfg.logging.level, "debug");
        assert!(!cfg.logging.ansi);
    }

    #[test]
    fn test_empty_nickpassword_is_unset() {
        let mut cfg = default_irc();
        cfg.nickpassword = Some(String::new());
        assert_eq!(cfg.nick_password(), None);
    }

    #[test]
    fn test_default_targets_libera_over_tls() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.irc.server, "irc.libera.chat");
        assert_eq!(cfg.irc.port, 6697);
        assert!(cfg.irc.ssl);
        assert!(!cfg.irc.nick.is_empty());
    }
}
