pub mod model;
pub mod nickname;

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

pub use model::{AppConfig, IrcConfig, LoggingConfig};

pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("ircbridge")
        .join("config.toml")
}

/// Read the config at `path`, falling back to defaults when the file does
/// not exist.
pub fn load_config(path: &Path) -> Result<AppConfig> {
    if !path.exists() {
        return Ok(AppConfig::default());
    }
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config from {}", path.display()))?;
    let config: AppConfig = toml::from_str(&contents)
        .with_context(|| format!("Failed to parse config file {}", path.display()))?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = load_config(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(cfg.irc.server, "irc.libera.chat");
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[irc]\nserver = \"irc.example.net\"\nport = 6667\nnick = \"bridgebot\""
        )
        .unwrap();
        let cfg = load_config(file.path()).unwrap();
        assert_eq!(cfg.irc.nick, "bridgebot");
        assert_eq!(cfg.irc.port, 6667);
    }

    #[test]
    fn test_parse_error_names_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[irc]\nport = \"not a number\"").unwrap();
        let err = load_config(file.path()).unwrap_err();
        assert!(format!("{}", err).contains("Failed to parse config file"));
    }
}
