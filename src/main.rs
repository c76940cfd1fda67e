use anyhow::Result;
use ircbridge::config::{self, AppConfig};
use ircbridge::{logging, Bridge, IrcEvent};
use std::path::PathBuf;

#[tokio::main]
async fn main() -> Result<()> {
    let path = std::env::args_os()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(config::default_config_path);
    let cfg = config::load_config(&path)?;
    logging::init(&cfg.logging)?;
    tracing::info!("Loaded config from {}", path.display());

    let mut bridge = build_bridge(&cfg);
    if let Err(e) = bridge.run().await {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
    Ok(())
}

fn describe(ev: &IrcEvent) -> String {
    match &ev.channel {
        Some(channel) => format!("{} in {}", ev.nick, channel),
        None => format!("{} (private)", ev.nick),
    }
}

/// A bridge whose handlers only log what they see.
fn build_bridge(cfg: &AppConfig) -> Bridge {
    let mut bridge = Bridge::new(cfg.irc.clone());
    let handlers = bridge.handlers();
    handlers.on_connected(|| {
        tracing::info!("Ready");
        Ok(())
    });
    handlers.on_message(|ev| {
        tracing::info!("<{}> {}", describe(ev), ev.message.as_deref().unwrap_or(""));
        Ok(())
    });
    handlers.on_action(|ev| {
        tracing::info!("* {} {}", describe(ev), ev.message.as_deref().unwrap_or(""));
        Ok(())
    });
    handlers.on_join(|ev| {
        tracing::info!("{} joined", describe(ev));
        Ok(())
    });
    handlers.on_part(|ev| {
        tracing::info!("{} left", describe(ev));
        Ok(())
    });
    handlers.on_kick(|ev| {
        tracing::info!(
            "{} kicked {}",
            describe(ev),
            ev.othernick.as_deref().unwrap_or("")
        );
        Ok(())
    });
    bridge
}
