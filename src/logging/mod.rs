//! Diagnostic logging setup.
//!
//! Installs a `tracing-subscriber` fmt subscriber. `RUST_LOG` wins over the
//! configured level so a single run can be made noisier without editing the
//! config file.

use crate::config::LoggingConfig;
use anyhow::{anyhow, Result};
use tracing_subscriber::EnvFilter;

fn build_filter(config: &LoggingConfig) -> Result<EnvFilter> {
    match EnvFilter::try_from_default_env() {
        Ok(filter) => Ok(filter),
        Err(_) => EnvFilter::try_new(&config.level)
            .map_err(|e| anyhow!("Invalid log level '{}': {}", config.level, e)),
    }
}

pub fn init(config: &LoggingConfig) -> Result<()> {
    let filter = build_filter(config)?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(config.ansi)
        .with_target(false)
        .try_init()
        .map_err(|e| anyhow!("Failed to install logger: {}", e))
}

#[cfg(test)]
pub mod testing {
    use std::io;
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct SharedBuf(Arc<Mutex<Vec<u8>>>);

    impl io::Write for SharedBuf {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    /// Run `f` with a thread-local subscriber and return what it logged.
    pub fn capture_logs(f: impl FnOnce()) -> String {
        let buf = SharedBuf::default();
        let writer = buf.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .without_time()
            .finish();
        tracing::subscriber::with_default(subscriber, f);
        let bytes = buf.0.lock().unwrap().clone();
        String::from_utf8_lossy(&bytes).into_owned()
    }

    pub fn count_warnings(output: &str) -> usize {
        output.lines().filter(|l| l.contains("WARN")).count()
    }
}
