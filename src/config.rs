//! Configuration loading and management

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;

/// Default grace period before the shortcut fires, in seconds
const DEFAULT_GRACE_SECS: u64 = 5;

/// Daemon configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Path to the Unix domain socket for IPC
    pub socket_path: PathBuf,

    /// Directory for runtime data
    pub data_dir: PathBuf,

    /// Delay between starting a session and the shortcut firing,
    /// giving the user time to focus the target window
    pub grace_period: Duration,
}

impl Config {
    /// Load configuration from environment and defaults
    pub fn load() -> Result<Self> {
        let home = std::env::var("HOME")?;
        let data_dir = PathBuf::from(&home)
            .join(".local")
            .join("share")
            .join("keytrigger");

        let socket_path = data_dir.join("daemon.sock");

        Ok(Self {
            socket_path,
            data_dir,
            grace_period: Duration::from_secs(grace_secs_from_env()),
        })
    }

    /// Ensure data directory exists
    pub fn ensure_dirs(&self) -> Result<()> {
        std::fs::create_dir_all(&self.data_dir)?;
        Ok(())
    }
}

/// Grace period in seconds, overridable via `KEYTRIGGER_GRACE_SECS`
pub fn grace_secs_from_env() -> u64 {
    std::env::var("KEYTRIGGER_GRACE_SECS")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(DEFAULT_GRACE_SECS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_load() {
        let config = Config::load().unwrap();
        assert!(config.socket_path.to_string_lossy().contains("keytrigger"));
        assert!(config.socket_path.ends_with("daemon.sock"));
    }

    #[test]
    fn test_default_grace_period() {
        let config = Config::load().unwrap();
        assert_eq!(config.grace_period, Duration::from_secs(5));
    }
}
