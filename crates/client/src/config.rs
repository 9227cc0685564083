//! Client configuration structures and loaders.
use std::env;
use std::path::PathBuf;

/// Configuration required to bootstrap the runtime and the terminal loop.
#[derive(Clone, Debug)]
pub struct ClientConfig {
    /// Directory holding `campaign.toml`, `config.toml` and `levels/`.
    pub data_dir: PathBuf,
    pub log_dir: PathBuf,
    pub session_id: Option<String>,
    /// Level to start on instead of the first campaign level.
    pub start_level: Option<String>,
    pub command_buffer: usize,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(game_content::BUNDLED_DATA_DIR),
            log_dir: default_log_dir(),
            session_id: None,
            start_level: None,
            command_buffer: 32,
        }
    }
}

impl ClientConfig {
    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `CASTLE_DATA_DIR` - Content directory (default: bundled content)
    /// - `CASTLE_LOG_DIR` - Log directory (default: platform cache dir)
    /// - `CASTLE_SESSION_ID` - Session identifier for the log file (default: auto-generated)
    /// - `CASTLE_START_LEVEL` - Level identifier to start on (default: first campaign level)
    /// - `CASTLE_COMMAND_BUFFER` - Queued input lines per session (default: 32)
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(dir) = lookup("CASTLE_DATA_DIR") {
            config.data_dir = PathBuf::from(dir);
        }
        if let Some(dir) = lookup("CASTLE_LOG_DIR") {
            config.log_dir = PathBuf::from(dir);
        }
        config.session_id = lookup("CASTLE_SESSION_ID").filter(|id| !id.trim().is_empty());
        config.start_level = lookup("CASTLE_START_LEVEL").filter(|id| !id.trim().is_empty());

        let command_buffer = lookup("CASTLE_COMMAND_BUFFER").and_then(|v| v.parse::<usize>().ok());
        if let Some(capacity) = command_buffer {
            config.command_buffer = capacity.max(1);
        }

        config
    }
}

/// Platform cache directory for logs, e.g. `~/.cache/castle/logs` on Linux.
fn default_log_dir() -> PathBuf {
    directories::ProjectDirs::from("", "", "castle")
        .map(|dirs| dirs.cache_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("/tmp/castle"))
        .join("logs")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> ClientConfig {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ClientConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_point_at_bundled_content() {
        let config = config(&[]);
        assert_eq!(config.data_dir, PathBuf::from(game_content::BUNDLED_DATA_DIR));
        assert!(config.log_dir.ends_with("logs"));
        assert_eq!(config.session_id, None);
        assert_eq!(config.command_buffer, 32);
    }

    #[test]
    fn variables_override_defaults() {
        let config = config(&[
            ("CASTLE_DATA_DIR", "/srv/castle"),
            ("CASTLE_LOG_DIR", "/var/log/castle"),
            ("CASTLE_SESSION_ID", "night-run"),
            ("CASTLE_START_LEVEL", "sunken_crypt"),
            ("CASTLE_COMMAND_BUFFER", "0"),
        ]);
        assert_eq!(config.data_dir, PathBuf::from("/srv/castle"));
        assert_eq!(config.log_dir, PathBuf::from("/var/log/castle"));
        assert_eq!(config.session_id.as_deref(), Some("night-run"));
        assert_eq!(config.start_level.as_deref(), Some("sunken_crypt"));
        assert_eq!(config.command_buffer, 1);
    }

    #[test]
    fn blank_and_malformed_values_are_ignored() {
        let config = config(&[("CASTLE_SESSION_ID", "  "), ("CASTLE_COMMAND_BUFFER", "lots")]);
        assert_eq!(config.session_id, None);
        assert_eq!(config.command_buffer, 32);
    }
}
