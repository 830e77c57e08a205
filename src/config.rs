//! Configuration management for clientdesk.
//!
//! Handles loading and saving configuration from JSONC files and resolving
//! the API base URL from flags, environment and file settings.

use anyhow::{Context, Result};
use dirs::config_dir;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Environment variable overriding the API base URL.
pub const API_URL_ENV: &str = "CLIENTDESK_API_URL";

/// Base URL used when nothing else is configured.
pub const DEFAULT_API_URL: &str = "http://localhost:3000";

/// Application configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Base URL of the clients API (without `/api/clients`)
    pub api_url: Option<String>,
    /// Page opened in a browser by the wake-up action, for hosts that sleep
    pub wake_url: Option<String>,
    /// Per-request timeout in seconds
    pub request_timeout_secs: u64,
    /// Log file path (relative to config dir or absolute)
    pub log_file: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: None,
            wake_url: None,
            request_timeout_secs: 60,
            log_file: "clientdesk.log".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from file.
    ///
    /// # Arguments
    /// * `path` - Optional path to config file. If None, uses default location.
    ///
    /// # Returns
    /// * `Result<Config>` - Loaded configuration or error
    ///
    /// # Details
    /// Searches for config file in:
    /// 1. Provided path (if given)
    /// 2. `$XDG_CONFIG_HOME/clientdesk/config.jsonc`
    /// 3. `~/.config/clientdesk/config.jsonc`
    ///
    /// If no config file exists, returns default configuration.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config_path = if let Some(p) = path {
            p.to_path_buf()
        } else {
            Self::default_config_path()?
        };

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read config file: {}", config_path.display()))?;

        let config: Config = serde_json::from_str(&strip_line_comments(&content))
            .with_context(|| format!("Failed to parse config file: {}", config_path.display()))?;

        Ok(config)
    }

    /// Save configuration to file.
    ///
    /// # Details
    /// Creates config directory if it doesn't exist.
    #[allow(dead_code)] // Useful for writing a starter config
    pub fn save(&self, path: Option<&Path>) -> Result<()> {
        let config_path = if let Some(p) = path {
            p.to_path_buf()
        } else {
            Self::default_config_path()?
        };

        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let json = serde_json::to_string_pretty(self).context("Failed to serialize config")?;

        fs::write(&config_path, json)
            .with_context(|| format!("Failed to write config file: {}", config_path.display()))?;

        Ok(())
    }

    /// Get default configuration file path.
    ///
    /// # Returns
    /// * `Result<PathBuf>` - `$XDG_CONFIG_HOME/clientdesk/config.jsonc` or error
    pub fn default_config_path() -> Result<PathBuf> {
        Ok(app_config_dir()?.join("config.jsonc"))
    }

    /// Get log file path.
    ///
    /// # Details
    /// If log_file is absolute, returns it as-is.
    /// Otherwise, returns path relative to config directory.
    pub fn log_file_path(&self) -> Result<PathBuf> {
        let log_path = Path::new(&self.log_file);
        if log_path.is_absolute() {
            Ok(log_path.to_path_buf())
        } else {
            Ok(app_config_dir()?.join(&self.log_file))
        }
    }

    /// Resolve the API base URL.
    ///
    /// # Arguments
    /// * `flag` - Value of `--api-url`, if given
    ///
    /// # Details
    /// Precedence: flag, then `CLIENTDESK_API_URL`, then `api_url` from the
    /// file, then [`DEFAULT_API_URL`]. Blank values are skipped.
    pub fn resolve_api_url(&self, flag: Option<&str>) -> String {
        let env = std::env::var(API_URL_ENV).ok();
        pick_api_url(flag, env.as_deref(), self.api_url.as_deref())
    }
}

fn app_config_dir() -> Result<PathBuf> {
    let config_dir =
        config_dir().ok_or_else(|| anyhow::anyhow!("Failed to determine config directory"))?;
    Ok(config_dir.join("clientdesk"))
}

fn pick_api_url(flag: Option<&str>, env: Option<&str>, file: Option<&str>) -> String {
    [flag, env, file]
        .into_iter()
        .flatten()
        .map(str::trim)
        .find(|v| !v.is_empty())
        .unwrap_or(DEFAULT_API_URL)
        .to_string()
}

/// Strip `//` comments that are not inside a string literal.
fn strip_line_comments(content: &str) -> String {
    content
        .lines()
        .map(|line| {
            // An even number of quotes before `//` means we're outside a
            // string. URLs put `//` inside strings, so check every occurrence.
            // Escaped quotes are not handled.
            for (comment_pos, _) in line.match_indices("//") {
                let before_comment = &line[..comment_pos];
                if before_comment.matches('"').count() % 2 == 0 {
                    return before_comment.trim_end();
                }
            }
            line
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert!(config.api_url.is_none());
        assert!(config.wake_url.is_none());
        assert_eq!(config.request_timeout_secs, 60);
    }

    #[test]
    fn test_config_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("nested").join("config.jsonc");

        let config = Config {
            api_url: Some("https://clients.example.test".to_string()),
            request_timeout_secs: 5,
            ..Config::default()
        };

        config.save(Some(&config_path)).unwrap();
        assert!(config_path.exists());

        let loaded = Config::load(Some(&config_path)).unwrap();
        assert_eq!(loaded.api_url.as_deref(), Some("https://clients.example.test"));
        assert_eq!(loaded.request_timeout_secs, 5);
    }

    #[test]
    fn test_config_jsonc_with_comments() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.jsonc");

        let jsonc_content = r#"{
            // Where the backend lives
            "api_url": "http://10.0.0.2:3000", // trailing comment
            "wake_url": "https://backend.example.test"
        }"#;

        fs::write(&config_path, jsonc_content).unwrap();

        let loaded = Config::load(Some(&config_path)).unwrap();
        assert_eq!(loaded.api_url.as_deref(), Some("http://10.0.0.2:3000"));
        assert_eq!(loaded.wake_url.as_deref(), Some("https://backend.example.test"));
        assert_eq!(loaded.log_file, "clientdesk.log");
    }

    #[test]
    fn test_missing_config_file_gives_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let loaded = Config::load(Some(&temp_dir.path().join("absent.jsonc"))).unwrap();
        assert!(loaded.api_url.is_none());
    }

    #[test]
    fn test_api_url_precedence() {
        assert_eq!(
            pick_api_url(Some("http://flag"), Some("http://env"), Some("http://file")),
            "http://flag"
        );
        assert_eq!(
            pick_api_url(None, Some("http://env"), Some("http://file")),
            "http://env"
        );
        assert_eq!(pick_api_url(None, Some("  "), Some("http://file")), "http://file");
        assert_eq!(pick_api_url(None, None, None), DEFAULT_API_URL);
    }

    #[test]
    fn test_absolute_log_path_kept() {
        let config = Config {
            log_file: "/tmp/clientdesk-test.log".to_string(),
            ..Config::default()
        };
        assert_eq!(
            config.log_file_path().unwrap(),
            PathBuf::from("/tmp/clientdesk-test.log")
        );
    }
}
