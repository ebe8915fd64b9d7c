//
//  github-rest
//  config/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Configuration Module
//!
//! The [`Config`] record is everything the request dispatcher reads: the API
//! host, the credential, the default repository and the debug flag. It is
//! built once, handed to [`GitHubClient::new`](crate::api::GitHubClient::new)
//! and never mutated afterwards.
//!
//! ## Sources
//!
//! Later sources override earlier ones:
//!
//! 1. Built-in defaults (`https://api.github.com`, no token, debug off)
//! 2. The TOML file at [`Config::config_path`]
//! 3. Environment variables (see [`Config::apply_env`])
//! 4. Command-line flags
//!
//! ## Configuration File Location
//!
//! - **Linux**: `~/.config/ghr/config.toml`
//! - **macOS**: `~/Library/Application Support/ghr/config.toml`
//! - **Windows**: `C:\Users\<User>\AppData\Roaming\ghr\config\config.toml`
//!
//! ## Example Configuration File
//!
//! ```toml
//! host = "https://ghe.company.com/api/v3"
//! owner = "platform"
//! repo = "deploy-tools"
//! debug = true
//! timeout_secs = 30
//! ```
//!
//! Tokens are normally kept in the system keyring by `ghr auth login`, but a
//! `token` key is honoured too.

mod hosts;

pub use hosts::*;

use std::fmt;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

/// Environment variable overriding the API host.
pub const ENV_HOST: &str = "GHR_HOST";
/// Environment variables holding a token, in precedence order.
pub const ENV_TOKENS: [&str; 2] = ["GH_TOKEN", "GITHUB_TOKEN"];
pub const ENV_OWNER: &str = "GHR_OWNER";
pub const ENV_REPO: &str = "GHR_REPO";
pub const ENV_DEBUG: &str = "GHR_DEBUG";
pub const ENV_TIMEOUT: &str = "GHR_TIMEOUT";

/// Why a configured host cannot be used as an API base URL.
#[derive(Debug, Error)]
pub enum InvalidHost {
    #[error(transparent)]
    Parse(#[from] url::ParseError),

    #[error("unsupported scheme `{0}` (expected http or https)")]
    Scheme(String),
}

/// Client configuration.
///
/// # Fields
///
/// | Field | Default | Effect |
/// |-------|---------|--------|
/// | `host` | `https://api.github.com` | Base URL prefixed to every request |
/// | `token` | `None` | Sent as `Authorization: token <value>` |
/// | `owner`, `repo` | `None` | Default repository for repository-scoped calls |
/// | `debug` | `false` | Logs every successful response |
/// | `timeout_secs` | `None` | Per-request timeout; `None` keeps the transport default |
///
/// # Examples
///
/// ```rust
/// use github_rest::config::Config;
///
/// let config = Config::default();
/// assert_eq!(config.host, "https://api.github.com");
/// assert!(config.token.is_none());
/// assert!(!config.debug);
/// ```
///
/// # Notes
///
/// - The `Debug` output redacts the token
/// - The token's shape is never validated
#[derive(Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    /// API base URL, e.g. `https://api.github.com` or
    /// `https://ghe.company.com/api/v3`.
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repo: Option<String>,

    #[serde(default)]
    pub debug: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

fn default_host() -> String {
    GITHUB_API.to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: default_host(),
            token: None,
            owner: None,
            repo: None,
            debug: false,
            timeout_secs: None,
        }
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("host", &self.host)
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .field("owner", &self.owner)
            .field("repo", &self.repo)
            .field("debug", &self.debug)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl Config {
    /// Keys accepted by [`Config::get`] and [`Config::set`].
    pub const KEYS: [&'static str; 6] = ["host", "token", "owner", "repo", "debug", "timeout_secs"];

    /// Loads configuration from the default location.
    ///
    /// A missing file is not an error; defaults are returned.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Loads configuration from a specific file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or is not valid
    /// TOML.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        toml::from_str(&content).with_context(|| format!("Failed to parse {}", path.display()))
    }

    /// Saves the configuration to the default location.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    /// Saves the configuration to a specific file, creating parent
    /// directories as needed.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        Ok(())
    }

    /// Returns the path to the configuration file.
    ///
    /// Uses the `directories` crate for cross-platform path resolution. The
    /// file may not exist yet.
    pub fn config_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("", "", crate::APP_NAME)
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;
        Ok(dirs.config_dir().join("config.toml"))
    }

    /// Applies overrides from the process environment.
    pub fn apply_process_env(&mut self) -> Result<()> {
        self.apply_env(|name| std::env::var(name).ok())
    }

    /// Applies overrides from an environment lookup.
    ///
    /// | Variable | Field |
    /// |----------|-------|
    /// | `GHR_HOST` | `host` (bare hostnames are expanded) |
    /// | `GH_TOKEN`, then `GITHUB_TOKEN` | `token` |
    /// | `GHR_OWNER` / `GHR_REPO` | `owner` / `repo` |
    /// | `GHR_DEBUG` | `debug` |
    /// | `GHR_TIMEOUT` | `timeout_secs` |
    ///
    /// Empty values are ignored.
    ///
    /// ```rust
    /// use std::collections::HashMap;
    /// use github_rest::config::Config;
    ///
    /// let env = HashMap::from([("GITHUB_TOKEN", "ghp_abc"), ("GHR_DEBUG", "1")]);
    /// let mut config = Config::default();
    /// config.apply_env(|name| env.get(name).map(|v| v.to_string())).unwrap();
    ///
    /// assert_eq!(config.token.as_deref(), Some("ghp_abc"));
    /// assert!(config.debug);
    /// ```
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        let lookup = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        if let Some(host) = lookup(ENV_HOST) {
            self.set("host", &host)?;
        }
        if let Some(token) = ENV_TOKENS.iter().find_map(|name| lookup(name)) {
            self.token = Some(token);
        }
        if let Some(owner) = lookup(ENV_OWNER) {
            self.owner = Some(owner);
        }
        if let Some(repo) = lookup(ENV_REPO) {
            self.set("repo", &repo)
                .with_context(|| format!("Invalid {}", ENV_REPO))?;
        }
        if let Some(debug) = lookup(ENV_DEBUG) {
            self.set("debug", &debug)
                .with_context(|| format!("Invalid {}", ENV_DEBUG))?;
        }
        if let Some(timeout) = lookup(ENV_TIMEOUT) {
            self.set("timeout_secs", &timeout)
                .with_context(|| format!("Invalid {}", ENV_TIMEOUT))?;
        }
        Ok(())
    }

    /// Keys accepted by [`Config::get`] and [`Config::set`].
    pub fn keys() -> &'static [&'static str] {
        &Self::KEYS
    }

    /// Checks that the configuration can back a client.
    pub fn validate(&self) -> Result<()> {
        self.base_url()
            .with_context(|| format!("Invalid host: {}", self.host))?;
        if self.timeout_secs == Some(0) {
            bail!("timeout_secs must be greater than zero");
        }
        Ok(())
    }

    /// The host parsed as an absolute `http`/`https` URL.
    pub fn base_url(&self) -> std::result::Result<Url, InvalidHost> {
        let url = Url::parse(self.host.trim())?;
        match url.scheme() {
            "http" | "https" => Ok(url),
            other => Err(InvalidHost::Scheme(other.to_string())),
        }
    }

    /// The default repository as `(owner, repo)`, when both are set.
    pub fn default_repository(&self) -> Option<(&str, &str)> {
        match (self.owner.as_deref(), self.repo.as_deref()) {
            (Some(owner), Some(repo)) if !owner.is_empty() && !repo.is_empty() => {
                Some((owner, repo))
            }
            _ => None,
        }
    }

    /// Gets a configuration value by key.
    ///
    /// Returns `None` for unknown keys and unset optional values.
    ///
    /// ```rust
    /// use github_rest::config::Config;
    ///
    /// let config = Config::default();
    /// assert_eq!(config.get("debug"), Some("false".to_string()));
    /// assert_eq!(config.get("owner"), None);
    /// assert_eq!(config.get("unknown_key"), None);
    /// ```
    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "host" => Some(self.host.clone()),
            "token" => self.token.clone(),
            "owner" => self.owner.clone(),
            "repo" => self.repo.clone(),
            "debug" => Some(self.debug.to_string()),
            "timeout_secs" => self.timeout_secs.map(|t| t.to_string()),
            _ => None,
        }
    }

    /// Sets a configuration value by key.
    ///
    /// `host` accepts a bare hostname or a URL; `repo` also accepts
    /// `OWNER/REPO` and then sets both fields.
    ///
    /// # Errors
    ///
    /// Fails for unknown keys and for values that do not parse.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let value = value.trim();
        match key {
            "host" => {
                let host = api_base_url(value);
                let candidate = Self {
                    host: host.clone(),
                    ..Self::default()
                };
                candidate
                    .base_url()
                    .with_context(|| format!("Invalid host: {}", value))?;
                self.host = host;
            }
            "token" => self.token = Some(value.to_string()),
            "owner" => self.owner = Some(value.to_string()),
            "repo" => match value.split_once('/') {
                Some((owner, repo)) if !owner.is_empty() && !repo.is_empty() => {
                    self.owner = Some(owner.to_string());
                    self.repo = Some(repo.to_string());
                }
                Some(_) => bail!("Invalid repository '{}'. Expected OWNER/REPO", value),
                None => self.repo = Some(value.to_string()),
            },
            "debug" => self.debug = parse_bool(value)?,
            "timeout_secs" => {
                let secs: u64 = value
                    .parse()
                    .with_context(|| format!("Invalid timeout: {}", value))?;
                if secs == 0 {
                    bail!("timeout_secs must be greater than zero");
                }
                self.timeout_secs = Some(secs);
            }
            _ => bail!(
                "Unknown configuration key '{}'. Valid keys: {}",
                key,
                Self::KEYS.join(", ")
            ),
        }
        Ok(())
    }

    /// Clears an optional value, or resets a required one to its default.
    pub fn unset(&mut self, key: &str) -> Result<()> {
        match key {
            "host" => self.host = default_host(),
            "token" => self.token = None,
            "owner" => self.owner = None,
            "repo" => self.repo = None,
            "debug" => self.debug = false,
            "timeout_secs" => self.timeout_secs = None,
            _ => bail!("Unknown configuration key '{}'", key),
        }
        Ok(())
    }
}

fn parse_bool(value: &str) -> Result<bool> {
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => bail!("Expected a boolean, got '{}'", other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.host, GITHUB_API);
        assert!(config.base_url().is_ok());
        assert!(config.default_repository().is_none());
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config.set("host", "ghe.corp.io").unwrap();
        config.set("repo", "platform/tools").unwrap();
        config.set("debug", "true").unwrap();
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded, config);
        assert_eq!(loaded.host, "https://ghe.corp.io/api/v3");
        assert_eq!(loaded.default_repository(), Some(("platform", "tools")));
    }

    #[test]
    fn test_load_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_load_partial_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "owner = \"octo\"\n").unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.host, GITHUB_API);
        assert_eq!(config.owner.as_deref(), Some("octo"));
    }

    #[test]
    fn test_apply_env_precedence() {
        let mut config = Config {
            token: Some("from-file".to_string()),
            ..Config::default()
        };
        config
            .apply_env(env(&[
                ("GITHUB_TOKEN", "from-github-token"),
                ("GH_TOKEN", "from-gh-token"),
                ("GHR_HOST", "ghe.corp.io"),
                ("GHR_OWNER", ""),
                ("GHR_TIMEOUT", "15"),
            ]))
            .unwrap();

        assert_eq!(config.token.as_deref(), Some("from-gh-token"));
        assert_eq!(config.host, "https://ghe.corp.io/api/v3");
        assert_eq!(config.owner, None);
        assert_eq!(config.timeout_secs, Some(15));
    }

    #[test]
    fn test_apply_env_rejects_bad_debug() {
        let mut config = Config::default();
        assert!(config.apply_env(env(&[("GHR_DEBUG", "maybe")])).is_err());
    }

    #[test]
    fn test_set_and_unset() {
        let mut config = Config::default();
        config.set("owner", "octo").unwrap();
        config.set("repo", "hello").unwrap();
        assert_eq!(config.default_repository(), Some(("octo", "hello")));

        assert!(config.set("repo", "/broken").is_err());
        assert!(config.set("timeout_secs", "soon").is_err());
        assert!(config.set("timeout_secs", "0").is_err());
        assert_eq!(config.timeout_secs, None);
        assert!(config.set("colour", "blue").is_err());

        config.unset("repo").unwrap();
        assert_eq!(config.get("repo"), None);
        assert!(config.unset("colour").is_err());
    }

    #[test]
    fn test_base_url_rejects_other_schemes() {
        let config = Config {
            host: "ftp://files.example.com".to_string(),
            ..Config::default()
        };
        assert!(matches!(config.base_url(), Err(InvalidHost::Scheme(s)) if s == "ftp"));
    }

    #[test]
    fn test_debug_output_redacts_token() {
        let config = Config {
            token: Some("ghp_supersecret".to_string()),
            ..Config::default()
        };
        let rendered = format!("{:?}", config);
        assert!(!rendered.contains("supersecret"));
        assert!(rendered.contains("<redacted>"));
    }
}
