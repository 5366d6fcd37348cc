//! Session configuration.
//!
//! Configuration arrives either as a typed [`SessionConfig`], as a JSON file,
//! or as a raw JSON mapping with case-insensitive keys (the shape produced by
//! most config loaders). Every field is optional; applying a config merges
//! the fields that are present over the stored configuration.

use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Configuration for a [`crate::SessionStore`].
///
/// Recognized keys mirror the backing-storage attributes: identity (`id`,
/// `name`, `var_session_id`), persistence (`path`, `expire`), cookie policy
/// (`domain`, `secure`, `httponly`, `use_cookies`), HTTP caching
/// (`cache_limiter`, `cache_expire`), plus the store's own `auto_start` flag
/// and default `prefix` scope.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Start the backing storage as soon as the config is applied.
    pub auto_start: Option<bool>,
    /// Explicit session id to seed the backing storage with.
    pub id: Option<String>,
    /// Session name (typically the cookie name).
    pub name: Option<String>,
    /// Save path for file-backed storage.
    pub path: Option<String>,
    /// Cookie domain.
    pub domain: Option<String>,
    /// Lifetime in seconds, applied to both server-side GC and the cookie.
    pub expire: Option<u64>,
    /// Mark the session cookie as secure.
    pub secure: Option<bool>,
    /// Mark the session cookie as http-only.
    pub httponly: Option<bool>,
    /// Whether the backing storage should use cookies at all.
    pub use_cookies: Option<bool>,
    /// HTTP cache limiter (e.g. "nocache", "private").
    pub cache_limiter: Option<String>,
    /// HTTP cache expiry in minutes.
    pub cache_expire: Option<u64>,
    /// Name of the request parameter that seeds the session id.
    pub var_session_id: Option<String>,
    /// Default scope (prefix) for all session operations.
    pub prefix: Option<String>,
}

impl SessionConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::Io)?;
        let value: Value = serde_json::from_str(&content).map_err(ConfigError::Json)?;
        Self::from_value(value)
    }

    /// Load configuration from a raw JSON mapping.
    ///
    /// Keys are matched case-insensitively; unrecognized keys are ignored.
    pub fn from_value(value: Value) -> Result<Self, ConfigError> {
        let Value::Object(map) = value else {
            return Err(ConfigError::NotAMapping);
        };

        let lowered: Map<String, Value> = map
            .into_iter()
            .map(|(k, v)| (k.to_ascii_lowercase(), v))
            .collect();

        serde_json::from_value(Value::Object(lowered)).map_err(ConfigError::Json)
    }

    /// Merge another configuration over this one.
    ///
    /// Fields present in `other` win; absent fields leave the stored value
    /// untouched.
    pub fn merge(&mut self, other: SessionConfig) {
        macro_rules! take {
            ($field:ident) => {
                if other.$field.is_some() {
                    self.$field = other.$field;
                }
            };
        }

        take!(auto_start);
        take!(id);
        take!(name);
        take!(path);
        take!(domain);
        take!(expire);
        take!(secure);
        take!(httponly);
        take!(use_cookies);
        take!(cache_limiter);
        take!(cache_expire);
        take!(var_session_id);
        take!(prefix);
    }

    /// Whether auto-start is requested.
    pub fn auto_start(&self) -> bool {
        self.auto_start.unwrap_or(false)
    }
}

/// Configuration errors.
#[derive(Debug)]
pub enum ConfigError {
    /// IO error reading config file.
    Io(std::io::Error),
    /// JSON parsing error.
    Json(serde_json::Error),
    /// The supplied value was not a JSON mapping.
    NotAMapping,
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(e) => write!(f, "failed to read config file: {}", e),
            Self::Json(e) => write!(f, "failed to parse config: {}", e),
            Self::NotAMapping => write!(f, "config value is not a mapping"),
        }
    }
}

impl std::error::Error for ConfigError {}
