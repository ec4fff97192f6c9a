//! Configuration Module
//!
//! Validated adapter configuration, the sources it is read from, and the
//! server settings loaded from environment variables.

use std::collections::HashMap;
use std::env;

use serde_json::{Map, Value};

use crate::error::{CacheError, Result};

/// Option name holding the key namespace prefix.
pub const KEY_PREFIX_OPTION: &str = "keyPrefix";

/// Option name holding the default TTL in seconds.
pub const DEFAULT_TTL_OPTION: &str = "defaultTTL";

/// Options whose values are integers rather than strings.
const NUMERIC_OPTIONS: &[&str] = &[DEFAULT_TTL_OPTION];

// == Config Source ==
/// Read-only view over configuration options, consulted once at construction.
pub trait ConfigSource {
    /// Returns the raw value of an option, or None if it is not set.
    fn get(&self, option: &str) -> Option<Value>;
}

impl ConfigSource for HashMap<String, Value> {
    fn get(&self, option: &str) -> Option<Value> {
        HashMap::get(self, option).cloned()
    }
}

impl ConfigSource for Map<String, Value> {
    fn get(&self, option: &str) -> Option<Value> {
        Map::get(self, option).cloned()
    }
}

// == Env Config Source ==
/// Reads options from environment variables.
///
/// Option names are converted to upper snake case and prefixed, so with the
/// default `CACHE_` prefix `keyPrefix` is read from `CACHE_KEY_PREFIX` and
/// `defaultTTL` from `CACHE_DEFAULT_TTL`. Numeric options are returned as
/// JSON numbers when they parse as integers; all other values stay strings.
#[derive(Debug, Clone)]
pub struct EnvConfigSource {
    var_prefix: String,
}

impl EnvConfigSource {
    /// Creates a source reading `CACHE_*` variables.
    pub fn new() -> Self {
        Self::with_prefix("CACHE_")
    }

    /// Creates a source reading variables under a custom prefix.
    pub fn with_prefix(var_prefix: impl Into<String>) -> Self {
        Self {
            var_prefix: var_prefix.into(),
        }
    }

    /// Environment variable name for an option.
    pub fn var_name(&self, option: &str) -> String {
        let mut name = self.var_prefix.clone();
        let mut prev_lower = false;
        for ch in option.chars() {
            if ch.is_ascii_uppercase() && prev_lower {
                name.push('_');
            }
            prev_lower = ch.is_ascii_lowercase() || ch.is_ascii_digit();
            name.push(ch.to_ascii_uppercase());
        }
        name
    }
}

impl Default for EnvConfigSource {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigSource for EnvConfigSource {
    fn get(&self, option: &str) -> Option<Value> {
        let raw = env::var(self.var_name(option)).ok()?;
        if !NUMERIC_OPTIONS.contains(&option) {
            return Some(Value::String(raw));
        }
        match raw.trim().parse::<i64>() {
            Ok(n) => Some(Value::from(n)),
            Err(_) => Some(Value::String(raw)),
        }
    }
}

// == Adapter Config ==
/// Validated settings for a namespaced cache adapter.
///
/// Immutable once built: the prefix is never empty and the default TTL is
/// never negative.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdapterConfig {
    key_prefix: String,
    default_ttl: u64,
}

impl AdapterConfig {
    /// Builds a config from explicit values.
    ///
    /// # Errors
    /// `CacheError::Configuration` if the prefix is empty or the TTL is negative.
    pub fn new(key_prefix: impl Into<String>, default_ttl: i64) -> Result<Self> {
        let key_prefix = key_prefix.into();
        if key_prefix.is_empty() {
            return Err(CacheError::Configuration(format!(
                "{} must be a non-empty string",
                KEY_PREFIX_OPTION
            )));
        }
        let default_ttl = u64::try_from(default_ttl).map_err(|_| {
            CacheError::Configuration(format!(
                "{} must be an integer >= 0, got {}",
                DEFAULT_TTL_OPTION, default_ttl
            ))
        })?;

        Ok(Self {
            key_prefix,
            default_ttl,
        })
    }

    /// Reads `keyPrefix` and `defaultTTL` from a configuration source.
    ///
    /// # Errors
    /// `CacheError::Configuration` if an option is missing, has the wrong
    /// type, or fails validation.
    pub fn from_source(source: &dyn ConfigSource) -> Result<Self> {
        let key_prefix = match source.get(KEY_PREFIX_OPTION) {
            Some(Value::String(prefix)) => prefix,
            Some(other) => {
                return Err(CacheError::Configuration(format!(
                    "{} must be a non-empty string, got {}",
                    KEY_PREFIX_OPTION, other
                )))
            }
            None => {
                return Err(CacheError::Configuration(format!(
                    "{} is not configured",
                    KEY_PREFIX_OPTION
                )))
            }
        };

        let default_ttl = match source.get(DEFAULT_TTL_OPTION) {
            Some(value) => value.as_i64().ok_or_else(|| {
                CacheError::Configuration(format!(
                    "{} must be an integer >= 0, got {}",
                    DEFAULT_TTL_OPTION, value
                ))
            })?,
            None => {
                return Err(CacheError::Configuration(format!(
                    "{} is not configured",
                    DEFAULT_TTL_OPTION
                )))
            }
        };

        Self::new(key_prefix, default_ttl)
    }

    /// Namespace prepended to every key.
    pub fn key_prefix(&self) -> &str {
        &self.key_prefix
    }

    /// TTL in seconds used when a write does not specify one (0 = never expires).
    pub fn default_ttl(&self) -> u64 {
        self.default_ttl
    }
}

// == Server Config ==
/// Server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Maximum number of entries the in-memory store accepts
    pub max_entries: usize,
    /// HTTP server port
    pub server_port: u16,
    /// Expired-entry sweep interval in seconds
    pub sweep_interval: u64,
}

impl ServerConfig {
    /// Creates a new ServerConfig by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `MAX_ENTRIES` - Maximum store entries (default: 1000)
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    /// - `SWEEP_INTERVAL` - Sweep frequency in seconds (default: 1)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            max_entries: parse_env("MAX_ENTRIES").unwrap_or(defaults.max_entries),
            server_port: parse_env("SERVER_PORT").unwrap_or(defaults.server_port),
            sweep_interval: parse_env("SWEEP_INTERVAL").unwrap_or(defaults.sweep_interval),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            max_entries: 1000,
            server_port: 3000,
            sweep_interval: 1,
        }
    }
}

fn parse_env<T: std::str::FromStr>(name: &str) -> Option<T> {
    env::var(name).ok().and_then(|v| v.parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn source(prefix: Value, ttl: Value) -> HashMap<String, Value> {
        HashMap::from([
            (KEY_PREFIX_OPTION.to_string(), prefix),
            (DEFAULT_TTL_OPTION.to_string(), ttl),
        ])
    }

    #[test]
    fn test_adapter_config_valid() {
        let config = AdapterConfig::new("app:", 60).unwrap();
        assert_eq!(config.key_prefix(), "app:");
        assert_eq!(config.default_ttl(), 60);
    }

    #[test]
    fn test_adapter_config_empty_prefix() {
        let result = AdapterConfig::new("", 0);
        assert!(matches!(result, Err(CacheError::Configuration(_))));
    }

    #[test]
    fn test_adapter_config_negative_ttl() {
        let result = AdapterConfig::new("app:", -1);
        assert!(matches!(result, Err(CacheError::Configuration(_))));
    }

    #[test]
    fn test_from_source_valid() {
        let config = AdapterConfig::from_source(&source(json!("app:"), json!(0))).unwrap();
        assert_eq!(config.key_prefix(), "app:");
        assert_eq!(config.default_ttl(), 0);
    }

    #[test]
    fn test_from_source_missing_options() {
        let empty: HashMap<String, Value> = HashMap::new();
        assert!(matches!(
            AdapterConfig::from_source(&empty),
            Err(CacheError::Configuration(_))
        ));

        let mut only_prefix = HashMap::new();
        only_prefix.insert(KEY_PREFIX_OPTION.to_string(), json!("app:"));
        assert!(matches!(
            AdapterConfig::from_source(&only_prefix),
            Err(CacheError::Configuration(_))
        ));
    }

    #[test]
    fn test_from_source_wrong_types() {
        let non_string_prefix = source(json!(42), json!(0));
        assert!(matches!(
            AdapterConfig::from_source(&non_string_prefix),
            Err(CacheError::Configuration(_))
        ));

        let float_ttl = source(json!("app:"), json!(1.5));
        assert!(matches!(
            AdapterConfig::from_source(&float_ttl),
            Err(CacheError::Configuration(_))
        ));

        let string_ttl = source(json!("app:"), json!("60"));
        assert!(matches!(
            AdapterConfig::from_source(&string_ttl),
            Err(CacheError::Configuration(_))
        ));

        let negative_ttl = source(json!("app:"), json!(-5));
        assert!(matches!(
            AdapterConfig::from_source(&negative_ttl),
            Err(CacheError::Configuration(_))
        ));
    }

    #[test]
    fn test_from_json_map() {
        let map = json!({ "keyPrefix": "svc:", "defaultTTL": 300 });
        let map = map.as_object().unwrap();
        let config = AdapterConfig::from_source(map).unwrap();
        assert_eq!(config.key_prefix(), "svc:");
        assert_eq!(config.default_ttl(), 300);
    }

    #[test]
    fn test_env_var_names() {
        let source = EnvConfigSource::new();
        assert_eq!(source.var_name(KEY_PREFIX_OPTION), "CACHE_KEY_PREFIX");
        assert_eq!(source.var_name(DEFAULT_TTL_OPTION), "CACHE_DEFAULT_TTL");
    }

    #[test]
    fn test_env_source() {
        let source = EnvConfigSource::with_prefix("CONFIG_TEST_ENV_");
        env::set_var("CONFIG_TEST_ENV_KEY_PREFIX", "env:");
        env::set_var("CONFIG_TEST_ENV_DEFAULT_TTL", "120");

        let config = AdapterConfig::from_source(&source).unwrap();
        assert_eq!(config.key_prefix(), "env:");
        assert_eq!(config.default_ttl(), 120);

        env::set_var("CONFIG_TEST_ENV_DEFAULT_TTL", "soon");
        assert!(matches!(
            AdapterConfig::from_source(&source),
            Err(CacheError::Configuration(_))
        ));

        env::remove_var("CONFIG_TEST_ENV_KEY_PREFIX");
        env::remove_var("CONFIG_TEST_ENV_DEFAULT_TTL");
    }

    #[test]
    fn test_env_source_numeric_prefix_stays_string() {
        let source = EnvConfigSource::with_prefix("CONFIG_TEST_NUMERIC_");
        env::set_var("CONFIG_TEST_NUMERIC_KEY_PREFIX", "42");
        env::set_var("CONFIG_TEST_NUMERIC_DEFAULT_TTL", "0");

        assert_eq!(source.get(KEY_PREFIX_OPTION), Some(json!("42")));
        assert_eq!(source.get(DEFAULT_TTL_OPTION), Some(json!(0)));

        let config = AdapterConfig::from_source(&source).unwrap();
        assert_eq!(config.key_prefix(), "42");
        assert_eq!(config.default_ttl(), 0);

        env::remove_var("CONFIG_TEST_NUMERIC_KEY_PREFIX");
        env::remove_var("CONFIG_TEST_NUMERIC_DEFAULT_TTL");
    }

    #[test]
    fn test_server_config_default() {
        let config = ServerConfig::default();
        assert_eq!(config.max_entries, 1000);
        assert_eq!(config.server_port, 3000);
        assert_eq!(config.sweep_interval, 1);
    }
}
