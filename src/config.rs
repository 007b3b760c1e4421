use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;

/// Application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    pub ai: AiSettings,
    #[serde(default)]
    pub rate_limit: RateLimitSettings,
    #[serde(default)]
    pub retry: RetrySettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    pub workers: Option<usize>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AiSettings {
    pub endpoint: String,
    pub api_key: String,
    #[serde(default = "default_primary_model")]
    pub primary_model: String,
    #[serde(default = "default_fallback_model")]
    pub fallback_model: String,
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

fn default_primary_model() -> String { "styla-vision-pro".to_string() }
fn default_fallback_model() -> String { "styla-vision-lite".to_string() }
fn default_request_timeout() -> u64 { 30 }

/// Quotas for the two AI call sites; each gets its own limiter instance
#[derive(Debug, Clone, Deserialize)]
pub struct RateLimitSettings {
    #[serde(default = "default_generation_max_calls")]
    pub generation_max_calls: usize,
    #[serde(default = "default_generation_window")]
    pub generation_window_secs: u64,
    #[serde(default = "default_validation_max_calls")]
    pub validation_max_calls: usize,
    #[serde(default = "default_validation_window")]
    pub validation_window_secs: u64,
}

impl Default for RateLimitSettings {
    fn default() -> Self {
        Self {
            generation_max_calls: default_generation_max_calls(),
            generation_window_secs: default_generation_window(),
            validation_max_calls: default_validation_max_calls(),
            validation_window_secs: default_validation_window(),
        }
    }
}

fn default_generation_max_calls() -> usize { 15 }
fn default_generation_window() -> u64 { 60 }
fn default_validation_max_calls() -> usize { 20 }
fn default_validation_window() -> u64 { 60 }

#[derive(Debug, Clone, Deserialize)]
pub struct RetrySettings {
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,
    #[serde(default = "default_backoff_base_ms")]
    pub backoff_base_ms: u64,
}

impl Default for RetrySettings {
    fn default() -> Self {
        Self {
            max_attempts: default_max_attempts(),
            backoff_base_ms: default_backoff_base_ms(),
        }
    }
}

fn default_max_attempts() -> u32 { 3 }
fn default_backoff_base_ms() -> u64 { 2000 }

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String { "info".to_string() }
fn default_log_format() -> String { "json".to_string() }

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml, then config/local.toml)
    /// 3. Environment variables (prefixed with STYLA_)
    pub fn load() -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // e.g., STYLA_SERVER__PORT -> server.port
            .add_source(
                Environment::with_prefix("STYLA")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let settings = substitute_env_vars(settings)?;

        settings.try_deserialize()
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(
                Environment::with_prefix("STYLA")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings.try_deserialize()
    }
}

/// Pull AI credentials from plain environment variables when the prefixed
/// forms are absent, so deployments can reuse the provider's own var names.
fn substitute_env_vars(settings: Config) -> Result<Config, ConfigError> {
    use std::env;

    let api_key = env::var("STYLA_AI__API_KEY")
        .or_else(|_| env::var("AI_API_KEY"))
        .ok();
    let endpoint = env::var("STYLA_AI__ENDPOINT")
        .or_else(|_| env::var("AI_ENDPOINT"))
        .ok();

    let mut builder = Config::builder().add_source(settings);

    if let Some(api_key) = api_key {
        builder = builder.set_override("ai.api_key", api_key)?;
    }
    if let Some(endpoint) = endpoint {
        builder = builder.set_override("ai.endpoint", endpoint)?;
    }

    builder.build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_quotas() {
        let limits = RateLimitSettings::default();
        assert_eq!(limits.generation_max_calls, 15);
        assert_eq!(limits.generation_window_secs, 60);
        assert_eq!(limits.validation_max_calls, 20);
        assert_eq!(limits.validation_window_secs, 60);
    }

    #[test]
    fn test_default_retry() {
        let retry = RetrySettings::default();
        assert_eq!(retry.max_attempts, 3);
        assert_eq!(retry.backoff_base_ms, 2000);
    }

    #[test]
    fn test_default_logging() {
        let logging = LoggingSettings::default();
        assert_eq!(logging.level, "info");
        assert_eq!(logging.format, "json");
    }
}
