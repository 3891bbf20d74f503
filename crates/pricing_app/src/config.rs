use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use pricing_core::RetryPolicy;
use pricing_engine::{ResolverSettings, RunSettings};
use pricing_logging::{price_info, price_warn};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Looked up in the working directory when no `--config` is given.
pub const DEFAULT_CONFIG_FILE: &str = "pricing.ron";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: ron::error::SpannedError,
    },
}

/// Tunables for a fetch run. Every field is optional in the file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    pub endpoint: String,
    pub domain: u32,
    pub offers: u32,
    pub request_timeout_secs: u64,
    pub pacing_ms: u64,
    pub short_cooldown_secs: u64,
    pub long_cooldown_secs: u64,
    pub poll_interval_ms: u64,
    pub countdown_interval_secs: u64,
    pub snapshot_every: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        let resolver = ResolverSettings::default();
        let policy = RetryPolicy::default();
        let run = RunSettings::default();
        Self {
            endpoint: resolver.endpoint,
            domain: resolver.domain,
            offers: resolver.offers,
            request_timeout_secs: resolver.request_timeout.as_secs(),
            pacing_ms: run.pacing.as_millis() as u64,
            short_cooldown_secs: policy.short_cooldown.as_secs(),
            long_cooldown_secs: policy.long_cooldown.as_secs(),
            poll_interval_ms: run.poll_interval.as_millis() as u64,
            countdown_interval_secs: run.countdown_interval.as_secs(),
            snapshot_every: run.snapshot_every,
        }
    }
}

impl AppConfig {
    /// Loads `explicit` if given (it must exist), otherwise `pricing.ron` in the
    /// working directory when present, otherwise defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        let path = match explicit {
            Some(path) => path.to_path_buf(),
            None => {
                let fallback = PathBuf::from(DEFAULT_CONFIG_FILE);
                if !fallback.is_file() {
                    return Ok(Self::default());
                }
                fallback
            }
        };

        let text = fs::read_to_string(&path).map_err(|source| ConfigError::Read {
            path: path.clone(),
            source,
        })?;
        let config = Self::parse(&text).map_err(|source| ConfigError::Parse {
            path: path.clone(),
            source,
        })?;
        price_info!("Loaded config from {:?}", path);
        Ok(config)
    }

    pub fn parse(text: &str) -> Result<Self, ron::error::SpannedError> {
        let config: Self = ron::from_str(text)?;
        if !(500..=800).contains(&config.pacing_ms) {
            price_warn!(
                "pacing_ms={} is outside the usual 500..=800 range",
                config.pacing_ms
            );
        }
        Ok(config)
    }

    pub fn resolver_settings(&self, api_key: String) -> ResolverSettings {
        ResolverSettings {
            endpoint: self.endpoint.clone(),
            api_key,
            domain: self.domain,
            offers: self.offers,
            request_timeout: Duration::from_secs(self.request_timeout_secs),
            ..ResolverSettings::default()
        }
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy::new(
            Duration::from_secs(self.long_cooldown_secs),
            Duration::from_secs(self.short_cooldown_secs),
        )
    }

    pub fn run_settings(&self) -> RunSettings {
        RunSettings {
            pacing: Duration::from_millis(self.pacing_ms),
            poll_interval: Duration::from_millis(self.poll_interval_ms),
            countdown_interval: Duration::from_secs(self.countdown_interval_secs),
            snapshot_every: self.snapshot_every,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_means_defaults() {
        assert_eq!(AppConfig::parse("()").unwrap(), AppConfig::default());
    }

    #[test]
    fn partial_file_overrides_only_named_fields() {
        let config = AppConfig::parse("(domain: 1, long_cooldown_secs: 60, pacing_ms: 750)").unwrap();
        assert_eq!(config.domain, 1);
        assert_eq!(config.offers, 20);
        assert_eq!(config.retry_policy().long_cooldown, Duration::from_secs(60));
        assert_eq!(config.retry_policy().short_cooldown, Duration::from_secs(10));
        assert_eq!(config.run_settings().pacing, Duration::from_millis(750));
    }

    #[test]
    fn resolver_settings_carry_the_key() {
        let settings = AppConfig::default().resolver_settings("abc".to_string());
        assert_eq!(settings.api_key, "abc");
        assert_eq!(settings.request_timeout, Duration::from_secs(10));
        assert_eq!(settings.domain, 5);
    }

    #[test]
    fn explicit_missing_file_is_an_error() {
        let temp = tempfile::TempDir::new().unwrap();
        let err = AppConfig::load(Some(&temp.path().join("nope.ron"))).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }

    #[test]
    fn unknown_field_is_a_parse_error() {
        assert!(AppConfig::parse("(pacing: 3)").is_err());
    }
}
