//! Upstream connection settings.
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `STOCKVIEW_STOOQ_BASE_URL` | `https://stooq.pl/q/d/l/` | CSV download endpoint |
//! | `STOCKVIEW_HTTP_TIMEOUT_MS` | `10000` | Per-request timeout in milliseconds |

use log::warn;

pub const DEFAULT_BASE_URL: &str = "https://stooq.pl/q/d/l/";
pub const DEFAULT_TIMEOUT_MS: u64 = 10_000;

pub const BASE_URL_ENV: &str = "STOCKVIEW_STOOQ_BASE_URL";
pub const TIMEOUT_ENV: &str = "STOCKVIEW_HTTP_TIMEOUT_MS";

/// Where and how patiently the fetcher talks to Stooq.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StooqConfig {
    pub base_url: String,
    pub timeout_ms: u64,
}

impl Default for StooqConfig {
    fn default() -> Self {
        Self {
            base_url: String::from(DEFAULT_BASE_URL),
            timeout_ms: DEFAULT_TIMEOUT_MS,
        }
    }
}

impl StooqConfig {
    /// Read overrides from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from an arbitrary key lookup; unusable values fall back to defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(base_url) = lookup(BASE_URL_ENV) {
            let base_url = base_url.trim();
            if base_url.is_empty() {
                warn!("{BASE_URL_ENV} is empty; using {DEFAULT_BASE_URL}");
            } else {
                config.base_url = base_url.to_owned();
            }
        }

        if let Some(raw) = lookup(TIMEOUT_ENV) {
            match raw.trim().parse::<u64>() {
                Ok(timeout_ms) if timeout_ms > 0 => config.timeout_ms = timeout_ms,
                _ => warn!("{TIMEOUT_ENV}='{raw}' is not a positive integer; using {DEFAULT_TIMEOUT_MS}"),
            }
        }

        config
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_without_overrides() {
        let config = StooqConfig::from_lookup(|_| None);
        assert_eq!(config, StooqConfig::default());
    }

    #[test]
    fn applies_overrides() {
        let config = StooqConfig::from_lookup(|key| match key {
            BASE_URL_ENV => Some(String::from("http://127.0.0.1:9000/csv")),
            TIMEOUT_ENV => Some(String::from("2500")),
            _ => None,
        });

        assert_eq!(config.base_url, "http://127.0.0.1:9000/csv");
        assert_eq!(config.timeout_ms, 2_500);
    }

    #[test]
    fn ignores_unusable_timeout() {
        for raw in ["0", "soon", "-5"] {
            let config = StooqConfig::from_lookup(|key| {
                (key == TIMEOUT_ENV).then(|| String::from(raw))
            });
            assert_eq!(config.timeout_ms, DEFAULT_TIMEOUT_MS);
        }
    }
}
