//! Server arguments.
//!
//! | Option | Environment | Default |
//! |--------|-------------|---------|
//! | `--bind` | `STOCKVIEW_BIND` | `0.0.0.0:8000` |
//! | `--base-url` | `STOCKVIEW_STOOQ_BASE_URL` | `https://stooq.pl/q/d/l/` |
//! | `--timeout-ms` | `STOCKVIEW_HTTP_TIMEOUT_MS` | `10000` |
//!
//! Flags win over the environment, which wins over defaults.

use clap::Parser;
use stockview_core::StooqConfig;

pub const DEFAULT_BIND: &str = "0.0.0.0:8000";
pub const BIND_ENV: &str = "STOCKVIEW_BIND";

/// StockView - HTTP relay for Stooq historical prices
#[derive(Debug, Parser)]
#[command(
    name = "stockview",
    version,
    about = "HTTP relay for Stooq historical prices"
)]
pub struct Args {
    /// Address to listen on
    #[arg(long, value_name = "ADDR")]
    pub bind: Option<String>,

    /// Stooq CSV download endpoint
    #[arg(long, value_name = "URL")]
    pub base_url: Option<String>,

    /// Upstream request timeout in milliseconds
    #[arg(long, value_name = "MS", value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout_ms: Option<u64>,
}

impl Args {
    pub fn bind_addr(&self) -> String {
        self.bind
            .clone()
            .or_else(|| std::env::var(BIND_ENV).ok())
            .unwrap_or_else(|| String::from(DEFAULT_BIND))
    }

    /// Layer the flags over an environment-derived config.
    pub fn stooq_config(&self, base: StooqConfig) -> StooqConfig {
        let mut config = base;
        if let Some(base_url) = &self.base_url {
            config.base_url = base_url.clone();
        }
        if let Some(timeout_ms) = self.timeout_ms {
            config.timeout_ms = timeout_ms;
        }
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_override_base_config() {
        let args = Args::try_parse_from([
            "stockview",
            "--base-url",
            "http://127.0.0.1:9000/csv",
            "--timeout-ms",
            "250",
        ])
        .expect("args should parse");

        let config = args.stooq_config(StooqConfig::default());
        assert_eq!(config.base_url, "http://127.0.0.1:9000/csv");
        assert_eq!(config.timeout_ms, 250);
    }

    #[test]
    fn absent_flags_keep_base_config() {
        let args = Args::try_parse_from(["stockview"]).expect("args should parse");
        let base = StooqConfig::default().with_timeout_ms(4_000);
        assert_eq!(args.stooq_config(base.clone()), base);
    }

    #[test]
    fn rejects_zero_timeout() {
        assert!(Args::try_parse_from(["stockview", "--timeout-ms", "0"]).is_err());
    }

    #[test]
    fn explicit_bind_wins() {
        let args = Args::try_parse_from(["stockview", "--bind", "127.0.0.1:3000"])
            .expect("args should parse");
        assert_eq!(args.bind_addr(), "127.0.0.1:3000");
    }
}
