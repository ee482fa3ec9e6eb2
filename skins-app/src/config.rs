//! Configuration loading from environment.

use std::env;
use std::time::Duration;

use anyhow::Context;
use btc_rates::RateSourceConfig;
use rust_decimal::Decimal;

/// Application configuration.
#[derive(Debug)]
pub struct Config {
    pub port: u16,
    /// `None` selects the in-memory repository.
    pub database_url: Option<String>,
    pub rate_source: RateSourceConfig,
    pub rate_cache_ttl: Duration,
    pub discount_percent: Decimal,
}

impl Config {
    /// Loads configuration from environment variables.
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(get: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let var = |key: &str| get(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let port = var("PORT")
            .unwrap_or_else(|| "5042".to_string())
            .parse()
            .context("PORT must be a port number")?;

        let rate_cache_ttl = match var("RATE_CACHE_TTL_SECS") {
            Some(secs) => Duration::from_secs(
                secs.parse()
                    .context("RATE_CACHE_TTL_SECS must be a whole number of seconds")?,
            ),
            None => btc_rates::DEFAULT_TTL,
        };

        let discount_percent = match var("DISCOUNT_PERCENT") {
            Some(pct) => pct
                .parse()
                .context("DISCOUNT_PERCENT must be a decimal number")?,
            None => Decimal::ZERO,
        };

        Ok(Self {
            port,
            database_url: var("DATABASE_URL"),
            rate_source: RateSourceConfig {
                base_url: var("BTC_API_BASE_URL"),
                fallback_url: var("BTC_API_URL"),
                api_key: var("BTC_API_KEY"),
            },
            rate_cache_ttl,
            discount_percent,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(pairs: &[(&str, &str)]) -> anyhow::Result<Config> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| map.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = load(&[]).unwrap();

        assert_eq!(config.port, 5042);
        assert!(config.database_url.is_none());
        assert!(config.rate_source.base_url.is_none());
        assert_eq!(config.rate_cache_ttl, Duration::from_secs(30));
        assert_eq!(config.discount_percent, Decimal::ZERO);
    }

    #[test]
    fn test_overrides() {
        let config = load(&[
            ("PORT", "8080"),
            ("DATABASE_URL", "sqlite://data/skins.db?mode=rwc"),
            ("BTC_API_URL", "https://api.example.com/price"),
            ("BTC_API_KEY", "k"),
            ("RATE_CACHE_TTL_SECS", "5"),
            ("DISCOUNT_PERCENT", "12.5"),
        ])
        .unwrap();

        assert_eq!(config.port, 8080);
        assert_eq!(
            config.database_url.as_deref(),
            Some("sqlite://data/skins.db?mode=rwc")
        );
        assert_eq!(
            config.rate_source.fallback_url.as_deref(),
            Some("https://api.example.com/price")
        );
        assert_eq!(config.rate_source.api_key.as_deref(), Some("k"));
        assert_eq!(config.rate_cache_ttl, Duration::from_secs(5));
        assert_eq!(config.discount_percent, Decimal::new(125, 1));
    }

    #[test]
    fn test_blank_values_count_as_unset() {
        let config = load(&[("DATABASE_URL", "  "), ("BTC_API_KEY", "")]).unwrap();

        assert!(config.database_url.is_none());
        assert!(config.rate_source.api_key.is_none());
    }

    #[test]
    fn test_invalid_numbers_are_errors() {
        assert!(load(&[("PORT", "http")]).is_err());
        assert!(load(&[("RATE_CACHE_TTL_SECS", "-1")]).is_err());
        assert!(load(&[("DISCOUNT_PERCENT", "ten")]).is_err());
    }
}
