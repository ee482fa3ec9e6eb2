//! Rate source client: one HTTP GET to the configured quote endpoint.

use std::sync::Arc;

use reqwest::{Client, Url, header};

/// Errors from fetching a raw quote.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    /// No usable endpoint. Retrying will not help.
    #[error("no BTC API URL configured: {0}")]
    Configuration(String),

    #[error("request failed: {0}")]
    Network(String),

    #[error("upstream returned HTTP {0}")]
    Status(u16),
}

/// Leaf client returning the raw response body.
#[async_trait::async_trait]
pub trait RateSource: Send + Sync + 'static {
    async fn fetch(&self) -> Result<Vec<u8>, SourceError>;
}

#[async_trait::async_trait]
impl<T: RateSource + ?Sized> RateSource for Arc<T> {
    async fn fetch(&self) -> Result<Vec<u8>, SourceError> {
        (**self).fetch().await
    }
}

/// Endpoint settings for [`HttpRateSource`].
#[derive(Debug, Clone, Default)]
pub struct RateSourceConfig {
    /// Primary endpoint. Used as-is when it is an absolute URL.
    pub base_url: Option<String>,
    /// Absolute URL used when `base_url` is unset or not absolute.
    pub fallback_url: Option<String>,
    /// Sent as a bearer token when present.
    pub api_key: Option<String>,
}

/// reqwest-backed [`RateSource`].
pub struct HttpRateSource {
    http: Client,
    config: RateSourceConfig,
}

impl HttpRateSource {
    pub fn new(config: RateSourceConfig) -> Self {
        Self::with_client(Client::new(), config)
    }

    pub fn with_client(http: Client, config: RateSourceConfig) -> Self {
        Self { http, config }
    }

    /// Picks the request URL.
    ///
    /// An absolute base always wins. Otherwise the fallback must itself be
    /// absolute; a relative fallback has nothing to be joined onto.
    pub fn resolve_url(&self) -> Result<Url, SourceError> {
        let fallback = self
            .config
            .fallback_url
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty());
        let base = self
            .config
            .base_url
            .as_deref()
            .and_then(|s| Url::parse(s.trim()).ok());

        match (base, fallback) {
            (Some(base), _) => Ok(base),
            (None, Some(url)) => Url::parse(url).map_err(|_| {
                SourceError::Configuration(format!("BTC_API_URL {} is not absolute", url))
            }),
            (None, None) => Err(SourceError::Configuration(
                "set BTC_API_BASE_URL or BTC_API_URL".into(),
            )),
        }
    }
}

#[async_trait::async_trait]
impl RateSource for HttpRateSource {
    async fn fetch(&self) -> Result<Vec<u8>, SourceError> {
        let url = self.resolve_url()?;

        let mut req = self.http.get(url.clone());
        if let Some(key) = self.config.api_key.as_deref().filter(|k| !k.is_empty()) {
            req = req.header(header::AUTHORIZATION, format!("Bearer {}", key));
        }

        tracing::debug!(%url, "fetching BTC rate");
        let resp = req
            .send()
            .await
            .map_err(|e| SourceError::Network(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(SourceError::Status(status.as_u16()));
        }

        let body = resp
            .bytes()
            .await
            .map_err(|e| SourceError::Network(e.to_string()))?;
        Ok(body.to_vec())
    }
}
