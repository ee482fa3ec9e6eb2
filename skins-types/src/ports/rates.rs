//! Exchange rate provider port.
//!
//! Implementations fetch the BTC/USD quote, typically through a cache.

use tokio_util::sync::CancellationToken;

use crate::domain::RateQuote;
use crate::error::RateError;

/// Port trait for the BTC/USD rate.
#[async_trait::async_trait]
pub trait RateProvider: Send + Sync {
    /// Returns the current quote.
    ///
    /// Transient upstream failures come back as `Ok(RateQuote::Unavailable)`.
    /// Only configuration problems and cancellation of `cancel` are errors.
    async fn get_rate(&self, cancel: &CancellationToken) -> Result<RateQuote, RateError>;
}
