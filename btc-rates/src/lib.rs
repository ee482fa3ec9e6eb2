//! BTC/USD rate acquisition for the skin store.
//!
//! Three layers, leaves first:
//! - [`source`] issues one HTTP GET to the configured quote endpoint
//! - [`parser`] pulls a decimal out of whichever known JSON shape came back
//! - [`cache`] wraps both in a single-flight cache with a short TTL
//!
//! # Example
//! ```no_run
//! use btc_rates::{HttpRateSource, RateCache, RateSourceConfig};
//! use skins_types::CancellationToken;
//!
//! # async fn run() -> Result<(), skins_types::RateError> {
//! let source = HttpRateSource::new(RateSourceConfig {
//!     fallback_url: Some("https://api.coingecko.com/api/v3/simple/price?ids=bitcoin&vs_currencies=usd".into()),
//!     ..Default::default()
//! });
//! let cache = RateCache::with_default_ttl(source);
//!
//! let quote = cache.get_rate(&CancellationToken::new()).await?;
//! println!("BTC/USD: {}", quote);
//! # Ok(())
//! # }
//! ```

pub mod cache;
pub mod parser;
pub mod source;

pub use cache::{DEFAULT_TTL, RateCache};
pub use parser::{RateParseError, parse_rate, parse_rate_bytes};
pub use source::{HttpRateSource, RateSource, RateSourceConfig, SourceError};
