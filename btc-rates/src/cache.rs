//! Single-flight, TTL-bounded cache around a [`RateSource`].
//!
//! One global BTC/USD quote is tracked. On a miss exactly one caller starts
//! the fetch; everyone else who arrives while it runs awaits the same shared
//! future and gets the same outcome. Failures are never cached: once the
//! in-flight fetch settles, the next call is free to try again.

use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use futures::FutureExt;
use futures::future::Shared;
use rust_decimal::Decimal;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

use skins_types::{RateError, RateProvider, RateQuote};

use crate::parser::parse_rate_bytes;
use crate::source::{RateSource, SourceError};

/// Freshness window of a cached quote.
pub const DEFAULT_TTL: Duration = Duration::from_secs(30);

type FetchOutcome = Result<RateQuote, RateError>;
type SharedFetch = Shared<Pin<Box<dyn Future<Output = FetchOutcome> + Send>>>;

#[derive(Debug, Clone, Copy)]
struct CachedRate {
    value: Decimal,
    expires_at: Instant,
}

struct InFlight {
    generation: u64,
    /// Token of the caller that started the fetch.
    token: CancellationToken,
    fetch: SharedFetch,
}

#[derive(Default)]
struct CacheState {
    entry: Option<CachedRate>,
    in_flight: Option<InFlight>,
    next_generation: u64,
}

struct Inner<S> {
    source: S,
    ttl: Duration,
    state: Mutex<CacheState>,
}

impl<S> Inner<S> {
    fn lock_state(&self) -> MutexGuard<'_, CacheState> {
        // The guarded data stays consistent even if a holder panicked.
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Cache-aside wrapper that bounds calls to the upstream quote API.
///
/// Cloning is cheap and clones share the same entry.
pub struct RateCache<S: RateSource> {
    inner: Arc<Inner<S>>,
}

impl<S: RateSource> Clone for RateCache<S> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<S: RateSource> RateCache<S> {
    /// Creates a cache with the given TTL.
    pub fn new(source: S, ttl: Duration) -> Self {
        Self {
            inner: Arc::new(Inner {
                source,
                ttl,
                state: Mutex::new(CacheState::default()),
            }),
        }
    }

    /// Creates a cache with the 30 second default TTL.
    pub fn with_default_ttl(source: S) -> Self {
        Self::new(source, DEFAULT_TTL)
    }

    pub fn ttl(&self) -> Duration {
        self.inner.ttl
    }

    /// Returns the current quote, fetching it if the cached one is missing
    /// or expired.
    ///
    /// `Ok(RateQuote::Unavailable)` covers network errors, non-success
    /// statuses and unrecognized bodies. Errors are limited to a missing
    /// endpoint configuration and cancellation. If the caller that started a
    /// fetch is cancelled, every caller waiting on that fetch sees
    /// [`RateError::Cancelled`].
    pub async fn get_rate(&self, cancel: &CancellationToken) -> Result<RateQuote, RateError> {
        if cancel.is_cancelled() {
            return Err(RateError::Cancelled);
        }

        let fetch = {
            let mut state = self.inner.lock_state();

            if let Some(entry) = state.entry {
                if Instant::now() < entry.expires_at {
                    debug!(rate = %entry.value, "BTC rate cache hit");
                    return Ok(RateQuote::Live(entry.value));
                }
            }

            let pending = state
                .in_flight
                .as_ref()
                .filter(|f| !f.token.is_cancelled())
                .map(|f| f.fetch.clone());
            match pending {
                Some(fetch) => fetch,
                None => self.start_fetch(&mut state, cancel),
            }
        };

        tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                info!("BTC rate fetch canceled");
                self.discard_cancelled();
                Err(RateError::Cancelled)
            }
            outcome = fetch => outcome,
        }
    }

    /// Claims the population slot. Must be called with the state locked.
    fn start_fetch(&self, state: &mut CacheState, cancel: &CancellationToken) -> SharedFetch {
        let generation = state.next_generation;
        state.next_generation += 1;

        let fetch: SharedFetch = populate(Arc::clone(&self.inner), cancel.clone(), generation)
            .boxed()
            .shared();

        state.in_flight = Some(InFlight {
            generation,
            token: cancel.clone(),
            fetch: fetch.clone(),
        });
        fetch
    }

    /// Drops a fetch whose initiator was cancelled so the next caller starts
    /// a fresh one.
    fn discard_cancelled(&self) {
        let mut state = self.inner.lock_state();
        if state
            .in_flight
            .as_ref()
            .is_some_and(|f| f.token.is_cancelled())
        {
            state.in_flight = None;
        }
    }
}

impl<S: RateSource> Inner<S> {
    async fn fetch_and_parse(&self) -> FetchOutcome {
        let body = match self.source.fetch().await {
            Ok(body) => body,
            Err(SourceError::Configuration(msg)) => {
                error!(%msg, "BTC rate source is not configured");
                return Err(RateError::Configuration(msg));
            }
            Err(e) => {
                error!(error = %e, "Exception while fetching BTC rate");
                return Ok(RateQuote::Unavailable);
            }
        };

        match parse_rate_bytes(&body) {
            Ok(rate) => {
                info!(%rate, "BTC rate refreshed");
                Ok(RateQuote::Live(rate))
            }
            Err(e) => {
                warn!(error = %e, "Unexpected BTC API response");
                Ok(RateQuote::Unavailable)
            }
        }
    }
}

/// Body of the shared fetch. Releases the slot and stores a live quote.
async fn populate<S: RateSource>(
    inner: Arc<Inner<S>>,
    token: CancellationToken,
    generation: u64,
) -> FetchOutcome {
    let outcome = tokio::select! {
        biased;
        _ = token.cancelled() => Err(RateError::Cancelled),
        outcome = inner.fetch_and_parse() => outcome,
    };

    let mut state = inner.lock_state();
    if state
        .in_flight
        .as_ref()
        .is_some_and(|f| f.generation == generation)
    {
        state.in_flight = None;
    }
    if let Ok(RateQuote::Live(value)) = outcome {
        state.entry = Some(CachedRate {
            value,
            expires_at: Instant::now() + inner.ttl,
        });
    }
    outcome
}

#[async_trait::async_trait]
impl<S: RateSource> RateProvider for RateCache<S> {
    async fn get_rate(&self, cancel: &CancellationToken) -> Result<RateQuote, RateError> {
        RateCache::get_rate(self, cancel).await
    }
}
