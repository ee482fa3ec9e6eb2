//! # Skins Application
//!
//! Binary that wires together all the components:
//! - Load configuration from environment
//! - Initialize the repository adapter
//! - Build the BTC rate cache and price calculator
//! - Create the services and start the HTTP server

mod config;

use std::sync::Arc;

use opentelemetry::global;
use opentelemetry_sdk::{propagation::TraceContextPropagator, trace as sdktrace};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use btc_rates::{HttpRateSource, RateCache};
use skins_hex::{MarkdownPriceCalculator, PurchaseService, SkinService, inbound::HttpServer};
use skins_repo::build_repo;

fn init_tracer() -> anyhow::Result<(sdktrace::Tracer, sdktrace::SdkTracerProvider)> {
    global::set_text_map_propagator(TraceContextPropagator::new());

    // Use gRPC exporter with batch processing (non-blocking)
    let exporter = opentelemetry_otlp::SpanExporter::builder()
        .with_tonic()
        .build()?;

    let provider = sdktrace::SdkTracerProvider::builder()
        .with_batch_exporter(exporter)
        .build();

    global::set_tracer_provider(provider.clone());

    use opentelemetry::trace::TracerProvider as _;
    Ok((provider.tracer("skins-service"), provider))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize OpenTelemetry tracing
    let (otel_tracer, otel_provider) = init_tracer()?;
    let telemetry = tracing_opentelemetry::layer().with_tracer(otel_tracer);

    // Initialize tracing subscriber
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "info,skins_app=debug,skins_hex=debug,btc_rates=debug".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .with(telemetry)
        .init();

    // Load configuration
    let config = config::Config::from_env()?;

    tracing::info!("Starting skin store on port {}", config.port);
    match &config.database_url {
        Some(url) => tracing::info!("Using database: {}", url),
        None => tracing::info!("Using in-memory store"),
    }
    if config.rate_source.base_url.is_none() && config.rate_source.fallback_url.is_none() {
        tracing::warn!("neither BTC_API_BASE_URL nor BTC_API_URL is set; purchases will fail");
    }

    // Build repository (handles connection and migration)
    let repo = Arc::new(build_repo(config.database_url.as_deref()).await?);

    // Rate cache shared by every purchase request
    let source = HttpRateSource::new(config.rate_source.clone());
    let rates = Arc::new(RateCache::new(source, config.rate_cache_ttl));

    let pricing = Arc::new(MarkdownPriceCalculator::new(config.discount_percent)?);

    // Create the services
    let purchases = PurchaseService::new(repo.clone(), pricing.clone(), rates);
    let skins = SkinService::new(repo, pricing);

    // Create and run the HTTP server
    let server = HttpServer::new(purchases, skins);
    let addr = format!("0.0.0.0:{}", config.port);

    server.run(&addr).await?;

    // Ensure traces are flushed before exit
    let _ = otel_provider.shutdown();
    Ok(())
}
