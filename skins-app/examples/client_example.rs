//! Client example demonstrating the purchase flow against a running server.
//!
//! A stub BTC quote endpoint is started in-process, so no network access is
//! needed.
//!
//! Run with: cargo run -p skins-app --example client_example --features sqlite

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{Json, Router, routing::get};
use btc_rates::{HttpRateSource, RateCache, RateSourceConfig};
use rust_decimal::Decimal;
use skins_client::{ClientError, SkinsClient};
use skins_hex::{MarkdownPriceCalculator, PurchaseService, SkinService, inbound::HttpServer};
use skins_repo::build_repo;
use skins_types::SkinId;
use tempfile::tempdir;
use tokio::net::TcpListener;

/// Serves `app` on an ephemeral port.
async fn spawn(app: Router) -> anyhow::Result<SocketAddr> {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    Ok(addr)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt().with_env_filter("info").init();

    // Stub quote endpoint in the CoinGecko shape
    let quotes = spawn(Router::new().route(
        "/simple/price",
        get(|| async { Json(serde_json::json!({"bitcoin": {"usd": "65000.00"}})) }),
    ))
    .await?;

    // Use a temp file-backed SQLite DB
    let tmp = tempdir()?;
    let db_path = tmp.path().join("skins.db");
    let db_url = format!("sqlite://{}?mode=rwc", db_path.display());

    println!("🚀 Starting server...");
    println!("   Database: {db_url}");

    // Build repository (handles connection and migration)
    let repo = Arc::new(build_repo(Some(&db_url)).await?);

    let rates = Arc::new(RateCache::with_default_ttl(HttpRateSource::new(
        RateSourceConfig {
            base_url: None,
            fallback_url: Some(format!(
                "http://{quotes}/simple/price?ids=bitcoin&vs_currencies=usd"
            )),
            api_key: None,
        },
    )));
    let pricing = Arc::new(MarkdownPriceCalculator::new(Decimal::from(5))?);

    // Start server in background
    let purchases = PurchaseService::new(repo.clone(), pricing.clone(), rates);
    let skins = SkinService::new(repo, pricing);
    let addr = spawn(HttpServer::new(purchases, skins).router()).await?;

    // Create client
    let base_url = format!("http://{addr}");
    let client = SkinsClient::new(&base_url);

    // ─────────────────────────────────────────────────────────────────────────
    // Demo: Full purchase flow
    // ─────────────────────────────────────────────────────────────────────────

    // Health check
    let health = client.health().await?;
    println!("✅ Server health: {health}");

    // Catalog is public
    for skin in client.list_skins().await? {
        println!(
            "   - #{} {}: ${} (list ${})",
            skin.id, skin.name, skin.final_price_usd, skin.base_price_usd
        );
    }

    // Buying without an identity is rejected
    let response = client.buy_skin(SkinId::new(1)).await;
    assert!(matches!(response, Err(ClientError::Api { status: 401, .. })));
    println!("✅ Unauthorized without a user id");

    let alice = SkinsClient::new(&base_url).with_user_id("alice");
    let bob = SkinsClient::new(&base_url).with_user_id("bob");

    let purchase = alice.buy_skin(SkinId::new(2)).await?;
    println!(
        "✅ Alice bought skin {} for ${} at BTC/USD {:?} (purchase={})",
        purchase.skin_id, purchase.paid_amount_usd, purchase.btc_price_at_moment, purchase.id
    );

    // Unknown skin
    let missing = alice.buy_skin(SkinId::new(99)).await;
    println!("✅ Unknown skin rejected: {}", missing.unwrap_err());

    // Ownership
    let theirs = bob.get_purchase(purchase.id).await;
    assert!(matches!(theirs, Err(ClientError::Api { status: 403, .. })));
    println!("✅ Bob cannot read Alice's purchase");

    let history = alice.purchase_history().await?;
    println!("\n📋 Alice's purchases:");
    for p in history {
        println!("   - #{} skin {} ${} at {}", p.id, p.skin_id, p.paid_amount_usd, p.purchased_at);
    }

    println!("\n🎉 Example completed successfully!");

    Ok(())
}
