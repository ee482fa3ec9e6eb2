//! OpenAPI specification and documentation.

#![allow(dead_code)] // Path functions are only used by utoipa for documentation generation

use skins_types::dto::{BuySkinRequest, PurchaseResponse, SkinResponse};
use utoipa::{
    Modify, OpenApi,
    openapi::security::{Http, HttpAuthScheme, SecurityScheme},
};

// Dummy functions to generate path documentation
// These are not the actual handlers, just for OpenAPI path generation

/// Health check endpoint
#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses(
        (status = 200, description = "Service is healthy", body = inline(serde_json::Value), example = json!({"status": "healthy"}))
    )
)]
async fn health() {}

/// List the skin catalog with current sale prices
#[utoipa::path(
    get,
    path = "/api/skins",
    tag = "skins",
    responses(
        (status = 200, description = "Skin catalog", body = Vec<SkinResponse>)
    )
)]
async fn list_skins() {}

/// Get a skin by ID
#[utoipa::path(
    get,
    path = "/api/skins/{id}",
    tag = "skins",
    params(
        ("id" = i64, Path, description = "Skin ID")
    ),
    responses(
        (status = 200, description = "Skin details", body = SkinResponse),
        (status = 404, description = "Skin not found")
    )
)]
async fn get_skin() {}

/// Buy a skin for the authenticated user
#[utoipa::path(
    post,
    path = "/api/purchases",
    tag = "purchases",
    request_body = BuySkinRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 201, description = "Purchase created", body = PurchaseResponse),
        (status = 400, description = "Skin not available"),
        (status = 401, description = "Unauthorized"),
        (status = 503, description = "Request cancelled before the rate was known")
    )
)]
async fn buy_skin() {}

/// Purchase history of the authenticated user
#[utoipa::path(
    get,
    path = "/api/purchases/history",
    tag = "purchases",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "The caller's purchases", body = Vec<PurchaseResponse>),
        (status = 401, description = "Unauthorized")
    )
)]
async fn purchase_history() {}

/// Get one of the authenticated user's purchases
#[utoipa::path(
    get,
    path = "/api/purchases/{id}",
    tag = "purchases",
    security(("bearer_auth" = [])),
    params(
        ("id" = i64, Path, description = "Purchase ID")
    ),
    responses(
        (status = 200, description = "Purchase details", body = PurchaseResponse),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Purchase belongs to another user"),
        (status = 404, description = "Purchase not found")
    )
)]
async fn get_purchase() {}

/// OpenAPI documentation for the skin store API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Skin Store API",
        version = "1.0.0",
        description = "Buy virtual skins priced in USD, with the BTC/USD rate recorded at purchase time.\n\n## Authentication\n\nPurchase endpoints use a mock bearer scheme: the token is taken as your user id.\n\n```\nAuthorization: Bearer alice\n```",
        license(name = "MIT"),
    ),
    paths(
        health,
        list_skins,
        get_skin,
        buy_skin,
        purchase_history,
        get_purchase,
    ),
    components(
        schemas(
            SkinResponse,
            BuySkinRequest,
            PurchaseResponse,
        )
    ),

    modifiers(&SecurityAddon),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "skins", description = "Skin catalog"),
        (name = "purchases", description = "Buying skins and reading purchase history"),
    )
)]
pub struct ApiDoc;

/// Security scheme modifier for Bearer token authentication.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
            );
        }
    }
}
