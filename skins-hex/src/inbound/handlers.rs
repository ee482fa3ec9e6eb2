//! HTTP request handlers.

use std::sync::Arc;

use axum::{
    Extension, Json,
    extract::{Path, State},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};

use skins_types::{
    AppError, BuySkinRequest, CancellationToken, PurchaseId, PurchaseResponse, SkinId,
};

use super::auth::AuthenticatedUser;
use crate::{PurchaseService, SkinService, StoreRepository};

/// Application state shared across handlers.
pub struct AppState<R: StoreRepository> {
    pub purchases: PurchaseService<R>,
    pub skins: SkinService<R>,
}

/// Wrapper to implement IntoResponse for AppError (orphan rule workaround).
pub struct ApiError(pub AppError);

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        ApiError(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self.0 {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg.clone()),
            AppError::Forbidden => (StatusCode::FORBIDDEN, "Forbidden".to_string()),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            AppError::ServiceUnavailable(msg) => (StatusCode::SERVICE_UNAVAILABLE, msg.clone()),
            AppError::Internal(msg) => {
                tracing::error!(error = %msg, "request failed");
                (StatusCode::INTERNAL_SERVER_ERROR, msg.clone())
            }
        };

        let body = serde_json::json!({
            "error": message,
            "code": status.as_u16()
        });

        (status, Json(body)).into_response()
    }
}

fn parse_purchase_id(raw: &str) -> Result<PurchaseId, AppError> {
    raw.parse()
        .map_err(|_| AppError::BadRequest("Invalid purchase ID".into()))
}

/// Health check endpoint.
pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "healthy" }))
}

// ─────────────────────────────────────────────────────────────────────────────
// Skins
// ─────────────────────────────────────────────────────────────────────────────

/// List the catalog.
#[tracing::instrument(skip(state))]
pub async fn list_skins<R: StoreRepository>(
    State(state): State<Arc<AppState<R>>>,
) -> Result<impl IntoResponse, ApiError> {
    let skins = state.skins.list_skins().await?;
    Ok(Json(skins))
}

/// Get a skin by ID.
#[tracing::instrument(skip(state), fields(skin_id = %id))]
pub async fn get_skin<R: StoreRepository>(
    State(state): State<Arc<AppState<R>>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let skin_id: SkinId = id
        .parse()
        .map_err(|_| AppError::BadRequest("Invalid skin ID".into()))?;

    let skin = state.skins.get_skin(skin_id).await?;
    Ok(Json(skin))
}

// ─────────────────────────────────────────────────────────────────────────────
// Purchases
// ─────────────────────────────────────────────────────────────────────────────

/// Buy a skin for the caller.
#[tracing::instrument(skip(state, user), fields(user_id = %user.0, skin_id = %req.skin_id))]
pub async fn buy_skin<R: StoreRepository>(
    State(state): State<Arc<AppState<R>>>,
    Extension(user): Extension<AuthenticatedUser>,
    Json(req): Json<BuySkinRequest>,
) -> Result<impl IntoResponse, ApiError> {
    // Fires when the client goes away and axum drops this future.
    let cancel = CancellationToken::new();
    let _guard = cancel.clone().drop_guard();

    let purchase = state
        .purchases
        .buy_skin(&user.0, req.skin_id, &cancel)
        .await?;

    let location = format!("/api/purchases/{}", purchase.id());
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(PurchaseResponse::from(purchase)),
    ))
}

/// The caller's purchase history.
#[tracing::instrument(skip(state, user), fields(user_id = %user.0))]
pub async fn purchase_history<R: StoreRepository>(
    State(state): State<Arc<AppState<R>>>,
    Extension(user): Extension<AuthenticatedUser>,
) -> Result<impl IntoResponse, ApiError> {
    let purchases = state.purchases.list_user_purchases(&user.0).await?;
    let body: Vec<PurchaseResponse> = purchases.iter().map(PurchaseResponse::from).collect();
    Ok(Json(body))
}

/// Get one of the caller's purchases.
#[tracing::instrument(skip(state, user), fields(user_id = %user.0, purchase_id = %id))]
pub async fn get_purchase<R: StoreRepository>(
    State(state): State<Arc<AppState<R>>>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let purchase_id = parse_purchase_id(&id)?;

    let purchase = state
        .purchases
        .get_purchase(purchase_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Purchase with ID {} not found", purchase_id)))?;

    let owner = state.purchases.get_purchase_owner_id(purchase_id).await?;
    if owner.as_ref() != Some(&user.0) {
        tracing::warn!("purchase requested by a non-owner");
        return Err(AppError::Forbidden.into());
    }

    Ok(Json(PurchaseResponse::from(purchase)))
}
