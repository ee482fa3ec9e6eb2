//! # Skins Client SDK
//!
//! A typed Rust client for the skin store API.

use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use skins_types::{BuySkinRequest, PurchaseId, PurchaseResponse, SkinId, SkinResponse};

/// Error type for client operations.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Skin store API client.
pub struct SkinsClient {
    base_url: String,
    user_id: Option<String>,
    http: Client,
}

impl SkinsClient {
    /// Creates a new client.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            user_id: None,
            http: Client::new(),
        }
    }

    /// Sets the user id sent as the bearer token on purchase calls.
    pub fn with_user_id(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = Some(user_id.into());
        self
    }

    /// Checks if the API is healthy.
    pub async fn health(&self) -> Result<bool, ClientError> {
        let resp = self
            .http
            .get(format!("{}/health", self.base_url))
            .send()
            .await?;
        Ok(resp.status().is_success())
    }

    /// Lists the catalog.
    pub async fn list_skins(&self) -> Result<Vec<SkinResponse>, ClientError> {
        self.get("/api/skins").await
    }

    /// Gets a skin by ID.
    pub async fn get_skin(&self, id: SkinId) -> Result<SkinResponse, ClientError> {
        self.get(&format!("/api/skins/{}", id)).await
    }

    /// Buys a skin for the configured user.
    pub async fn buy_skin(&self, skin_id: SkinId) -> Result<PurchaseResponse, ClientError> {
        self.post("/api/purchases", &BuySkinRequest { skin_id }).await
    }

    /// The configured user's purchases.
    pub async fn purchase_history(&self) -> Result<Vec<PurchaseResponse>, ClientError> {
        self.get("/api/purchases/history").await
    }

    /// Gets one of the configured user's purchases.
    pub async fn get_purchase(&self, id: PurchaseId) -> Result<PurchaseResponse, ClientError> {
        self.get(&format!("/api/purchases/{}", id)).await
    }

    fn authorize(&self, req: RequestBuilder) -> RequestBuilder {
        match &self.user_id {
            Some(user) => req.bearer_auth(user),
            None => req,
        }
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        let req = self.authorize(self.http.get(format!("{}{}", self.base_url, path)));
        let resp = req.send().await?;
        self.handle_response(resp).await
    }

    async fn post<T: DeserializeOwned, B: serde::Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ClientError> {
        let req = self.authorize(
            self.http
                .post(format!("{}{}", self.base_url, path))
                .json(body),
        );
        let resp = req.send().await?;
        self.handle_response(resp).await
    }

    async fn handle_response<T: DeserializeOwned>(
        &self,
        resp: reqwest::Response,
    ) -> Result<T, ClientError> {
        let status = resp.status();
        if status.is_success() {
            let body = resp.text().await?;
            Ok(serde_json::from_str(&body)?)
        } else {
            let body = resp.text().await.unwrap_or_default();
            let message = serde_json::from_str::<serde_json::Value>(&body)
                .ok()
                .and_then(|v| v.get("error").and_then(|e| e.as_str()).map(String::from))
                .unwrap_or(body);
            Err(ClientError::Api {
                status: status.as_u16(),
                message,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        Json, Router,
        http::{HeaderMap, StatusCode},
        routing::get,
    };

    async fn serve(app: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{}", addr)
    }

    #[test]
    fn test_client_creation() {
        let client = SkinsClient::new("http://localhost:5042");
        assert_eq!(client.base_url, "http://localhost:5042");
    }

    #[test]
    fn test_client_with_trailing_slash() {
        let client = SkinsClient::new("http://localhost:5042/");
        assert_eq!(client.base_url, "http://localhost:5042");
    }

    #[test]
    fn test_client_with_user_id() {
        let client = SkinsClient::new("http://localhost:5042").with_user_id("alice");
        assert_eq!(client.user_id, Some("alice".to_string()));
    }

    #[tokio::test]
    async fn test_api_error_is_decoded() {
        let app = Router::new().route(
            "/api/skins/{id}",
            get(|| async {
                (
                    StatusCode::NOT_FOUND,
                    Json(serde_json::json!({"error": "Skin with ID 9 not found", "code": 404})),
                )
            }),
        );
        let client = SkinsClient::new(serve(app).await);

        match client.get_skin(SkinId::new(9)).await {
            Err(ClientError::Api { status, message }) => {
                assert_eq!(status, 404);
                assert_eq!(message, "Skin with ID 9 not found");
            }
            other => panic!("unexpected result: {:?}", other.map(|s| s.id)),
        }
    }

    #[tokio::test]
    async fn test_user_id_is_sent_as_bearer() {
        let app = Router::new().route(
            "/api/purchases/history",
            get(|headers: HeaderMap| async move {
                let auth = headers
                    .get("authorization")
                    .and_then(|v| v.to_str().ok())
                    .unwrap_or_default();
                if auth == "Bearer alice" {
                    (StatusCode::OK, Json(serde_json::json!([])))
                } else {
                    (StatusCode::UNAUTHORIZED, Json(serde_json::json!({"error": "no"})))
                }
            }),
        );
        let client = SkinsClient::new(serve(app).await).with_user_id("alice");

        assert!(client.purchase_history().await.unwrap().is_empty());
    }
}
