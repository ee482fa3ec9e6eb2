//! Mock bearer authentication.
//!
//! The token is trusted as the caller's user id. There is no verification;
//! this stands in for a real identity provider.

use axum::{
    Json,
    body::Body,
    http::{Request, StatusCode, header},
    middleware::Next,
    response::{IntoResponse, Response},
};

use skins_types::UserId;

/// The caller, as established by [`auth_middleware`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser(pub UserId);

/// Extracts the user id from the Authorization header.
/// Expected format: "Bearer <user_id>" or just "<user_id>"; the scheme is
/// matched case-insensitively.
fn extract_user_id(auth_header: Option<&str>) -> Option<&str> {
    let header = auth_header?.trim_start();
    let token = match header.get(..7) {
        Some(scheme) if scheme.eq_ignore_ascii_case("bearer ") => &header[7..],
        _ => header,
    };
    let token = token.trim();
    (!token.is_empty()).then_some(token)
}

/// Rejects requests without a usable bearer token and records the caller in
/// request extensions.
pub async fn auth_middleware(mut request: Request<Body>, next: Next) -> Response {
    let auth_header = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok());

    let user = match extract_user_id(auth_header).map(UserId::new) {
        Some(Ok(user)) => user,
        _ => return unauthorized_response("Missing or invalid Authorization header"),
    };

    tracing::debug!(user_id = %user, "request authenticated");
    request.extensions_mut().insert(AuthenticatedUser(user));
    next.run(request).await
}

fn unauthorized_response(message: &str) -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(serde_json::json!({
            "error": message,
            "code": 401
        })),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_user_id_bearer() {
        assert_eq!(extract_user_id(Some("Bearer alice")), Some("alice"));
        assert_eq!(extract_user_id(Some("bearer  bob ")), Some("bob"));
    }

    #[test]
    fn test_extract_user_id_raw() {
        assert_eq!(extract_user_id(Some("carol")), Some("carol"));
    }

    #[test]
    fn test_extract_user_id_empty() {
        assert_eq!(extract_user_id(None), None);
        assert_eq!(extract_user_id(Some("Bearer ")), None);
        assert_eq!(extract_user_id(Some("   ")), None);
    }
}
