use axum::{
    extract::{Request, State},
    http::{header, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use base64::{engine::general_purpose, Engine as _};
use serde::Deserialize;
use serde_json::json;
use tracing::warn;

use crate::database::registrant_repo;
use crate::models::Role;
use crate::web::state::AppState;

/// Identity established for the current request. Injected as a request
/// extension by `require_auth`.
#[derive(Clone, Debug)]
pub struct AuthenticatedRegistrant {
    pub id: String,
    pub code: String,
    pub role: Role,
}

impl AuthenticatedRegistrant {
    pub fn is_organizer(&self) -> bool {
        self.role == Role::Organizer
    }
}

#[derive(Deserialize)]
struct TokenClaims {
    sub: String,
}

/// Session-token identity check.
///
/// Token issuance lives in an external auth service; this middleware only
/// consumes the result: it reads the `auth-token` cookie, decodes the token
/// claims, and resolves the registrant against the store (the store, not the
/// token, is authoritative for the role).
pub async fn require_auth(State(state): State<AppState>, mut request: Request, next: Next) -> Response {
    let token = request
        .headers()
        .get(header::COOKIE)
        .and_then(|hv| hv.to_str().ok())
        .and_then(|cookies| {
            cookies
                .split("; ")
                .find(|c| c.starts_with("auth-token="))
                .and_then(|c| c.strip_prefix("auth-token="))
        });

    if let Some(token) = token {
        if let Some(registrant_id) = decode_subject(token) {
            match registrant_repo::find_by_id(&state.pool, &registrant_id).await {
                Ok(Some(registrant)) => {
                    request.extensions_mut().insert(AuthenticatedRegistrant {
                        id: registrant.id,
                        code: registrant.code,
                        role: registrant.role,
                    });
                    return next.run(request).await;
                }
                Ok(None) => {
                    warn!(%registrant_id, "token subject unknown");
                }
                Err(e) => {
                    warn!("registrant lookup failed during auth: {}", e);
                }
            }
        }
    }

    (
        StatusCode::UNAUTHORIZED,
        Json(json!({ "error": "unauthorized", "code": "UNAUTHORIZED" })),
    )
        .into_response()
}

/// Pull the subject out of the token's claims segment.
fn decode_subject(token: &str) -> Option<String> {
    let parts: Vec<&str> = token.split('.').collect();
    if parts.len() != 3 {
        return None;
    }
    let payload_bytes = general_purpose::URL_SAFE_NO_PAD.decode(parts[1]).ok()?;
    let claims: TokenClaims = serde_json::from_slice(&payload_bytes).ok()?;
    Some(claims.sub)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn token_for(sub: &str) -> String {
        let payload = general_purpose::URL_SAFE_NO_PAD.encode(format!("{{\"sub\":\"{sub}\"}}"));
        format!("header.{payload}.signature")
    }

    #[test]
    fn decodes_subject_from_claims() {
        assert_eq!(decode_subject(&token_for("r1")).as_deref(), Some("r1"));
    }

    #[test]
    fn malformed_tokens_are_rejected() {
        assert!(decode_subject("not-a-token").is_none());
        assert!(decode_subject("a.b").is_none());
        assert!(decode_subject("a.!!!not-base64!!!.c").is_none());
    }
}
