//! Authentication middleware for protected routes.

use std::convert::Infallible;
use std::sync::Arc;

use axum::{
    Json,
    extract::{FromRequestParts, Request, State},
    http::{StatusCode, header::AUTHORIZATION, request::Parts},
    middleware::Next,
    response::{IntoResponse, Response},
};
use serde_json::json;
use tracing::debug;

use rollcall_shared::{AuthError, IdentityGate, Principal};

/// Authentication middleware that validates bearer tokens.
///
/// This middleware:
/// 1. Reads the `Authorization` header
/// 2. Verifies the bearer token with the identity gate
/// 3. Stores the [`Principal`] in request extensions for handlers to access
pub async fn auth_middleware(
    State(gate): State<Arc<IdentityGate>>,
    mut request: Request,
    next: Next,
) -> Response {
    let header = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .unwrap_or_default();

    match gate.authenticate(header) {
        Ok(principal) => {
            debug!(subject = principal.subject_or_anonymous(), "Authenticated request");
            request.extensions_mut().insert(principal);
            next.run(request).await
        }
        Err(e) => {
            let (error, message) = match e {
                AuthError::MissingCredential => (
                    "missing_token",
                    "Authorization header with Bearer token is required",
                ),
                AuthError::InvalidCredential => ("invalid_token", "Invalid or expired token"),
            };

            (
                StatusCode::UNAUTHORIZED,
                Json(json!({ "error": error, "message": message })),
            )
                .into_response()
        }
    }
}

/// The principal attached by [`auth_middleware`], if the route is gated.
#[derive(Debug, Clone)]
pub struct MaybePrincipal(pub Option<Principal>);

impl MaybePrincipal {
    /// Subject for logging, or `"anonymous"`.
    #[must_use]
    pub fn subject(&self) -> &str {
        self.0
            .as_ref()
            .map_or("anonymous", Principal::subject_or_anonymous)
    }
}

impl<S> FromRequestParts<S> for MaybePrincipal
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self(parts.extensions.get::<Principal>().cloned()))
    }
}
