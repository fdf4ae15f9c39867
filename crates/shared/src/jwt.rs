//! Identity gate: bearer credential verification.
//!
//! The shared secret is injected once at construction and never re-read,
//! so the gate can be exercised in tests with fabricated keys.

use chrono::{Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use thiserror::Error;

use crate::auth::Principal;

/// Scheme prefixes accepted in the `Authorization` header.
const BEARER_PREFIXES: [&str; 2] = ["Bearer ", "bearer "];

/// Errors that can occur while authenticating a request.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    /// The header is absent or does not carry a bearer token.
    #[error("missing bearer token")]
    MissingCredential,

    /// The token failed verification (bad signature, expired, malformed claims).
    #[error("invalid credential")]
    InvalidCredential,
}

/// Errors that can occur while issuing a token.
#[derive(Debug, Error)]
#[error("failed to encode token: {0}")]
pub struct IssueError(String);

/// Verifies bearer credentials against a process-wide shared secret.
#[derive(Clone)]
pub struct IdentityGate {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl std::fmt::Debug for IdentityGate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IdentityGate")
            .field("encoding_key", &"[hidden]")
            .field("decoding_key", &"[hidden]")
            .field("algorithms", &self.validation.algorithms)
            .finish()
    }
}

impl IdentityGate {
    /// Creates a gate that verifies HMAC-signed tokens with `secret`.
    #[must_use]
    pub fn new(secret: &str) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.algorithms = vec![Algorithm::HS256, Algorithm::HS384, Algorithm::HS512];
        // `exp` is checked when present but tokens without it are accepted.
        validation.required_spec_claims.clear();
        validation.validate_aud = false;

        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
        }
    }

    /// Authenticates a raw `Authorization` header value.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::MissingCredential` if the header does not carry a
    /// bearer token, and `AuthError::InvalidCredential` if the token fails
    /// verification.
    pub fn authenticate(&self, raw_header: &str) -> Result<Principal, AuthError> {
        let token = extract_bearer_token(raw_header).ok_or(AuthError::MissingCredential)?;
        self.verify_token(token)
    }

    /// Verifies a bare token (without the scheme prefix).
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidCredential` if verification fails.
    pub fn verify_token(&self, token: &str) -> Result<Principal, AuthError> {
        decode::<Principal>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|_| AuthError::InvalidCredential)
    }

    /// Signs a token for `subject` that expires after `ttl`.
    ///
    /// # Errors
    ///
    /// Returns `IssueError` if encoding fails.
    pub fn issue_token(&self, subject: &str, ttl: Duration) -> Result<String, IssueError> {
        let now = Utc::now();
        let claims = Principal {
            subject: Some(subject.to_string()),
            expires_at: Some((now + ttl).timestamp()),
            issued_at: Some(now.timestamp()),
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| IssueError(e.to_string()))
    }
}

/// Extracts the bearer token from an `Authorization` header value.
fn extract_bearer_token(header: &str) -> Option<&str> {
    BEARER_PREFIXES
        .iter()
        .find_map(|prefix| header.strip_prefix(prefix))
        .map(str::trim)
        .filter(|token| !token.is_empty())
}
