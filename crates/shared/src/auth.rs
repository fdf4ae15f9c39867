//! Authenticated identity types.

use serde::{Deserialize, Serialize};

/// The authenticated identity attached to a request after credential
/// verification.
///
/// Only the registered claims the service reads are typed here. Any other
/// claim carried by the token is ignored.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Principal {
    /// Subject of the token.
    #[serde(rename = "sub", default, skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    /// Expiration timestamp (seconds since the epoch).
    #[serde(rename = "exp", default, skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<i64>,
    /// Issued-at timestamp (seconds since the epoch).
    #[serde(rename = "iat", default, skip_serializing_if = "Option::is_none")]
    pub issued_at: Option<i64>,
}

impl Principal {
    /// Returns the subject, or `"anonymous"` when the token carried none.
    #[must_use]
    pub fn subject_or_anonymous(&self) -> &str {
        self.subject.as_deref().unwrap_or("anonymous")
    }
}
