//! Issued-token registry types
//!
//! Tokens are stored as SHA-256 digests; presence in the registry is
//! what makes a structurally valid JWT actually accepted.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Which account table a token belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum PrincipalKind {
    Guest,
    Staff,
}

impl PrincipalKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            PrincipalKind::Guest => "guest",
            PrincipalKind::Staff => "staff",
        }
    }
}

/// Hex digest of a bearer token, the registry key
pub fn token_digest(token: &str) -> String {
    hex::encode(Sha256::digest(token.as_bytes()))
}
