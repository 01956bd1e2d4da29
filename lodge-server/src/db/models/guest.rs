//! Guest (customer) account record

use serde::{Deserialize, Serialize};
use validator::Validate;

use super::credential;

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Guest {
    pub id: i64,
    pub name: String,
    pub email: String,
    /// Argon2 PHC string, never serialized out
    #[serde(skip_serializing)]
    pub hash_pass: String,
    pub is_verified: bool,
    /// Tokens issued before this timestamp (ms) are rejected
    pub password_changed_at: Option<i64>,
    pub created_at: i64,
    pub updated_at: i64,
}

impl Guest {
    pub fn verify_password(&self, password: &str) -> Result<bool, argon2::password_hash::Error> {
        credential::verify_password(&self.hash_pass, password)
    }
}

/// Self-service registration payload
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct GuestRegister {
    pub name: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 8))]
    pub password: String,
}
