//! Staff account record (员工)

use serde::{Deserialize, Serialize};
use shared::models::Role;
use validator::Validate;

use super::credential;

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Staff {
    pub id: i64,
    pub name: String,
    pub email: String,
    /// Argon2 PHC string, never serialized out
    #[serde(skip_serializing)]
    pub hash_pass: String,
    pub role: Role,
    pub is_verified: bool,
    /// Tokens issued before this timestamp (ms) are rejected
    pub password_changed_at: Option<i64>,
    pub created_at: i64,
    pub updated_at: i64,
}

impl Staff {
    pub fn verify_password(&self, password: &str) -> Result<bool, argon2::password_hash::Error> {
        credential::verify_password(&self.hash_pass, password)
    }
}

/// Create staff payload (owner)
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct StaffCreate {
    pub name: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 8))]
    pub password: String,
    pub role: Role,
}
