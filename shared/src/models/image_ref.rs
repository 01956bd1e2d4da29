//! Image Reference
//!
//! A stored blob handle: the public URL plus the store-side id used
//! for later destruction. Kept as a JSON list column on hotel/room.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageRef {
    /// Public URL the client can fetch
    pub secure_url: String,
    /// Blob-store id used to destroy the image
    pub public_id: String,
}
