//! Hotel Model (酒店)

use serde::{Deserialize, Serialize};
use sqlx::types::Json;

use super::ImageRef;

/// Hotel record.
///
/// `manager_id` points at the single staff member managing this hotel;
/// the rest of the roster lives in the `hotel_staff` table (one row per
/// staff member, unique per staff: a staff member belongs to at most
/// one hotel).
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Hotel {
    pub id: i64,
    /// Unique display name
    pub name: String,
    pub location: String,
    pub description: Option<String>,
    pub images: Json<Vec<ImageRef>>,
    /// 0..=5 star rating
    pub rating: f64,
    /// Reference nightly price, major currency units
    pub price_per_night: i64,
    pub amenities: Json<Vec<String>>,
    /// Managing staff member, if one is assigned
    pub manager_id: Option<i64>,
    /// Owner account that created the hotel. Nullable for legacy
    /// rows; such hotels refuse deletion until a creator is recorded.
    pub created_by: Option<i64>,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Create hotel payload (owner)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HotelCreate {
    pub name: String,
    pub location: String,
    pub description: Option<String>,
    #[serde(default)]
    pub rating: f64,
    pub price_per_night: i64,
    #[serde(default)]
    pub amenities: Vec<String>,
    /// Pre-uploaded image references (see the upload endpoint)
    #[serde(default)]
    pub images: Vec<ImageRef>,
}

/// Update hotel payload (owner), every field optional
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HotelUpdate {
    pub name: Option<String>,
    pub location: Option<String>,
    pub description: Option<String>,
    pub rating: Option<f64>,
    pub price_per_night: Option<i64>,
    pub amenities: Option<Vec<String>>,
    /// When present, replaces the image set (old blobs are destroyed)
    pub images: Option<Vec<ImageRef>>,
}

/// Roster mutation payload (assign manager / add staff)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StaffAssign {
    pub staff_id: i64,
}
