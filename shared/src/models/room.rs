//! Room Model (客房)
//!
//! Two independent flags drive the inventory state machine:
//! `reservation_status` tracks the booking lifecycle, `availability`
//! tracks physical readiness (cleaning). Checkout flips availability
//! off and stamps `check_out_date`; the cleaner flips it back on.

use serde::{Deserialize, Serialize};
use sqlx::types::Json;

use super::ImageRef;

/// Booking-lifecycle status of the room itself
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
pub enum ReservationStatus {
    Pending,
    Confirmed,
    Cancelled,
}

impl Default for ReservationStatus {
    fn default() -> Self {
        Self::Pending
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Room {
    pub id: i64,
    /// Owning hotel, immutable after creation
    pub hotel_id: i64,
    /// Unique across the whole operation
    pub room_number: String,
    pub room_type: String,
    pub floor: i64,
    /// Nightly price, major currency units
    pub price_per_night: i64,
    /// Percentage discount, carried on the room (not applied to
    /// booking totals, see booking pricing)
    pub discounts: i64,
    /// Physical readiness: true = ready for the next guest
    pub availability: bool,
    pub check_in_date: Option<i64>,
    pub check_out_date: Option<i64>,
    pub bed_type: String,
    pub max_occupancy: i64,
    pub room_size: i64,
    pub bathroom_type: String,
    pub view: String,
    pub smoking_policy: String,
    pub amenities: Json<Vec<String>>,
    pub reservation_status: ReservationStatus,
    pub special_requests: Option<String>,
    pub images: Json<Vec<ImageRef>>,
    pub description: String,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Create room payload (owner/manager)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoomCreate {
    pub room_number: String,
    pub room_type: String,
    pub floor: i64,
    pub price_per_night: i64,
    #[serde(default)]
    pub discounts: i64,
    pub bed_type: String,
    pub max_occupancy: i64,
    pub room_size: i64,
    pub bathroom_type: String,
    pub view: String,
    pub smoking_policy: String,
    #[serde(default)]
    pub amenities: Vec<String>,
    pub special_requests: Option<String>,
    /// Pre-uploaded image references, required at creation
    #[serde(default)]
    pub images: Vec<ImageRef>,
    pub description: String,
}

/// Update room payload, every field optional; `hotel_id` is
/// deliberately absent (immutable)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RoomUpdate {
    pub room_number: Option<String>,
    pub room_type: Option<String>,
    pub floor: Option<i64>,
    pub price_per_night: Option<i64>,
    pub discounts: Option<i64>,
    pub bed_type: Option<String>,
    pub max_occupancy: Option<i64>,
    pub room_size: Option<i64>,
    pub bathroom_type: Option<String>,
    pub view: Option<String>,
    pub smoking_policy: Option<String>,
    pub amenities: Option<Vec<String>>,
    pub special_requests: Option<String>,
    /// When present, replaces the image set (old blobs are destroyed)
    pub images: Option<Vec<ImageRef>>,
    pub description: Option<String>,
}

/// Single-field mutation payload used by receptionist tools and guest
/// checkout; exactly the field relevant to the endpoint is read.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RoomTools {
    pub status: Option<ReservationStatus>,
    pub description: Option<String>,
    pub discounts: Option<i64>,
    pub amenities: Option<Vec<String>>,
}

/// Cleaning worklist projection (room number + floor only)
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct RoomToClean {
    pub room_number: String,
    pub floor: i64,
}
