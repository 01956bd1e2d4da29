//! Booking Model (预订)

use serde::{Deserialize, Serialize};

/// Booking lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
pub enum BookingStatus {
    Pending,
    Confirmed,
    Cancelled,
    Completed,
}

impl Default for BookingStatus {
    fn default() -> Self {
        Self::Pending
    }
}

/// Payment side of the booking lifecycle; flips to Paid only through a
/// successful payment record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
pub enum PaymentStatus {
    Pending,
    Paid,
    Failed,
}

impl Default for PaymentStatus {
    fn default() -> Self {
        Self::Pending
    }
}

/// Guest head-count
#[derive(Debug, Clone, Copy, Serialize, Deserialize, sqlx::FromRow)]
pub struct Guests {
    pub adults: i64,
    #[serde(default)]
    pub children: i64,
}

/// Booking record.
///
/// `hotel_id` is denormalized from the room at creation time; it is
/// never taken from the caller, which keeps the scope filters on
/// bookings trustworthy.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Booking {
    pub id: i64,
    /// Booking guest (customer account)
    pub user_id: i64,
    pub room_id: i64,
    pub hotel_id: i64,
    /// Milliseconds since epoch
    pub check_in_date: i64,
    pub check_out_date: i64,
    pub number_of_days: i64,
    /// number_of_days * room.price_per_night, major units
    pub total_price: i64,
    #[sqlx(flatten)]
    pub guests: Guests,
    pub status: BookingStatus,
    pub payment_status: PaymentStatus,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Create booking payload (customer)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingCreate {
    /// RFC 3339 timestamp
    pub check_in_date: chrono::DateTime<chrono::Utc>,
    pub check_out_date: chrono::DateTime<chrono::Utc>,
    pub guests: Guests,
    /// When supplied the caller's value is trusted; otherwise derived
    /// as ceil((check_out - check_in) / 1 day)
    pub number_of_days: Option<i64>,
}

/// Staff-facing projection of a booking: deliberately minimal (no
/// status, no timestamps, no internal ids).
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct BookingView {
    pub guest_name: String,
    pub guest_email: String,
    pub room_number: String,
    pub room_type: String,
    pub room_availability: bool,
    pub floor: i64,
    pub hotel_name: String,
    pub manager_name: Option<String>,
    pub check_in_date: i64,
    pub number_of_days: i64,
    pub total_price: i64,
    pub adults: i64,
    pub children: i64,
}
