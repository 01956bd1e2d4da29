//! Payment Model (支付记录)
//!
//! One row per charge attempt. Declined charges are recorded too (with
//! `PaymentState::Failed`); the row is the audit trail even when the
//! request as a whole reports failure.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
pub enum PaymentMethod {
    Online,
    Cash,
}

/// Outcome recorded on the payment row, mapped from the gateway
/// response ("succeeded" becomes Completed on the stored row).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
pub enum PaymentState {
    #[serde(rename = "succeeded")]
    #[sqlx(rename = "succeeded")]
    Succeeded,
    Failed,
    Completed,
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Payment {
    pub id: i64,
    /// Denormalized from the booking at creation
    pub hotel_id: i64,
    pub room_id: i64,
    pub booking_id: i64,
    pub payment_method: PaymentMethod,
    /// Minor currency units (booking total * 100)
    pub amount: i64,
    /// Gateway transaction id, unique
    pub transaction_id: String,
    /// Milliseconds since epoch
    pub payment_date: i64,
    pub status: PaymentState,
    pub created_at: i64,
}
