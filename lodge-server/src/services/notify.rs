//! 通知发送
//!
//! Notification failures never fail the request that triggered them;
//! handlers report the outcome in an `email_status` field instead.

use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("Delivery failed: {0}")]
    Delivery(String),
}

/// 预订确认邮件内容
#[derive(Debug, Clone)]
pub struct BookingConfirmation {
    pub hotel_name: String,
    pub room_number: String,
    pub check_in_date: i64,
    pub number_of_days: i64,
    pub total_price: i64,
}

/// 支付确认邮件内容
#[derive(Debug, Clone)]
pub struct PaymentConfirmation {
    pub transaction_id: String,
    /// 最小货币单位
    pub amount: i64,
}

/// 通知发送器
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn send_welcome(&self, email: &str, name: &str) -> Result<(), NotifyError>;

    async fn send_booking_confirmation(
        &self,
        email: &str,
        name: &str,
        details: &BookingConfirmation,
    ) -> Result<(), NotifyError>;

    async fn send_payment_confirmation(
        &self,
        email: &str,
        name: &str,
        details: &PaymentConfirmation,
    ) -> Result<(), NotifyError>;
}

/// 日志通知器 (默认装配)
///
/// 把每封邮件写进结构化日志。
#[derive(Debug, Default, Clone)]
pub struct LogNotifier;

#[async_trait]
impl Notifier for LogNotifier {
    async fn send_welcome(&self, email: &str, name: &str) -> Result<(), NotifyError> {
        tracing::info!(target: "notify", %email, %name, "Welcome email");
        Ok(())
    }

    async fn send_booking_confirmation(
        &self,
        email: &str,
        name: &str,
        details: &BookingConfirmation,
    ) -> Result<(), NotifyError> {
        tracing::info!(
            target: "notify",
            %email,
            %name,
            hotel = %details.hotel_name,
            room = %details.room_number,
            nights = details.number_of_days,
            total = details.total_price,
            "Booking confirmation email"
        );
        Ok(())
    }

    async fn send_payment_confirmation(
        &self,
        email: &str,
        name: &str,
        details: &PaymentConfirmation,
    ) -> Result<(), NotifyError> {
        tracing::info!(
            target: "notify",
            %email,
            %name,
            transaction = %details.transaction_id,
            amount = details.amount,
            "Payment confirmation email"
        );
        Ok(())
    }
}

/// 邮件结果字段 ("sent" / "failed")
pub fn email_status(result: &Result<(), NotifyError>) -> &'static str {
    match result {
        Ok(()) => "sent",
        Err(e) => {
            tracing::warn!(target: "notify", error = %e, "Email delivery failed");
            "failed"
        }
    }
}
