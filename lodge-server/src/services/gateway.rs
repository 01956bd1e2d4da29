//! 支付网关抽象
//!
//! A charge either comes back with a transaction record (succeeded or
//! failed, both are persisted) or the gateway rejects it outright
//! (declined card, gateway down). Rejections surface as 402 to the
//! caller but a failed charge still produces a payment row.

use async_trait::async_trait;
use thiserror::Error;

/// 扣款结果状态
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChargeStatus {
    Succeeded,
    Failed,
}

/// 网关返回的扣款记录
#[derive(Debug, Clone)]
pub struct Charge {
    /// 网关事务 ID (全局唯一)
    pub transaction_id: String,
    pub status: ChargeStatus,
}

/// 网关错误
#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("Card declined: {0}")]
    CardDeclined(String),

    #[error("Payment gateway unavailable: {0}")]
    Unavailable(String),
}

/// 支付网关
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// 发起一笔扣款
    ///
    /// `amount` 为最小货币单位 (分)。`source` 是客户端预先取得的支付凭证。
    async fn charge(&self, amount: i64, currency: &str, source: &str)
    -> Result<Charge, GatewayError>;
}

/// 沙盒网关 (本地开发与测试)
///
/// 行为由支付凭证前缀决定:
///
/// | 前缀 | 结果 |
/// |------|------|
/// | `declined` | Err(CardDeclined) |
/// | `fail` | Ok, status = Failed |
/// | 其他 | Ok, status = Succeeded |
#[derive(Debug, Default, Clone)]
pub struct SandboxGateway;

#[async_trait]
impl PaymentGateway for SandboxGateway {
    async fn charge(
        &self,
        amount: i64,
        currency: &str,
        source: &str,
    ) -> Result<Charge, GatewayError> {
        if amount <= 0 {
            return Err(GatewayError::CardDeclined(format!(
                "Invalid amount: {amount} {currency}"
            )));
        }
        if source.starts_with("declined") {
            return Err(GatewayError::CardDeclined(
                "The card was declined".to_string(),
            ));
        }

        let status = if source.starts_with("fail") {
            ChargeStatus::Failed
        } else {
            ChargeStatus::Succeeded
        };

        Ok(Charge {
            transaction_id: format!("txn_{}", uuid::Uuid::new_v4().simple()),
            status,
        })
    }
}
