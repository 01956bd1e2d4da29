//! 外部服务抽象
//!
//! 支付网关、通知发送和图片存储都放在 trait 后面，服务器状态持有
//! `Arc<dyn ...>`。生产环境与测试环境用不同实现装配。

pub mod gateway;
pub mod images;
pub mod notify;

pub use gateway::{Charge, ChargeStatus, GatewayError, PaymentGateway, SandboxGateway};
pub use images::{ImageError, ImageStore, LocalImageStore};
pub use notify::{
    BookingConfirmation, LogNotifier, Notifier, NotifyError, PaymentConfirmation, email_status,
};
