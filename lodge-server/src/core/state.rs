use std::sync::Arc;

use sqlx::SqlitePool;

use crate::auth::JwtService;
use crate::core::Config;
use crate::db::DbService;
use crate::services::{
    ImageStore, LocalImageStore, LogNotifier, Notifier, PaymentGateway, SandboxGateway,
};

/// 服务器状态 - 持有所有服务的共享引用
///
/// 使用 Arc 实现浅拷贝，克隆成本极低。
///
/// # 组件
///
/// | 字段 | 说明 |
/// |------|------|
/// | config | 配置项 (不可变) |
/// | pool | SQLite 连接池 |
/// | jwt_service | JWT 认证服务 |
/// | gateway | 支付网关 |
/// | notifier | 通知发送器 |
/// | images | 图片存储 |
#[derive(Clone)]
pub struct ServerState {
    /// 服务器配置
    pub config: Config,
    /// SQLite 连接池
    pub pool: SqlitePool,
    /// JWT 认证服务
    jwt_service: Arc<JwtService>,
    /// 支付网关
    pub gateway: Arc<dyn PaymentGateway>,
    /// 通知发送器
    pub notifier: Arc<dyn Notifier>,
    /// 图片存储
    pub images: Arc<dyn ImageStore>,
}

impl ServerState {
    /// 手动构造 (测试装配自定义的网关/通知器时使用)
    pub fn new(
        config: Config,
        pool: SqlitePool,
        gateway: Arc<dyn PaymentGateway>,
        notifier: Arc<dyn Notifier>,
        images: Arc<dyn ImageStore>,
    ) -> Self {
        let jwt_service = Arc::new(JwtService::with_config(config.jwt.clone()));
        Self {
            config,
            pool,
            jwt_service,
            gateway,
            notifier,
            images,
        }
    }

    /// 按配置初始化全部服务 (生产装配)
    pub async fn initialize(config: &Config) -> anyhow::Result<Self> {
        tokio::fs::create_dir_all(&config.work_dir).await?;

        let db = DbService::new(&config.database_path).await?;

        let images = LocalImageStore::new(
            std::path::Path::new(&config.work_dir),
            config.public_base_url.clone(),
        );

        Ok(Self::new(
            config.clone(),
            db.pool,
            Arc::new(SandboxGateway),
            Arc::new(LogNotifier),
            Arc::new(images),
        ))
    }

    /// JWT 认证服务
    pub fn jwt(&self) -> &JwtService {
        &self.jwt_service
    }
}
