use chrono::NaiveDate;
use std::sync::Arc;

use crate::auth::JwtService;
use crate::bookings::BookingManager;
use crate::core::{Config, Result, ServerError};
use crate::db::{DbService, seed};
use crate::utils::time::business_today;

/// 服务器状态 - 持有所有服务的共享引用
///
/// | 字段 | 类型 | 说明 |
/// |------|------|------|
/// | config | Config | 配置项 (不可变) |
/// | db | DbService | SQLite 连接池 |
/// | bookings | BookingManager | 预订聚合管理 |
/// | jwt_service | Arc<JwtService> | JWT 认证服务 |
///
/// 所有字段都是浅拷贝，可以直接作为 axum 的 `State`。
#[derive(Clone, Debug)]
pub struct ServerState {
    pub config: Config,
    pub db: DbService,
    pub bookings: BookingManager,
    pub jwt_service: Arc<JwtService>,
}

impl ServerState {
    pub fn new(config: Config, db: DbService) -> Self {
        let bookings = BookingManager::new(db.pool.clone(), config.default_price_per_night);
        let jwt_service = Arc::new(JwtService::with_config(config.jwt.clone()));
        Self {
            config,
            db,
            bookings,
            jwt_service,
        }
    }

    /// 打开数据库、执行迁移、导入初始数据
    pub async fn initialize(config: &Config) -> Result<Self> {
        let db = DbService::new(&config.database_url)
            .await
            .map_err(|e| ServerError::Database(e.message))?;

        if let Some(path) = &config.rooms_file {
            seed::seed_rooms_from_file(&db.pool, path).await?;
        }
        if let (Some(username), Some(password)) = (&config.admin_username, &config.admin_password) {
            seed::ensure_admin(&db.pool, username, password).await?;
        }

        Ok(Self::new(config.clone(), db))
    }

    /// 业务时区下的今天
    pub fn today(&self) -> NaiveDate {
        business_today(self.config.business_tz)
    }
}
