use chrono_tz::Tz;
use std::path::PathBuf;

use crate::auth::JwtConfig;
use crate::core::ServerError;

/// 服务器配置 - 前台服务的所有配置项
///
/// # 环境变量
///
/// 所有配置项都可以通过环境变量覆盖 (启动时先加载 `.env`)：
///
/// | 环境变量 | 默认值 | 说明 |
/// |----------|--------|------|
/// | DATABASE_URL | sqlite://desk.db?mode=rwc | SQLite 数据库 |
/// | HTTP_PORT | 3000 | HTTP 服务端口 |
/// | LOG_LEVEL | info | 日志级别 |
/// | LOG_DIR | (无) | 日志目录，存在时按天滚动写文件 |
/// | ENVIRONMENT | development | 运行环境 |
/// | JWT_SECRET | 开发环境随机生成 | JWT 签名密钥 |
/// | JWT_EXPIRATION_MINUTES | 720 | 令牌有效期 |
/// | BUSINESS_TIMEZONE | Asia/Bangkok | 酒店所在时区，决定 "今天" |
/// | ADMIN_USERNAME / ADMIN_PASSWORD | (无) | 首次启动时创建的前台账号 |
/// | ROOMS_FILE | (无) | 房间目录 JSON，数据库为空时导入 |
/// | DEFAULT_PRICE_PER_NIGHT | 800 | 未填写房价时的默认值 |
///
/// # 示例
///
/// ```ignore
/// HTTP_PORT=8080 ROOMS_FILE=data/rooms.json cargo run
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub http_port: u16,
    pub log_level: String,
    pub log_dir: Option<String>,
    /// 运行环境: development | staging | production
    pub environment: String,
    /// JWT 认证配置
    pub jwt: JwtConfig,
    pub business_tz: Tz,
    pub admin_username: Option<String>,
    pub admin_password: Option<String>,
    pub rooms_file: Option<PathBuf>,
    pub default_price_per_night: f64,
}

impl Config {
    /// 从环境变量加载配置
    ///
    /// 未设置或无法解析的值使用默认值；只有 JWT 密钥和时区配置错误会导致失败。
    pub fn from_env() -> Result<Self, ServerError> {
        let environment = std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into());
        let jwt = JwtConfig::from_env(environment == "production")
            .map_err(|e| ServerError::Config(e.to_string()))?;

        let tz_name = std::env::var("BUSINESS_TIMEZONE").unwrap_or_else(|_| "Asia/Bangkok".into());
        let business_tz: Tz = tz_name
            .parse()
            .map_err(|_| ServerError::Config(format!("Unknown BUSINESS_TIMEZONE: {tz_name}")))?;

        Ok(Self {
            database_url: std::env::var("DATABASE_URL")
                .unwrap_or_else(|_| "sqlite://desk.db?mode=rwc".into()),
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".into()),
            log_dir: non_empty_var("LOG_DIR"),
            environment,
            jwt,
            business_tz,
            admin_username: non_empty_var("ADMIN_USERNAME"),
            admin_password: non_empty_var("ADMIN_PASSWORD"),
            rooms_file: non_empty_var("ROOMS_FILE").map(PathBuf::from),
            default_price_per_night: std::env::var("DEFAULT_PRICE_PER_NIGHT")
                .ok()
                .and_then(|p| p.parse().ok())
                .filter(|p: &f64| p.is_finite() && *p >= 0.0)
                .unwrap_or(800.0),
        })
    }

    /// 测试用配置：内存数据库、固定密钥
    pub fn for_tests() -> Self {
        Self {
            database_url: "sqlite::memory:".into(),
            http_port: 0,
            log_level: "debug".into(),
            log_dir: None,
            environment: "test".into(),
            jwt: JwtConfig::with_secret("desk-server-test-secret-0123456789abcdef"),
            business_tz: chrono_tz::Asia::Bangkok,
            admin_username: None,
            admin_password: None,
            rooms_file: None,
            default_price_per_night: 800.0,
        }
    }

    /// 是否生产环境
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}
