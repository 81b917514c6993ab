//! Desk Server - 酒店前台预订与房态服务
//!
//! # 架构概述
//!
//! 本模块是前台服务的主入口，提供以下核心功能：
//!
//! - **预订** (`bookings`): 预订生命周期、可用性、房态与收据
//! - **数据库** (`db`): 嵌入式 SQLite 存储 (sqlx)
//! - **认证** (`auth`): JWT + Argon2 认证体系
//! - **清洁状态** (`cleaning`): 房间清洁标记
//! - **HTTP API** (`api`): RESTful API 接口
//!
//! # 模块结构
//!
//! ```text
//! desk-server/src/
//! ├── core/          # 配置、状态、错误、服务器
//! ├── auth/          # JWT 认证、密码哈希、中间件
//! ├── bookings/      # 预订管理、可用性、报表
//! ├── cleaning/      # 清洁状态
//! ├── api/           # HTTP 路由和处理器
//! ├── utils/         # 日志、金额、时间、校验
//! └── db/            # 数据库层与初始数据
//! ```

pub mod api;
pub mod auth;
pub mod bookings;
pub mod cleaning;
pub mod core;
pub mod db;
pub mod utils;

// Re-export 公共类型
pub use auth::{CurrentUser, JwtService};
pub use bookings::{BookingError, BookingManager};
pub use core::{Config, Server, ServerState};

// Re-export unified error types from shared
pub use shared::error::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};

// Re-export logger functions
pub use utils::logger::init_logger_with_file;

// Security logging macro - 支持 tracing 格式说明符
#[macro_export]
macro_rules! security_log {
    ($level:expr, $event:expr, $($key:ident = $value:expr),*) => {
        tracing::info!(
            target: "security",
            level = $level,
            event = $event,
            $($key = $value),*
        );
    };
}

/// 启动前的环境准备: 加载 `.env`，初始化日志
///
/// 日志级别和目录直接读 `LOG_LEVEL` / `LOG_DIR`，此时配置尚未加载。
pub fn setup_environment() -> Result<(), Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();

    let log_level = std::env::var("LOG_LEVEL").ok();
    let log_dir = std::env::var("LOG_DIR").ok().filter(|d| !d.trim().is_empty());
    init_logger_with_file(log_level.as_deref(), log_dir.as_deref());

    Ok(())
}

pub fn print_banner() {
    println!(
        r#"
    ____            __
   / __ \___  _____/ /__
  / / / / _ \/ ___/ //_/
 / /_/ /  __(__  ) ,<
/_____/\___/____/_/|_|
    "#
    );
}
