use shared::error::AppError;
use thiserror::Error;

/// 启动阶段错误 (配置、数据库、监听端口)
#[derive(Error, Debug)]
pub enum ServerError {
    #[error("配置错误: {0}")]
    Config(String),

    #[error("数据库错误: {0}")]
    Database(String),

    #[error("初始化失败: {0}")]
    Startup(String),

    #[error("IO 错误: {0}")]
    Io(#[from] std::io::Error),
}

impl From<AppError> for ServerError {
    fn from(err: AppError) -> Self {
        ServerError::Startup(err.message)
    }
}

pub type Result<T> = std::result::Result<T, ServerError>;
