//! 错误处理模块
//!
//! 定义客户端的错误类型和错误处理逻辑。

use thiserror::Error;

/// 应用程序错误类型
#[derive(Error, Debug)]
pub enum AppError {
    /// 传输错误（网络层失败）
    #[error("传输错误: {0}")]
    Transport(String),

    /// 超时错误
    #[error("操作超时: {0}")]
    Timeout(String),

    /// 后端返回非 2xx 状态码
    #[error("后端错误 (HTTP {status}): {detail}")]
    Backend { status: u16, detail: String },

    /// 后端在 2xx 响应体内报告的失败
    #[error("存储错误: {0}")]
    Store(String),

    /// 资源不存在
    #[error("资源不存在: {0}")]
    NotFound(String),

    /// 序列化错误
    #[error("序列化错误: {0}")]
    Serialization(String),

    /// 配置错误
    #[error("配置错误: {0}")]
    Config(String),

    /// IO 错误
    #[error("IO 错误: {0}")]
    Io(String),
}

impl From<reqwest::Error> for AppError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            AppError::Timeout(e.to_string())
        } else if e.is_decode() {
            AppError::Serialization(e.to_string())
        } else {
            AppError::Transport(e.to_string())
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(e: serde_json::Error) -> Self {
        AppError::Serialization(e.to_string())
    }
}

impl From<figment::Error> for AppError {
    fn from(e: figment::Error) -> Self {
        AppError::Config(e.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(e: std::io::Error) -> Self {
        AppError::Io(e.to_string())
    }
}

/// 结果类型别名
pub type Result<T> = std::result::Result<T, AppError>;
