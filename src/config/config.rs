use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// 后端服务配置
///
/// 基础 URL 在进程启动时解析一次，随后显式注入到每个客户端，
/// 不使用全局常量。
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BackendConfig {
    /// 后端基础 URL
    pub base_url: String,
    /// 请求超时（秒）
    pub request_timeout: u64,
    /// 连接超时（秒）
    pub connect_timeout: u64,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".to_string(),
            request_timeout: 30,
            connect_timeout: 10,
        }
    }
}

/// 语义搜索配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// 返回候选数量
    pub top_k: u32,
    /// 空白查询直接跳过请求并返回空列表
    pub skip_blank_queries: bool,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            top_k: 6,
            skip_blank_queries: true,
        }
    }
}

/// 日志配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// 日志级别
    pub level: String,
    /// 结构化日志格式
    pub structured: bool,
    /// 日志文件目录（为空则只输出到标准输出）
    pub log_dir: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            structured: false,
            log_dir: None,
        }
    }
}

/// 应用配置
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    /// 后端服务配置
    pub backend: BackendConfig,
    /// 语义搜索配置
    pub search: SearchConfig,
    /// 日志配置
    pub logging: LoggingConfig,
}
