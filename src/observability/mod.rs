//! 可观测性模块
//!
//! 提供结构化日志初始化和客户端指标。

use serde::Serialize;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing_subscriber::EnvFilter;

use crate::config::config::LoggingConfig;

// ===== Client Metrics (using atomics for zero-dep implementation) =====

/// 客户端指标
#[derive(Clone, Default)]
pub struct ClientMetrics {
    pub requests_total: Arc<AtomicU64>,
    pub request_duration_sum_ms: Arc<AtomicU64>,
    pub search_requests_total: Arc<AtomicU64>,
    pub search_latency_sum_ms: Arc<AtomicU64>,
    pub mutations_total: Arc<AtomicU64>,
    pub errors_total: Arc<AtomicU64>,
}

impl ClientMetrics {
    /// 记录一次后端请求
    pub fn record_request(&self, duration_ms: u64) {
        self.requests_total.fetch_add(1, Ordering::SeqCst);
        self.request_duration_sum_ms
            .fetch_add(duration_ms, Ordering::SeqCst);
    }

    /// 记录一次语义搜索
    pub fn record_search(&self, duration_ms: u64) {
        self.search_requests_total.fetch_add(1, Ordering::SeqCst);
        self.search_latency_sum_ms
            .fetch_add(duration_ms, Ordering::SeqCst);
    }

    /// 记录一次写操作（关联 / 解除关联 / 删除）
    pub fn record_mutation(&self) {
        self.mutations_total.fetch_add(1, Ordering::SeqCst);
    }

    /// 记录错误
    pub fn record_error(&self) {
        self.errors_total.fetch_add(1, Ordering::SeqCst);
    }

    /// 当前指标快照
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            requests_total: self.requests_total.load(Ordering::SeqCst),
            request_duration_sum_ms: self.request_duration_sum_ms.load(Ordering::SeqCst),
            search_requests_total: self.search_requests_total.load(Ordering::SeqCst),
            search_latency_sum_ms: self.search_latency_sum_ms.load(Ordering::SeqCst),
            mutations_total: self.mutations_total.load(Ordering::SeqCst),
            errors_total: self.errors_total.load(Ordering::SeqCst),
        }
    }
}

/// 指标快照
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricsSnapshot {
    pub requests_total: u64,
    pub request_duration_sum_ms: u64,
    pub search_requests_total: u64,
    pub search_latency_sum_ms: u64,
    pub mutations_total: u64,
    pub errors_total: u64,
}

// ===== Logging =====

/// 初始化日志订阅器
///
/// 配置了 log_dir 时写入按天滚动的日志文件并返回刷盘守卫；
/// 否则输出到标准输出。重复初始化会被忽略（便于测试）。
pub fn init_logging(
    config: &LoggingConfig,
) -> Option<tracing_appender::non_blocking::WorkerGuard> {
    let filter =
        EnvFilter::try_new(&config.level).unwrap_or_else(|_| EnvFilter::new("info"));

    match &config.log_dir {
        Some(dir) => {
            let appender = tracing_appender::rolling::daily(dir, "termhub.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            if config.structured {
                tracing_subscriber::fmt()
                    .json()
                    .with_env_filter(filter)
                    .with_writer(writer)
                    .try_init()
                    .ok();
            } else {
                tracing_subscriber::fmt()
                    .with_env_filter(filter)
                    .with_writer(writer)
                    .try_init()
                    .ok();
            }
            Some(guard)
        }
        None => {
            if config.structured {
                tracing_subscriber::fmt()
                    .json()
                    .with_env_filter(filter)
                    .try_init()
                    .ok();
            } else {
                tracing_subscriber::fmt()
                    .with_env_filter(filter)
                    .try_init()
                    .ok();
            }
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn metrics_accumulate() {
        let metrics = ClientMetrics::default();
        metrics.record_request(120);
        metrics.record_request(80);
        metrics.record_search(40);
        metrics.record_mutation();
        metrics.record_error();

        let snapshot = metrics.snapshot();
        assert_eq!(snapshot.requests_total, 2);
        assert_eq!(snapshot.request_duration_sum_ms, 200);
        assert_eq!(snapshot.search_requests_total, 1);
        assert_eq!(snapshot.search_latency_sum_ms, 40);
        assert_eq!(snapshot.mutations_total, 1);
        assert_eq!(snapshot.errors_total, 1);
    }

    #[test]
    fn init_logging_without_file_returns_no_guard() {
        let guard = init_logging(&LoggingConfig::default());
        assert!(guard.is_none());
    }
}
