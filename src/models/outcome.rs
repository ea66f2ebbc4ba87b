//! 统一取数结果类型
//!
//! 每个列表取数与明细取数操作都返回 FetchOutcome，
//! 取代原先"打日志后静默降级为空列表"的策略；
//! 展示层只需要针对三种状态各实现一种呈现。

use serde::Serialize;

use crate::error::AppError;

/// 失败原因（面向展示层的错误分类）
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum FailureReason {
    /// 传输失败（网络 / 超时）
    Transport(String),
    /// 存储或后端报告的失败
    Store(String),
    /// 目标不存在
    NotFound,
}

impl From<AppError> for FailureReason {
    fn from(e: AppError) -> Self {
        match e {
            AppError::Transport(msg) | AppError::Timeout(msg) | AppError::Io(msg) => {
                FailureReason::Transport(msg)
            }
            AppError::Backend { status, detail } => {
                FailureReason::Store(format!("HTTP {status}: {detail}"))
            }
            AppError::Store(msg) | AppError::Serialization(msg) | AppError::Config(msg) => {
                FailureReason::Store(msg)
            }
            AppError::NotFound(_) => FailureReason::NotFound,
        }
    }
}

impl std::fmt::Display for FailureReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FailureReason::Transport(msg) => write!(f, "网络请求失败: {msg}"),
            FailureReason::Store(msg) => write!(f, "后端处理失败: {msg}"),
            FailureReason::NotFound => write!(f, "目标不存在"),
        }
    }
}

/// 取数结果
#[derive(Debug, Clone, PartialEq, Serialize, Default)]
pub enum FetchOutcome<T> {
    /// 取数成功且有内容
    Loaded(T),
    /// 取数成功但无内容（空态）
    #[default]
    Empty,
    /// 取数失败（可见、非阻塞的错误呈现）
    Failed(FailureReason),
}

impl<T> FetchOutcome<T> {
    pub fn is_loaded(&self) -> bool {
        matches!(self, FetchOutcome::Loaded(_))
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, FetchOutcome::Empty)
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, FetchOutcome::Failed(_))
    }

    /// 成功载荷的引用
    pub fn loaded(&self) -> Option<&T> {
        match self {
            FetchOutcome::Loaded(value) => Some(value),
            _ => None,
        }
    }

    /// 变换成功载荷，保持空态与失败不变
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> FetchOutcome<U> {
        match self {
            FetchOutcome::Loaded(value) => FetchOutcome::Loaded(f(value)),
            FetchOutcome::Empty => FetchOutcome::Empty,
            FetchOutcome::Failed(reason) => FetchOutcome::Failed(reason),
        }
    }
}

impl<T> FetchOutcome<Vec<T>> {
    /// 列表结果：空列表归一化为空态
    pub fn from_list(list: Vec<T>) -> Self {
        if list.is_empty() {
            FetchOutcome::Empty
        } else {
            FetchOutcome::Loaded(list)
        }
    }

    /// 列表取数结果：错误转为失败态
    pub fn from_list_result(result: crate::error::Result<Vec<T>>) -> Self {
        match result {
            Ok(list) => Self::from_list(list),
            Err(e) => FetchOutcome::Failed(e.into()),
        }
    }

    /// 变换列表并重新归一化（过滤后为空的列表回到空态）
    pub fn filter_list(self, f: impl FnOnce(Vec<T>) -> Vec<T>) -> Self {
        match self {
            FetchOutcome::Loaded(list) => Self::from_list(f(list)),
            other => other,
        }
    }

    /// 成功载荷的长度，空态与失败计为 0
    pub fn len(&self) -> usize {
        self.loaded().map(Vec::len).unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_list_normalizes_to_empty_state() {
        let outcome: FetchOutcome<Vec<u32>> = FetchOutcome::from_list(vec![]);
        assert!(outcome.is_empty());
        assert_eq!(outcome.len(), 0);
    }

    #[test]
    fn transport_error_maps_to_transport_reason() {
        let outcome: FetchOutcome<Vec<u32>> =
            FetchOutcome::from_list_result(Err(AppError::Transport("connection refused".into())));
        assert_eq!(
            outcome,
            FetchOutcome::Failed(FailureReason::Transport("connection refused".into()))
        );
    }

    #[test]
    fn not_found_error_maps_to_not_found_reason() {
        let reason: FailureReason = AppError::NotFound("t9".into()).into();
        assert_eq!(reason, FailureReason::NotFound);
    }

    #[test]
    fn filter_list_renormalizes() {
        let outcome = FetchOutcome::from_list(vec![1, 2, 3]);
        let filtered = outcome.filter_list(|list| list.into_iter().filter(|n| *n > 5).collect());
        assert!(filtered.is_empty());
    }
}
