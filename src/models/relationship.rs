//! 术语关联关系数据模型

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 术语关联关系（有向：source → related）
///
/// 关联记录由外部存储持有，存在性以存储为唯一事实来源。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Relationship {
    /// 关系唯一标识
    pub id: String,

    /// 源术语 ID
    pub source_term_id: String,

    /// 目标术语 ID
    pub related_term_id: String,

    /// 创建时间
    pub created_at: DateTime<Utc>,
}

/// 关联术语的展示元组（由加载器产出）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RelatedTerm {
    /// 术语 ID
    pub id: String,
    /// 名称
    #[serde(default)]
    pub name: String,
    /// 定义
    #[serde(default)]
    pub definition: String,
}
