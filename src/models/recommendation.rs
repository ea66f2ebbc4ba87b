//! 语义推荐数据模型
//!
//! 推荐是语义搜索服务返回的未持久化候选，只有在用户显式接受后
//! 才会写回为 Term + Relationship。

use serde::{Deserialize, Serialize};

use crate::models::term::Term;

/// 语义推荐候选
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    /// 候选术语 ID
    pub id: String,

    /// 名称
    #[serde(default)]
    pub name: String,

    /// 定义
    #[serde(default)]
    pub definition: String,

    /// 别名
    #[serde(default)]
    pub aliases: String,

    /// 相关性分数 (0.0 - 1.0)，排序由服务端给定
    pub score: f32,

    /// 推荐理由（人类可读）
    #[serde(default)]
    pub reason: String,
}

impl Recommendation {
    /// 置信度百分比（四舍五入）
    pub fn confidence_percent(&self) -> u32 {
        (self.score * 100.0).round() as u32
    }

    /// 置信度展示文本，如 "92% confidence"
    pub fn confidence_label(&self) -> String {
        format!("{}% confidence", self.confidence_percent())
    }

    /// 接受推荐时转换为可持久化的术语记录
    pub fn to_term(&self) -> Term {
        Term {
            id: self.id.clone(),
            name: self.name.clone(),
            definition: self.definition.clone(),
            aliases: self.aliases.clone(),
            term_entity_type: "term".to_string(),
            ..Term::default()
        }
    }
}
