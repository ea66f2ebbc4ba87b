//! 术语与 ERObject 数据模型
//!
//! 所有记录由外部存储持有；本层只保留瞬态、非权威的副本，
//! 从不分配标识符。

use serde::{Deserialize, Serialize};

/// ERObject 类别标记（存储在记录的 termEntityType 元数据列中）
pub const EROBJECT_KIND: &str = "erobject";

/// 术语（数据模型中的属性/字段定义）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Term {
    /// 唯一标识（由外部存储分配）
    pub id: String,

    /// === 术语定义 ===
    /// 名称
    #[serde(default)]
    pub name: String,

    /// 定义
    #[serde(default)]
    pub definition: String,

    /// === 描述性元数据 ===
    /// 别名（原始逗号分隔文本）
    #[serde(default)]
    pub aliases: String,

    /// 所属术语表
    #[serde(default, rename = "parentGlossary")]
    pub parent_glossary: String,

    /// 数据负责人
    #[serde(default)]
    pub stewards: String,

    /// 实体类别（"term" 或 "erobject"，空值视为术语）
    #[serde(default, rename = "termEntityType")]
    pub term_entity_type: String,

    /// 来源（如上传的 CSV 文件名）
    #[serde(default)]
    pub source: String,
}

impl Term {
    /// 是否为 ERObject 记录
    pub fn is_erobject(&self) -> bool {
        self.term_entity_type.eq_ignore_ascii_case(EROBJECT_KIND)
    }

    /// 转换为 ERObject 视图（仅当类别匹配）
    pub fn as_erobject(&self) -> Option<ERObject> {
        if !self.is_erobject() {
            return None;
        }
        Some(ERObject {
            id: self.id.clone(),
            name: self.name.clone(),
            description: self.definition.clone(),
        })
    }
}

/// ERObject（业务实体，如 "Customer Entity"）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ERObject {
    /// 唯一标识
    pub id: String,
    /// 名称
    pub name: String,
    /// 描述
    pub description: String,
}
