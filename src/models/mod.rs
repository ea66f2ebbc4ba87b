//! 核心数据模型模块
//!
//! 定义目录的核心数据结构：Term, ERObject, Relationship, Recommendation，
//! 以及统一的取数结果类型 FetchOutcome。

pub mod outcome;
pub mod recommendation;
pub mod relationship;
pub mod term;

pub use outcome::*;
pub use recommendation::*;
pub use relationship::*;
pub use term::*;
