//! TermHub - 数据建模目录客户端
//!
//! 为数据建模目录（ERObject / 业务术语）提供类型化的后端访问层，
//! 以及术语关联关系的同步流程：加载、语义推荐、关联与解除关联。

pub mod client;
pub mod config;
pub mod error;
pub mod models;
pub mod observability;
pub mod services;
