//! 服务模块

pub mod catalog;
pub mod filter;
pub mod relationship_flow;

pub use catalog::CatalogService;
pub use filter::{Searchable, filter_entries};
pub use relationship_flow::{FocalTerm, MutationKind, MutationReceipt, RelationshipFlow};
