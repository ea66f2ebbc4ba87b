//! Backend client layer
//!
//! Typed access to the external catalog backend: term store, semantic
//! recommendation endpoint, relationship store and CSV ingestion. All
//! persistence goes through this one service boundary.

pub mod http;
pub mod ingest;
pub mod relationships;
pub mod search;
pub mod terms;

pub use http::ApiClient;
pub use ingest::{CsvIngestClient, UploadReport, UploadStatus};
pub use relationships::{HttpRelationshipStore, RelationshipStore};
pub use search::{HttpRecommender, Recommender};
pub use terms::{HttpTermStore, TermStore};
