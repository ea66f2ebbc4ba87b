//! Term store client
//!
//! Read and delete operations over the backend's term records. The trait
//! is the seam the catalog flows depend on; the HTTP implementation talks
//! to the real backend.

use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;

use crate::client::http::ApiClient;
use crate::error::Result;
use crate::models::term::Term;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TermStore: Send + Sync {
    /// All term records, store order.
    async fn list_terms(&self) -> Result<Vec<Term>>;

    /// One record by identifier; a missing id is `NotFound`.
    async fn get_term(&self, id: &str) -> Result<Term>;

    /// Delete the record's vector-index entry.
    async fn delete_vector(&self, id: &str) -> Result<()>;

    /// Delete the term record itself.
    async fn delete_term(&self, id: &str) -> Result<()>;
}

#[derive(Debug, Deserialize)]
struct TermListResponse {
    #[serde(default)]
    results: Vec<Term>,
}

/// HTTP-backed term store.
pub struct HttpTermStore {
    api: Arc<ApiClient>,
}

impl HttpTermStore {
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self { api }
    }
}

#[async_trait]
impl TermStore for HttpTermStore {
    async fn list_terms(&self) -> Result<Vec<Term>> {
        let url = self.api.url("/api/fetch-term");
        let response: TermListResponse = self.api.expect_json(self.api.get(url)).await?;
        Ok(response.results)
    }

    async fn get_term(&self, id: &str) -> Result<Term> {
        let url = self.api.url_with_id("/api/vectors", id);
        self.api.expect_json(self.api.get(url)).await
    }

    async fn delete_vector(&self, id: &str) -> Result<()> {
        let url = self.api.url_with_id("/api/vectors/delete", id);
        let _: serde_json::Value = self.api.expect_json(self.api.delete(url)).await?;
        self.api.metrics().record_mutation();
        Ok(())
    }

    async fn delete_term(&self, id: &str) -> Result<()> {
        let url = self.api.url_with_id("/api/delete-term", id);
        let _: serde_json::Value = self.api.expect_json(self.api.delete(url)).await?;
        self.api.metrics().record_mutation();
        Ok(())
    }
}
