//! Relationship store client
//!
//! CRUD over the `term_relationships` association table, joined to the
//! `terms` table for display fields. Routed through the same backend
//! boundary as every other persistence call.

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::client::http::ApiClient;
use crate::error::Result;
use crate::models::relationship::{RelatedTerm, Relationship};
use crate::models::term::Term;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RelationshipStore: Send + Sync {
    /// Terms related to `source_id` (select-with-join), store order.
    async fn list_related(&self, source_id: &str) -> Result<Vec<RelatedTerm>>;

    /// Insert-or-update a term record keyed by its identifier. Accepting
    /// the same recommendation twice must not create a second row.
    async fn upsert_term(&self, term: &Term) -> Result<()>;

    /// Insert a directed source → related association.
    async fn insert_relationship(&self, source_id: &str, related_id: &str)
    -> Result<Relationship>;

    /// Delete the association matching the (source, related) pair.
    /// Returns the number of rows deleted. The filter is always the full
    /// pair: a term related to several sources loses only this one edge.
    async fn delete_relationship(&self, source_id: &str, related_id: &str) -> Result<u64>;
}

#[derive(Debug, Deserialize)]
struct RelatedListResponse {
    #[serde(default)]
    results: Vec<RelatedTerm>,
}

#[derive(Debug, Serialize)]
struct RelateRequest<'a> {
    source_term_id: &'a str,
    related_term_id: &'a str,
}

#[derive(Debug, Deserialize)]
struct UnrelateResponse {
    #[serde(default)]
    deleted: u64,
}

/// HTTP-backed relationship store.
pub struct HttpRelationshipStore {
    api: Arc<ApiClient>,
}

impl HttpRelationshipStore {
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self { api }
    }
}

#[async_trait]
impl RelationshipStore for HttpRelationshipStore {
    async fn list_related(&self, source_id: &str) -> Result<Vec<RelatedTerm>> {
        let url = self.api.url_with_id("/api/fetch-relations", source_id);
        let response: RelatedListResponse = self.api.expect_json(self.api.get(url)).await?;
        Ok(response.results)
    }

    async fn upsert_term(&self, term: &Term) -> Result<()> {
        let url = self.api.url("/api/upsert-term");
        let _: serde_json::Value = self.api.expect_json(self.api.post(url).json(term)).await?;
        Ok(())
    }

    async fn insert_relationship(
        &self,
        source_id: &str,
        related_id: &str,
    ) -> Result<Relationship> {
        let body = RelateRequest {
            source_term_id: source_id,
            related_term_id: related_id,
        };
        let url = self.api.url("/api/relate");
        let relationship: Relationship =
            self.api.expect_json(self.api.post(url).json(&body)).await?;
        self.api.metrics().record_mutation();
        Ok(relationship)
    }

    async fn delete_relationship(&self, source_id: &str, related_id: &str) -> Result<u64> {
        let url = format!(
            "{}/{}",
            self.api.url_with_id("/api/unrelate", source_id),
            urlencoding::encode(related_id)
        );
        let response: UnrelateResponse = self.api.expect_json(self.api.delete(url)).await?;
        self.api.metrics().record_mutation();
        Ok(response.deleted)
    }
}
