//! Catalog browsing flows
//!
//! List and detail views over the term store. List failures degrade to a
//! visible failed state; detail lookups surface not-found explicitly so
//! the page can render its "not found" message with back navigation.

use std::sync::Arc;

use chrono::Utc;

use crate::client::terms::TermStore;
use crate::error::Result;
use crate::models::outcome::{FailureReason, FetchOutcome};
use crate::models::term::{ERObject, Term};
use crate::services::filter::filter_entries;
use crate::services::relationship_flow::{MutationKind, MutationReceipt};

/// Catalog facade over the term store.
pub struct CatalogService {
    terms: Arc<dyn TermStore>,
}

impl CatalogService {
    pub fn new(terms: Arc<dyn TermStore>) -> Self {
        Self { terms }
    }

    /// All term records that are not ERObjects, store order.
    pub async fn list_terms(&self) -> FetchOutcome<Vec<Term>> {
        FetchOutcome::from_list_result(self.terms.list_terms().await)
            .filter_list(|list| list.into_iter().filter(|t| !t.is_erobject()).collect())
    }

    /// Terms narrowed by the page's filter box.
    pub async fn list_terms_filtered(&self, query: &str) -> FetchOutcome<Vec<Term>> {
        self.list_terms()
            .await
            .filter_list(|list| filter_entries(&list, query))
    }

    /// ERObject records, store order.
    pub async fn list_erobjects(&self) -> FetchOutcome<Vec<ERObject>> {
        match self.terms.list_terms().await {
            Ok(list) => {
                FetchOutcome::from_list(list.iter().filter_map(Term::as_erobject).collect())
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to list erobjects");
                FetchOutcome::Failed(e.into())
            }
        }
    }

    /// ERObjects narrowed by the page's filter box.
    pub async fn list_erobjects_filtered(&self, query: &str) -> FetchOutcome<Vec<ERObject>> {
        self.list_erobjects()
            .await
            .filter_list(|list| filter_entries(&list, query))
    }

    /// One term for the detail page.
    pub async fn term_detail(&self, id: &str) -> FetchOutcome<Term> {
        match self.terms.get_term(id).await {
            Ok(term) => FetchOutcome::Loaded(term),
            Err(e) => {
                tracing::warn!(id, error = %e, "failed to load term detail");
                FetchOutcome::Failed(e.into())
            }
        }
    }

    /// One ERObject for the detail page. A record of the wrong kind is
    /// not-found from this page's point of view.
    pub async fn erobject_detail(&self, id: &str) -> FetchOutcome<ERObject> {
        match self.terms.get_term(id).await {
            Ok(record) => match record.as_erobject() {
                Some(erobject) => FetchOutcome::Loaded(erobject),
                None => FetchOutcome::Failed(FailureReason::NotFound),
            },
            Err(e) => {
                tracing::warn!(id, error = %e, "failed to load erobject detail");
                FetchOutcome::Failed(e.into())
            }
        }
    }

    /// Delete a term: its vector-index entry first, then the record.
    /// Destructive; the presentation layer gates it behind a blocking
    /// confirmation and renders the receipt as the success/failure alert.
    pub async fn delete_term(&self, id: &str) -> Result<MutationReceipt> {
        self.terms.delete_vector(id).await?;
        self.terms.delete_term(id).await?;

        tracing::info!(id, "deleted term");
        Ok(MutationReceipt {
            operation: MutationKind::DeleteTerm,
            term_id: id.to_string(),
            completed_at: Utc::now(),
        })
    }
}
