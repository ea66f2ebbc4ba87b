//! Term Relationship Flow
//!
//! One instance per focal-term view, holding that view's private state:
//! - Loader: related terms from the relationship store;
//! - Fetcher: ranked candidates from the semantic recommendation endpoint;
//! - Mutator: relate / unrelate, returning typed results.
//!
//! Mutations never refresh implicitly; the `*_then_refresh` combinators
//! run the loader strictly after the mutation settles, so the displayed
//! list never predates the latest mutation attempt. Outstanding background
//! fetches are aborted when the view is dropped.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use chrono::{DateTime, Utc};
use futures_util::future;
use parking_lot::{Mutex, RwLock};
use tokio::task::JoinHandle;

use crate::client::relationships::RelationshipStore;
use crate::client::search::Recommender;
use crate::config::config::SearchConfig;
use crate::error::{AppError, Result};
use crate::models::outcome::FetchOutcome;
use crate::models::recommendation::Recommendation;
use crate::models::relationship::RelatedTerm;
use crate::services::filter::filter_entries;

/// Focal entity of a relationship view.
#[derive(Debug, Clone, PartialEq)]
pub struct FocalTerm {
    pub id: String,
    pub name: String,
}

impl FocalTerm {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// Kind of a completed mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationKind {
    Relate,
    Unrelate,
    DeleteTerm,
}

/// Typed result of a store mutation, for the presentation layer to act on.
#[derive(Debug, Clone, PartialEq)]
pub struct MutationReceipt {
    pub operation: MutationKind,
    pub term_id: String,
    pub completed_at: DateTime<Utc>,
}

/// Relationship-management flow for one focal term.
pub struct RelationshipFlow {
    focal: RwLock<FocalTerm>,
    related: Arc<RwLock<FetchOutcome<Vec<RelatedTerm>>>>,
    recommendations: Arc<RwLock<FetchOutcome<Vec<Recommendation>>>>,
    recommendations_loading: Arc<AtomicBool>,
    fetched_query: Arc<RwLock<Option<String>>>,
    relationships: Arc<dyn RelationshipStore>,
    recommender: Arc<dyn Recommender>,
    search: SearchConfig,
    tasks: Mutex<Vec<JoinHandle<()>>>,
}

impl RelationshipFlow {
    pub fn new(
        focal: FocalTerm,
        relationships: Arc<dyn RelationshipStore>,
        recommender: Arc<dyn Recommender>,
        search: SearchConfig,
    ) -> Self {
        Self {
            focal: RwLock::new(focal),
            related: Arc::new(RwLock::new(FetchOutcome::Empty)),
            recommendations: Arc::new(RwLock::new(FetchOutcome::Empty)),
            recommendations_loading: Arc::new(AtomicBool::new(false)),
            fetched_query: Arc::new(RwLock::new(None)),
            relationships,
            recommender,
            search,
            tasks: Mutex::new(Vec::new()),
        }
    }

    // ===== Loader =====

    /// Reload the related-terms list from the store.
    pub async fn refresh_related(&self) {
        let source_id = self.focal.read().id.clone();
        run_related_fetch(
            Arc::clone(&self.related),
            Arc::clone(&self.relationships),
            source_id,
        )
        .await;
    }

    // ===== Fetcher =====

    /// Fetch ranked candidates for the focal term's name.
    ///
    /// A blank name skips the request and stores the empty state. The
    /// loading flag is cleared on every exit path, including errors.
    pub async fn refresh_recommendations(&self) {
        let query = self.focal.read().name.clone();
        run_recommendation_fetch(
            Arc::clone(&self.recommendations),
            Arc::clone(&self.recommendations_loading),
            Arc::clone(&self.fetched_query),
            Arc::clone(&self.recommender),
            self.search.clone(),
            query,
        )
        .await;
    }

    /// Mount-time load: loader and fetcher run concurrently.
    pub async fn load(&self) {
        future::join(self.refresh_related(), self.refresh_recommendations()).await;
    }

    /// Spawn the mount-time load in the background. The handles are
    /// retained so the view can cancel them on teardown.
    pub fn spawn_load(&self) {
        let focal = self.focal.read().clone();

        let related_task = tokio::spawn(run_related_fetch(
            Arc::clone(&self.related),
            Arc::clone(&self.relationships),
            focal.id,
        ));
        let recommendations_task = tokio::spawn(run_recommendation_fetch(
            Arc::clone(&self.recommendations),
            Arc::clone(&self.recommendations_loading),
            Arc::clone(&self.fetched_query),
            Arc::clone(&self.recommender),
            self.search.clone(),
            focal.name,
        ));

        let mut tasks = self.tasks.lock();
        tasks.retain(|task| !task.is_finished());
        tasks.push(related_task);
        tasks.push(recommendations_task);
    }

    /// Swap the focal term (client-side navigation between detail pages
    /// without a remount). Both fetches re-run when the focal actually
    /// changed, so the recommendation list cannot go stale.
    pub async fn set_focal(&self, focal: FocalTerm) {
        let changed = {
            let mut current = self.focal.write();
            let changed = *current != focal;
            *current = focal;
            changed
        };
        if changed {
            self.load().await;
        }
    }

    // ===== Mutator =====

    /// Accept a recommendation: upsert it as a term record, then link the
    /// focal term to it. Returns the mutation result; whether to refresh
    /// is the caller's decision (see `relate_then_refresh`).
    pub async fn relate(&self, recommendation: &Recommendation) -> Result<MutationReceipt> {
        let source_id = self.focal.read().id.clone();
        let term = recommendation.to_term();

        self.relationships.upsert_term(&term).await?;
        self.relationships
            .insert_relationship(&source_id, &term.id)
            .await?;

        tracing::info!(%source_id, related_id = %term.id, "related term");
        Ok(MutationReceipt {
            operation: MutationKind::Relate,
            term_id: term.id,
            completed_at: Utc::now(),
        })
    }

    /// Remove the association between the focal term and `related_id`.
    /// The delete filter is the (source, related) pair; an edge that does
    /// not exist reports `NotFound`.
    pub async fn unrelate(&self, related_id: &str) -> Result<MutationReceipt> {
        let source_id = self.focal.read().id.clone();
        let deleted = self
            .relationships
            .delete_relationship(&source_id, related_id)
            .await?;
        if deleted == 0 {
            return Err(AppError::NotFound(format!(
                "no relationship from {source_id} to {related_id}"
            )));
        }

        tracing::info!(%source_id, related_id, deleted, "unrelated term");
        Ok(MutationReceipt {
            operation: MutationKind::Unrelate,
            term_id: related_id.to_string(),
            completed_at: Utc::now(),
        })
    }

    /// Command then refresh: run the mutation, then reload the related
    /// list strictly after the mutation settles, success or failure.
    pub async fn relate_then_refresh(
        &self,
        recommendation: &Recommendation,
    ) -> Result<MutationReceipt> {
        let result = self.relate(recommendation).await;
        self.refresh_related().await;
        result
    }

    /// See `relate_then_refresh`.
    pub async fn unrelate_then_refresh(&self, related_id: &str) -> Result<MutationReceipt> {
        let result = self.unrelate(related_id).await;
        self.refresh_related().await;
        result
    }

    // ===== View state =====

    pub fn focal(&self) -> FocalTerm {
        self.focal.read().clone()
    }

    pub fn related(&self) -> FetchOutcome<Vec<RelatedTerm>> {
        self.related.read().clone()
    }

    pub fn recommendations(&self) -> FetchOutcome<Vec<Recommendation>> {
        self.recommendations.read().clone()
    }

    /// Spinner gate for the recommendation panel.
    pub fn is_loading_recommendations(&self) -> bool {
        self.recommendations_loading.load(Ordering::SeqCst)
    }

    /// Count badge for the related tab.
    pub fn related_count(&self) -> usize {
        self.related.read().len()
    }

    /// Related list narrowed by the filter box.
    pub fn filtered_related(&self, query: &str) -> FetchOutcome<Vec<RelatedTerm>> {
        self.related
            .read()
            .clone()
            .filter_list(|list| filter_entries(&list, query))
    }

    /// Recommendation list narrowed by the filter box. Server rank
    /// survives filtering; the list is never re-sorted client-side.
    pub fn filtered_recommendations(&self, query: &str) -> FetchOutcome<Vec<Recommendation>> {
        self.recommendations
            .read()
            .clone()
            .filter_list(|list| filter_entries(&list, query))
    }

    /// Abort every outstanding background fetch.
    pub fn cancel_pending(&self) {
        for task in self.tasks.lock().drain(..) {
            task.abort();
        }
    }

    /// Wait for spawned background fetches to settle.
    pub async fn join_pending(&self) {
        let pending: Vec<JoinHandle<()>> = self.tasks.lock().drain(..).collect();
        for task in pending {
            let _ = task.await;
        }
    }
}

impl Drop for RelationshipFlow {
    fn drop(&mut self) {
        self.cancel_pending();
    }
}

async fn run_related_fetch(
    slot: Arc<RwLock<FetchOutcome<Vec<RelatedTerm>>>>,
    store: Arc<dyn RelationshipStore>,
    source_id: String,
) {
    let outcome = FetchOutcome::from_list_result(store.list_related(&source_id).await);
    if let FetchOutcome::Failed(reason) = &outcome {
        tracing::warn!(%source_id, %reason, "failed to load related terms");
    }
    *slot.write() = outcome;
}

async fn run_recommendation_fetch(
    slot: Arc<RwLock<FetchOutcome<Vec<Recommendation>>>>,
    loading: Arc<AtomicBool>,
    fetched_query: Arc<RwLock<Option<String>>>,
    recommender: Arc<dyn Recommender>,
    search: SearchConfig,
    query: String,
) {
    if search.skip_blank_queries && query.trim().is_empty() {
        *slot.write() = FetchOutcome::Empty;
        *fetched_query.write() = Some(query);
        return;
    }

    loading.store(true, Ordering::SeqCst);
    let outcome =
        FetchOutcome::from_list_result(recommender.recommend(&query, search.top_k).await);
    if let FetchOutcome::Failed(reason) = &outcome {
        tracing::warn!(%query, %reason, "failed to fetch recommendations");
    }
    *slot.write() = outcome;
    *fetched_query.write() = Some(query);
    loading.store(false, Ordering::SeqCst);
}
