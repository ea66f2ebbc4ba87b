//! 语义推荐客户端
//!
//! 调用外部语义搜索端点，返回按服务端置信度排序的候选列表。
//! 排序语义属于后端，客户端不重排。

use std::sync::Arc;
use std::time::Instant;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;

use crate::client::http::ApiClient;
use crate::error::Result;
use crate::models::recommendation::Recommendation;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Recommender: Send + Sync {
    /// 查询候选关联术语，top_k 为 0 时使用服务端默认值
    async fn recommend(&self, query: &str, top_k: u32) -> Result<Vec<Recommendation>>;
}

#[skip_serializing_none]
#[derive(Debug, Serialize)]
struct SearchRequest<'a> {
    query: &'a str,
    top_k: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    results: Vec<Recommendation>,
}

/// HTTP 推荐客户端
pub struct HttpRecommender {
    api: Arc<ApiClient>,
}

impl HttpRecommender {
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self { api }
    }
}

#[async_trait]
impl Recommender for HttpRecommender {
    async fn recommend(&self, query: &str, top_k: u32) -> Result<Vec<Recommendation>> {
        let body = SearchRequest {
            query,
            top_k: if top_k == 0 { None } else { Some(top_k) },
        };

        let url = self.api.url("/api/search");
        let started = Instant::now();
        let response: Result<SearchResponse> =
            self.api.expect_json(self.api.post(url).json(&body)).await;
        self.api
            .metrics()
            .record_search(started.elapsed().as_millis() as u64);

        Ok(response?.results)
    }
}
