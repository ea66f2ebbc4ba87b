//! CSV 导入客户端
//!
//! 将 CSV 文件以 multipart 形式上传到后端导入端点。
//! 解析与落库由后端完成；后端无论成败都返回 HTTP 200，
//! 失败通过响应体内的 error 字段表达。

use std::sync::Arc;

use serde::Deserialize;

use crate::client::http::ApiClient;
use crate::error::Result;

/// 导入结果
#[derive(Debug, Clone, PartialEq)]
pub struct UploadReport {
    /// 后端返回的摘要，如 "Upserted 42 records from terms.csv"
    pub message: String,
}

/// 上传视图的状态行
#[derive(Debug, Clone, PartialEq, Default)]
pub enum UploadStatus {
    #[default]
    Idle,
    Uploading,
    Succeeded(String),
    Failed(String),
}

impl UploadStatus {
    /// 展示文本
    pub fn line(&self) -> String {
        match self {
            UploadStatus::Idle => String::new(),
            UploadStatus::Uploading => "Uploading...".to_string(),
            UploadStatus::Succeeded(message) => format!("Success: {message}"),
            UploadStatus::Failed(message) => format!("Error: {message}"),
        }
    }
}

#[derive(Debug, Deserialize)]
struct UploadResponse {
    #[serde(default)]
    message: String,
}

/// CSV 导入客户端
pub struct CsvIngestClient {
    api: Arc<ApiClient>,
}

impl CsvIngestClient {
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self { api }
    }

    /// 上传一个 CSV 文件
    pub async fn upload(&self, file_name: &str, bytes: Vec<u8>) -> Result<UploadReport> {
        let part = reqwest::multipart::Part::bytes(bytes)
            .file_name(file_name.to_string())
            .mime_str("text/csv")?;
        let form = reqwest::multipart::Form::new().part("file", part);

        let url = self.api.url("/api/upload-csv");
        let request = self.api.post(url).multipart(form);
        let response: UploadResponse = self.api.expect_json(request).await?;

        tracing::info!(file_name, message = %response.message, "csv upload accepted");
        Ok(UploadReport {
            message: response.message,
        })
    }

    /// 上传并直接产出状态行
    pub async fn upload_with_status(&self, file_name: &str, bytes: Vec<u8>) -> UploadStatus {
        match self.upload(file_name, bytes).await {
            Ok(report) => UploadStatus::Succeeded(report.message),
            Err(e) => UploadStatus::Failed(e.to_string()),
        }
    }
}
