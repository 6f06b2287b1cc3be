//! HTTP implementation of the ScanOps API client

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use governor::clock::DefaultClock;
use governor::state::{InMemoryState, NotKeyed};
use governor::{Quota, RateLimiter};
use reqwest::Client as HttpClient;
use serde_json::json;

use super::models::{
    Project, ProjectRequest, ProjectsCollection, ScanRequest, ScanResponse, ScansCollection,
    TaskRecord,
};
use super::response;
use super::{ProjectsApi, ScansApi};
use crate::error::{Error, Result};

/// ScanOps API base URL
pub(crate) const API_BASE_URL: &str = "https://api.scanops.io/api/v1";

/// Rate limit: 360 requests per minute (6 per second)
const RATE_LIMIT_PER_SECOND: u32 = 6;

/// ScanOps API client
pub struct ApiClient {
    http: HttpClient,
    base_url: String,
    api_key: Option<String>,
    rate_limiter: Arc<RateLimiter<NotKeyed, InMemoryState, DefaultClock>>,
}

impl ApiClient {
    /// Create a client against the production API
    pub fn new(api_key: Option<String>) -> Result<Self> {
        Self::with_host(api_key, None)
    }

    /// Create a client against a custom API host (tests, on-prem installs)
    pub fn with_host(api_key: Option<String>, host: Option<String>) -> Result<Self> {
        let http = HttpClient::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| Error::Network(e.to_string()))?;

        let quota = Quota::per_second(std::num::NonZeroU32::new(RATE_LIMIT_PER_SECOND).unwrap());
        let rate_limiter = Arc::new(RateLimiter::direct(quota));

        Ok(Self {
            http,
            base_url: host.unwrap_or_else(|| API_BASE_URL.to_string()),
            api_key,
            rate_limiter,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Rate-limit, attach credentials, send, and collect status and body.
    ///
    /// Interpretation of the status/body pair stays with the caller so each
    /// endpoint can name its own success code and schema.
    async fn execute(&self, request: reqwest::RequestBuilder) -> Result<(u16, String)> {
        self.rate_limiter.until_ready().await;

        let request = match &self.api_key {
            Some(key) => request.header("X-ApiKey", key),
            None => request,
        };

        let response = request.send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;
        Ok((status, body))
    }
}

#[async_trait]
impl ScansApi for ApiClient {
    async fn create_scan(&self, request: &ScanRequest) -> Result<ScanResponse> {
        let builder = self.http.post(self.url("/scans")).json(request);
        let (status, body) = self.execute(builder).await?;
        response::interpret(status, &body, 201, "scan create")
    }

    async fn list_scans(&self, params: &[(String, String)]) -> Result<ScansCollection> {
        let builder = self.http.get(self.url("/scans")).query(params);
        let (status, body) = self.execute(builder).await?;
        response::interpret(status, &body, 200, "scan list")
    }

    async fn get_scan(&self, scan_id: &str) -> Result<ScanResponse> {
        let builder = self.http.get(self.url(&format!("/scans/{scan_id}")));
        let (status, body) = self.execute(builder).await?;
        response::interpret(status, &body, 200, "scan")
    }

    async fn scan_workflow(&self, scan_id: &str) -> Result<Vec<TaskRecord>> {
        let builder = self
            .http
            .get(self.url(&format!("/scans/{scan_id}/workflow")));
        let (status, body) = self.execute(builder).await?;
        response::interpret(status, &body, 200, "scan workflow")
    }

    async fn delete_scan(&self, scan_id: &str) -> Result<()> {
        let builder = self.http.delete(self.url(&format!("/scans/{scan_id}")));
        let (status, body) = self.execute(builder).await?;
        response::interpret_empty(status, &body, 200, "scan delete")
    }

    async fn cancel_scan(&self, scan_id: &str) -> Result<()> {
        let builder = self
            .http
            .patch(self.url(&format!("/scans/{scan_id}")))
            .json(&json!({"status": "Canceled"}));
        let (status, body) = self.execute(builder).await?;
        response::interpret_empty(status, &body, 200, "scan cancel")
    }

    async fn scan_tags(&self) -> Result<HashMap<String, Vec<String>>> {
        let builder = self.http.get(self.url("/scans/tags"));
        let (status, body) = self.execute(builder).await?;
        response::interpret(status, &body, 200, "scan tags")
    }
}

#[async_trait]
impl ProjectsApi for ApiClient {
    async fn create_project(&self, request: &ProjectRequest) -> Result<Project> {
        let builder = self.http.post(self.url("/projects")).json(request);
        let (status, body) = self.execute(builder).await?;
        response::interpret(status, &body, 201, "project create")
    }

    async fn list_projects(&self, params: &[(String, String)]) -> Result<ProjectsCollection> {
        let builder = self.http.get(self.url("/projects")).query(params);
        let (status, body) = self.execute(builder).await?;
        response::interpret(status, &body, 200, "project list")
    }

    async fn get_project(&self, project_id: &str) -> Result<Project> {
        let builder = self.http.get(self.url(&format!("/projects/{project_id}")));
        let (status, body) = self.execute(builder).await?;
        response::interpret(status, &body, 200, "project")
    }

    async fn delete_project(&self, project_id: &str) -> Result<()> {
        let builder = self
            .http
            .delete(self.url(&format!("/projects/{project_id}")));
        let (status, body) = self.execute(builder).await?;
        response::interpret_empty(status, &body, 200, "project delete")
    }

    async fn project_tags(&self) -> Result<Vec<String>> {
        let builder = self.http.get(self.url("/projects/tags"));
        let (status, body) = self.execute(builder).await?;
        response::interpret(status, &body, 200, "project tags")
    }
}
