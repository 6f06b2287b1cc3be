//! ScanOps API client

use std::collections::HashMap;

use async_trait::async_trait;

use crate::error::Result;

pub mod http;
pub mod models;
pub mod response;
pub mod upload;

pub use http::ApiClient;
pub use upload::{HttpUploadChannel, UploadChannel};

use models::{
    Project, ProjectRequest, ProjectsCollection, ScanRequest, ScanResponse, ScansCollection,
    TaskRecord,
};

/// Scan operations against the scans endpoint family
#[async_trait]
pub trait ScansApi: Send + Sync {
    /// Create and run a new scan
    async fn create_scan(&self, request: &ScanRequest) -> Result<ScanResponse>;

    /// List scans, optionally narrowed by query parameters
    async fn list_scans(&self, params: &[(String, String)]) -> Result<ScansCollection>;

    /// Fetch a single scan by ID
    async fn get_scan(&self, scan_id: &str) -> Result<ScanResponse>;

    /// Fetch a scan's workflow history
    async fn scan_workflow(&self, scan_id: &str) -> Result<Vec<TaskRecord>>;

    /// Delete a scan
    async fn delete_scan(&self, scan_id: &str) -> Result<()>;

    /// Cancel a running scan
    async fn cancel_scan(&self, scan_id: &str) -> Result<()>;

    /// List all tags available for filtering scans
    async fn scan_tags(&self) -> Result<HashMap<String, Vec<String>>>;
}

/// Project operations against the projects endpoint family
#[async_trait]
pub trait ProjectsApi: Send + Sync {
    /// Create a new project
    async fn create_project(&self, request: &ProjectRequest) -> Result<Project>;

    /// List projects, optionally narrowed by query parameters
    async fn list_projects(&self, params: &[(String, String)]) -> Result<ProjectsCollection>;

    /// Fetch a single project by ID
    async fn get_project(&self, project_id: &str) -> Result<Project>;

    /// Delete a project
    async fn delete_project(&self, project_id: &str) -> Result<()>;

    /// List all tags available for filtering projects
    async fn project_tags(&self) -> Result<Vec<String>>;
}
