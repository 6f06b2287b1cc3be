//! Wire models for the ScanOps REST API

mod project;
mod scan;

pub use project::{Project, ProjectRequest, ProjectsCollection};
pub use scan::{
    ConfigValue, ProjectSettings, ScanConfigEntry, ScanRequest, ScanResponse, ScansCollection,
    TaskRecord,
};

use serde::{Deserialize, Serialize};

/// Structured error body returned by the service on 400 and 500 responses
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorModel {
    /// Service-assigned error code
    pub code: i32,

    /// Human-readable failure description
    pub message: String,
}
