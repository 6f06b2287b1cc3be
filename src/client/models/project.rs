//! Project wire models

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Project creation payload.
///
/// Like [`ScanRequest`](super::ScanRequest), unknown fields from the input
/// document pass through untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProjectRequest {
    /// Project identifier
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Project tags
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub tags: HashMap<String, String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Project record returned by the service
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    /// Project ID
    pub id: String,

    /// Creation time
    pub created_at: Option<DateTime<Utc>>,

    /// Last update time
    pub updated_at: Option<DateTime<Utc>>,

    /// Project tags
    #[serde(default)]
    pub tags: HashMap<String, String>,

    /// Access groups
    #[serde(default)]
    pub groups: Vec<String>,
}

/// A page of projects from the list endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectsCollection {
    #[serde(default)]
    pub total_count: u64,

    #[serde(default)]
    pub projects: Vec<Project>,
}
