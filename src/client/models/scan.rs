//! Scan wire models

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Scan request payload sent to the scans endpoint.
///
/// The typed fields cover everything the CLI can override; anything else in
/// a user-supplied input document is preserved verbatim through the
/// flattened catch-all maps.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScanRequest {
    /// Project settings, created on demand during synthesis
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project: Option<ProjectSettings>,

    /// Scan configuration entries; synthesis guarantees at least one
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub config: Vec<ScanConfigEntry>,

    /// Presigned location of the uploaded sources archive
    #[serde(rename = "uploadUrl", skip_serializing_if = "Option::is_none")]
    pub upload_url: Option<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Project settings within a scan request
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProjectSettings {
    /// Project identifier
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Project source type, e.g. `upload`
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A single scan configuration entry
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScanConfigEntry {
    /// Engine type, e.g. `sast`
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,

    /// Engine-specific settings; synthesis guarantees this is present
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<ConfigValue>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Engine settings nested under a configuration entry
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConfigValue {
    /// Whether the scan reuses results from a prior run
    #[serde(skip_serializing_if = "Option::is_none")]
    pub incremental: Option<String>,

    /// Name of the analysis preset to apply
    #[serde(rename = "presetName", skip_serializing_if = "Option::is_none")]
    pub preset_name: Option<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Scan record returned by the service
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanResponse {
    /// Scan ID
    pub id: String,

    /// Owning project ID
    #[serde(default)]
    pub project_id: String,

    /// Scan status
    #[serde(default)]
    pub status: String,

    /// Creation time
    pub created_at: Option<DateTime<Utc>>,

    /// Last update time
    pub updated_at: Option<DateTime<Utc>>,

    /// Scan tags
    #[serde(default)]
    pub tags: HashMap<String, String>,

    /// Who started the scan
    #[serde(default)]
    pub initiator: String,

    /// User-agent string of the submitting client
    #[serde(default)]
    pub user_agent: String,
}

/// A page of scans from the list endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScansCollection {
    #[serde(default)]
    pub total_count: u64,

    #[serde(default)]
    pub scans: Vec<ScanResponse>,
}

/// One step of a scan's workflow history
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskRecord {
    #[serde(default)]
    pub source: String,

    pub timestamp: Option<DateTime<Utc>>,

    #[serde(default)]
    pub info: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_scan_request_round_trips_unknown_fields() {
        let raw = r#"{"project":{"id":"p1","owner":"me"},"custom":42}"#;
        let request: ScanRequest = serde_json::from_str(raw).unwrap();

        assert_eq!(request.project.as_ref().unwrap().id.as_deref(), Some("p1"));
        assert_eq!(
            request.project.as_ref().unwrap().extra["owner"],
            json!("me")
        );
        assert_eq!(request.extra["custom"], json!(42));

        let back = serde_json::to_value(&request).unwrap();
        assert_eq!(back["project"]["owner"], json!("me"));
        assert_eq!(back["custom"], json!(42));
    }

    #[test]
    fn test_scan_request_rejects_non_object_top_level() {
        assert!(serde_json::from_str::<ScanRequest>("[]").is_err());
        assert!(serde_json::from_str::<ScanRequest>("\"scan\"").is_err());
        assert!(serde_json::from_str::<ScanRequest>("3").is_err());
    }

    #[test]
    fn test_null_config_value_becomes_none() {
        let raw = r#"{"config":[{"type":"sast","value":null}]}"#;
        let request: ScanRequest = serde_json::from_str(raw).unwrap();
        assert!(request.config[0].value.is_none());
        assert_eq!(request.config[0].kind.as_deref(), Some("sast"));
    }

    #[test]
    fn test_scan_response_defaults_for_sparse_body() {
        let raw = r#"{"id":"s-1"}"#;
        let scan: ScanResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(scan.id, "s-1");
        assert!(scan.status.is_empty());
        assert!(scan.tags.is_empty());
        assert!(scan.created_at.is_none());
    }

    #[test]
    fn test_empty_config_value_serializes_as_object() {
        let entry = ScanConfigEntry {
            value: Some(ConfigValue::default()),
            ..Default::default()
        };
        let value = serde_json::to_value(&entry).unwrap();
        assert_eq!(value, json!({"value": {}}));
    }
}
