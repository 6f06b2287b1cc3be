//! Scan request synthesis
//!
//! Merges CLI-supplied overrides into a (possibly empty) input document.
//! The document is deserialized into the typed [`ScanRequest`] model up
//! front, so a top-level non-object is rejected before any merging happens
//! and no step ever writes into an absent nested structure.

use std::path::Path;

use crate::client::models::ScanRequest;
use crate::error::{InputError, Result};

/// Optional per-flag overrides applied on top of the input document.
///
/// An unset or empty override never clears a value already present in the
/// base document.
#[derive(Debug, Clone, Default)]
pub struct ScanOverrides {
    pub project_name: Option<String>,
    pub project_source_type: Option<String>,
    pub project_type: Option<String>,
    pub incremental: Option<String>,
    pub preset_name: Option<String>,
}

/// Parse the base document and apply overrides.
///
/// After synthesis the request always carries a `project` object and a
/// `config` array whose first entry has a present (possibly empty) `value`
/// object, so downstream serialization never emits a null there.
pub fn synthesize(base: &str, overrides: &ScanOverrides) -> Result<ScanRequest> {
    let mut request: ScanRequest =
        serde_json::from_str(base).map_err(InputError::Malformed)?;

    let project = request.project.get_or_insert_with(Default::default);
    if let Some(name) = supplied(&overrides.project_name) {
        project.id = Some(name.to_string());
    }
    if let Some(source_type) = supplied(&overrides.project_source_type) {
        project.kind = Some(source_type.to_string());
    }

    if request.config.is_empty() {
        request.config.push(Default::default());
    }
    let entry = &mut request.config[0];
    if let Some(project_type) = supplied(&overrides.project_type) {
        entry.kind = Some(project_type.to_string());
    }

    let value = entry.value.get_or_insert_with(Default::default);
    if let Some(incremental) = supplied(&overrides.incremental) {
        value.incremental = Some(incremental.to_string());
    }
    if let Some(preset) = supplied(&overrides.preset_name) {
        value.preset_name = Some(preset.to_string());
    }

    Ok(request)
}

/// Read the input document from a file or an inline string.
///
/// A file path takes precedence over the inline form. Returns `Ok(None)`
/// when neither was given; the caller decides between a default document
/// and a missing-input error.
pub fn input_document(file: Option<&Path>, inline: Option<&str>) -> Result<Option<String>> {
    if let Some(path) = file {
        let contents = std::fs::read_to_string(path).map_err(|source| InputError::FileRead {
            path: path.display().to_string(),
            source,
        })?;
        return Ok(Some(contents));
    }
    Ok(inline.map(str::to_string))
}

fn supplied(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use serde_json::json;

    fn overrides(project_name: &str) -> ScanOverrides {
        ScanOverrides {
            project_name: Some(project_name.to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_synthesize_into_empty_document() {
        let request = synthesize("{}", &overrides("p1")).unwrap();

        assert_eq!(request.project.as_ref().unwrap().id.as_deref(), Some("p1"));
        assert_eq!(request.config.len(), 1);

        let value = request.config[0].value.as_ref().unwrap();
        assert!(value.incremental.is_none());
        assert!(value.preset_name.is_none());
        assert!(value.extra.is_empty());

        // The serialized form carries an empty value object, never null.
        let wire = serde_json::to_value(&request).unwrap();
        assert_eq!(wire["config"][0]["value"], json!({}));
    }

    #[test]
    fn test_absent_override_preserves_existing_value() {
        let base = r#"{"project":{"id":"existing"}}"#;
        let request = synthesize(base, &ScanOverrides::default()).unwrap();
        assert_eq!(
            request.project.as_ref().unwrap().id.as_deref(),
            Some("existing")
        );
    }

    #[test]
    fn test_empty_string_override_preserves_existing_value() {
        let base = r#"{"project":{"id":"existing"}}"#;
        let request = synthesize(base, &overrides("")).unwrap();
        assert_eq!(
            request.project.as_ref().unwrap().id.as_deref(),
            Some("existing")
        );
    }

    #[test]
    fn test_override_replaces_existing_value() {
        let base = r#"{"project":{"id":"existing"}}"#;
        let request = synthesize(base, &overrides("fresh")).unwrap();
        assert_eq!(
            request.project.as_ref().unwrap().id.as_deref(),
            Some("fresh")
        );
    }

    #[test]
    fn test_all_overrides_land_in_nested_positions() {
        let all = ScanOverrides {
            project_name: Some("p1".into()),
            project_source_type: Some("upload".into()),
            project_type: Some("sast".into()),
            incremental: Some("true".into()),
            preset_name: Some("Default".into()),
        };
        let request = synthesize("{}", &all).unwrap();

        let project = request.project.as_ref().unwrap();
        assert_eq!(project.id.as_deref(), Some("p1"));
        assert_eq!(project.kind.as_deref(), Some("upload"));

        let entry = &request.config[0];
        assert_eq!(entry.kind.as_deref(), Some("sast"));
        let value = entry.value.as_ref().unwrap();
        assert_eq!(value.incremental.as_deref(), Some("true"));
        assert_eq!(value.preset_name.as_deref(), Some("Default"));
    }

    #[test]
    fn test_null_config_value_is_replaced_with_object() {
        let base = r#"{"config":[{"type":"sast","value":null}]}"#;
        let request = synthesize(base, &ScanOverrides::default()).unwrap();
        assert!(request.config[0].value.is_some());
    }

    #[test]
    fn test_existing_config_entry_is_kept() {
        let base = r#"{"config":[{"type":"sca","value":{"presetName":"Deep"}}]}"#;
        let request = synthesize(base, &ScanOverrides::default()).unwrap();
        assert_eq!(request.config[0].kind.as_deref(), Some("sca"));
        assert_eq!(
            request.config[0].value.as_ref().unwrap().preset_name.as_deref(),
            Some("Deep")
        );
    }

    #[test]
    fn test_unknown_fields_survive_synthesis() {
        let base = r#"{"custom":{"nested":true},"project":{"owner":"me"}}"#;
        let request = synthesize(base, &overrides("p1")).unwrap();
        let wire = serde_json::to_value(&request).unwrap();
        assert_eq!(wire["custom"]["nested"], json!(true));
        assert_eq!(wire["project"]["owner"], json!("me"));
        assert_eq!(wire["project"]["id"], json!("p1"));
    }

    #[test]
    fn test_non_object_top_level_is_rejected() {
        let err = synthesize("[]", &ScanOverrides::default()).unwrap_err();
        assert!(matches!(err, Error::Input(InputError::Malformed(_))));

        let err = synthesize("syntactically broken", &ScanOverrides::default()).unwrap_err();
        assert!(matches!(err, Error::Input(InputError::Malformed(_))));
    }

    #[test]
    fn test_input_document_file_precedence() {
        use std::io::Write;
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(br#"{"from":"file"}"#).unwrap();

        let doc = input_document(Some(file.path()), Some(r#"{"from":"inline"}"#)).unwrap();
        assert_eq!(doc.as_deref(), Some(r#"{"from":"file"}"#));
    }

    #[test]
    fn test_input_document_inline_fallback() {
        let doc = input_document(None, Some("{}")).unwrap();
        assert_eq!(doc.as_deref(), Some("{}"));

        let doc = input_document(None, None).unwrap();
        assert!(doc.is_none());
    }

    #[test]
    fn test_input_document_unreadable_file() {
        let err = input_document(Some(Path::new("/no/such/input.json")), None).unwrap_err();
        assert!(matches!(err, Error::Input(InputError::FileRead { .. })));
    }
}
