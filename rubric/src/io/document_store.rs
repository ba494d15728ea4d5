//! Rubric document load/save with schema + invariant validation.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result, anyhow};
use jsonschema::Draft;
use serde_json::Value;
use tracing::debug;

use crate::core::invariants::validate_document;
use crate::document::RubricDocument;

/// JSON Schema every stored rubric document must satisfy.
pub const V1_SCHEMA: &str = include_str!("../../schemas/rubric/v1.schema.json");

/// Parse and validate a raw document: schema conformance, then semantic
/// invariants. Returns the parsed document or an error listing violations.
pub fn parse_document(raw: &str) -> Result<RubricDocument> {
    let value: Value = serde_json::from_str(raw).context("parse document json")?;
    validate_schema(&value)?;
    let document: RubricDocument =
        serde_json::from_value(value).context("deserialize document")?;
    let errors = validate_document(&document);
    if !errors.is_empty() {
        return Err(anyhow!("document invariants failed:\n- {}", errors.join("\n- ")));
    }
    Ok(document)
}

/// Load and validate a rubric document from disk.
pub fn load_document(path: &Path) -> Result<RubricDocument> {
    debug!(path = %path.display(), "loading document");
    let raw = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let document = parse_document(&raw).with_context(|| format!("load {}", path.display()))?;
    debug!(
        codigo = %document.code,
        criterios = document.structure.criteria.len(),
        "document loaded"
    );
    Ok(document)
}

/// Write a document to disk as pretty JSON with a trailing newline.
///
/// Uses a temp file + rename so a concurrent reader never sees a torn file.
pub fn write_document(path: &Path, document: &RubricDocument) -> Result<()> {
    debug!(path = %path.display(), codigo = %document.code, "writing document");
    let mut payload = serde_json::to_string_pretty(document).context("serialize document")?;
    payload.push('\n');
    let tmp_path = path.with_extension("json.tmp");
    fs::write(&tmp_path, payload)
        .with_context(|| format!("write temp document {}", tmp_path.display()))?;
    fs::rename(&tmp_path, path)
        .with_context(|| format!("replace document {}", path.display()))?;
    Ok(())
}

/// Validate a JSON instance against the v1 rubric schema (Draft 2020-12).
pub fn validate_schema(instance: &Value) -> Result<()> {
    let schema: Value = serde_json::from_str(V1_SCHEMA).context("parse embedded schema")?;
    let compiled = jsonschema::options()
        .with_draft(Draft::Draft202012)
        .build(&schema)
        .context("compile rubric schema")?;
    let messages: Vec<String> = compiled
        .iter_errors(instance)
        .map(|err| err.to_string())
        .collect();
    if !messages.is_empty() {
        return Err(anyhow!("schema validation failed:\n- {}", messages.join("\n- ")));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{TempDocs, sample_document};

    /// Write → load round-trip preserves the document.
    #[test]
    fn write_then_load_round_trips() {
        let temp = TempDocs::new().expect("tempdir");
        let path = temp.path().join("rubric.json");
        let document = sample_document();
        write_document(&path, &document).expect("write");
        let loaded = load_document(&path).expect("load");
        assert_eq!(loaded, document);
    }

    #[test]
    fn schema_rejects_missing_fields() {
        let temp = TempDocs::new().expect("tempdir");
        let path = temp
            .write("bad.json", r#"{"codigo": "RA-1", "descripcion": "d"}"#)
            .expect("write");
        let err = load_document(&path).expect_err("should fail");
        assert!(format!("{err:#}").contains("schema validation failed"));
    }

    #[test]
    fn invariant_violations_surface_in_error() {
        let mut document = sample_document();
        document.structure.criteria[0].name = String::new();
        let raw = serde_json::to_string(&document).expect("serialize");
        let err = parse_document(&raw).expect_err("should fail");
        assert!(format!("{err:#}").contains("nombre must not be empty"));
    }

    /// Legacy documents without stable ids still load.
    #[test]
    fn legacy_document_without_ids_loads() {
        let raw = r#"{
            "codigo": "RA-1",
            "descripcion": "d",
            "estructura": {
                "niveles": ["Low"],
                "criterios": [
                    {"nombre": "C", "orden": 1, "indicadores": [
                        {"nombre": "I", "orden": 1, "descriptores": {"low": "x"}}
                    ]}
                ]
            }
        }"#;
        let document = parse_document(raw).expect("load legacy");
        assert!(document.structure.criteria[0].id.is_empty());
    }
}
