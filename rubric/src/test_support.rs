//! Test-only helpers for constructing rubric structures.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::document::{Criterion, Indicator, RubricDocument, Structure, level_key};

/// Temporary directory for store round-trip tests.
pub struct TempDocs {
    dir: tempfile::TempDir,
}

impl TempDocs {
    pub fn new() -> Result<Self> {
        let dir = tempfile::tempdir().context("create tempdir")?;
        Ok(Self { dir })
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Write raw contents under the temp root and return the full path.
    pub fn write(&self, name: &str, contents: &str) -> Result<PathBuf> {
        let path = self.dir.path().join(name);
        std::fs::write(&path, contents).with_context(|| format!("write {}", path.display()))?;
        Ok(path)
    }
}

/// Structure with explicit levels and criteria.
pub fn structure(levels: &[&str], criteria: Vec<Criterion>) -> Structure {
    Structure {
        levels: levels.iter().map(ToString::to_string).collect(),
        criteria,
    }
}

/// Criterion with a fixed id (empty id models a legacy document).
pub fn criterion(id: &str, name: &str, order: u32, indicators: Vec<Indicator>) -> Criterion {
    Criterion {
        id: id.to_string(),
        name: name.to_string(),
        order,
        indicators,
    }
}

/// Indicator with empty descriptors pre-keyed for `levels`.
pub fn indicator(id: &str, name: &str, order: u32, levels: &[&str]) -> Indicator {
    let descriptors = levels
        .iter()
        .map(|level| (level_key(level), String::new()))
        .collect();
    Indicator {
        id: id.to_string(),
        name: name.to_string(),
        order,
        descriptors,
    }
}

/// Indicator with explicit descriptor entries (already-derived keys).
pub fn indicator_with(id: &str, name: &str, order: u32, descriptors: &[(&str, &str)]) -> Indicator {
    let descriptors: BTreeMap<String, String> = descriptors
        .iter()
        .map(|(key, text)| (key.to_string(), text.to_string()))
        .collect();
    Indicator {
        id: id.to_string(),
        name: name.to_string(),
        order,
        descriptors,
    }
}

/// Small complete document: two levels, one criterion, two indicators with
/// every descriptor filled.
pub fn sample_document() -> RubricDocument {
    RubricDocument {
        code: "RA-1".to_string(),
        description: "Comunicación efectiva".to_string(),
        structure: structure(
            &["Low", "High"],
            vec![criterion(
                "crit-0001",
                "Comunicación",
                1,
                vec![
                    indicator_with(
                        "ind-0001",
                        "Claridad",
                        1,
                        &[("low", "Poco claro"), ("high", "Muy claro")],
                    ),
                    indicator_with(
                        "ind-0002",
                        "Escucha",
                        2,
                        &[("low", "No escucha"), ("high", "Escucha activa")],
                    ),
                ],
            )],
        ),
    }
}
