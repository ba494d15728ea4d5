//! Wire data model for rubric documents.
//!
//! Field names on the wire are the Spanish names the remote API persists;
//! renaming them would break every stored document, so Rust-side names are
//! mapped through serde.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A learning-outcome rubric as exchanged with the remote API.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct RubricDocument {
    /// Short identifier shown in listings (at most 20 characters).
    #[serde(rename = "codigo")]
    pub code: String,
    #[serde(rename = "descripcion")]
    pub description: String,
    #[serde(rename = "estructura")]
    pub structure: Structure,
}

/// Nested rubric structure: an ordered performance scale plus ordered criteria.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Structure {
    /// Performance levels. Order-significant: defines the column order in
    /// every rendering. Names must be unique.
    #[serde(rename = "niveles")]
    pub levels: Vec<String>,
    #[serde(rename = "criterios")]
    pub criteria: Vec<Criterion>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Criterion {
    /// Stable element id assigned at creation. Empty on documents written
    /// before ids existed.
    #[serde(default)]
    pub id: String,
    #[serde(rename = "nombre")]
    pub name: String,
    /// 1-based, strictly increasing among siblings. Not renumbered after
    /// deletion; new siblings take `max + 1`.
    #[serde(rename = "orden")]
    pub order: u32,
    #[serde(rename = "indicadores")]
    pub indicators: Vec<Indicator>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Indicator {
    #[serde(default)]
    pub id: String,
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "orden")]
    pub order: u32,
    /// One entry per level in `Structure.levels`, keyed by [`level_key`].
    #[serde(rename = "descriptores")]
    pub descriptors: BTreeMap<String, String>,
}

impl Indicator {
    /// Look up the descriptor for a level by its display name.
    pub fn descriptor(&self, level: &str) -> Option<&str> {
        self.descriptors.get(&level_key(level)).map(String::as_str)
    }
}

/// Derive the descriptor map key from a level display name.
///
/// Lowercase, spaces replaced with underscores. Stored descriptor keys depend
/// on this exact derivation; it is idempotent.
pub fn level_key(level: &str) -> String {
    level.to_lowercase().replace(' ', "_")
}

/// Default performance scale used when bootstrapping a new rubric.
pub const DEFAULT_LEVELS: [&str; 5] = [
    "Poco",
    "Debajo del promedio",
    "Promedio",
    "Superior al promedio",
    "Excelente",
];

/// Blank rubric used by `rubric init`.
pub fn starter_document(levels: &[String]) -> RubricDocument {
    RubricDocument {
        code: "RA-1".to_string(),
        description: "Describe el resultado de aprendizaje".to_string(),
        structure: Structure {
            levels: levels.to_vec(),
            criteria: Vec::new(),
        },
    }
}
