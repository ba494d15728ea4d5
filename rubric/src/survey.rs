//! Wire data model for surveys bound to rubric structure.

use serde::{Deserialize, Serialize};

/// A survey as submitted to / fetched from the remote API.
///
/// Date fields are opaque `YYYY-MM-DD` wire strings; the core does not
/// interpret them.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Survey {
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "descripcion")]
    pub description: String,
    #[serde(rename = "fecha_inicio")]
    pub start_date: String,
    #[serde(rename = "fecha_fin")]
    pub end_date: String,
    /// True when the survey is shared externally via PIN invitation links.
    #[serde(rename = "para_externos", default)]
    pub external: bool,
    #[serde(default)]
    pub items: Vec<SurveyItem>,
    #[serde(rename = "preguntas", default)]
    pub questions: Vec<SurveyQuestion>,
}

/// One selected indicator position included in a survey.
///
/// The paths are the canonical positional strings from the path builder and
/// are part of the persisted contract.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct SurveyItem {
    #[serde(rename = "id_resultado_aprendizaje")]
    pub outcome_id: i64,
    #[serde(rename = "criterio_path")]
    pub criterion_path: String,
    #[serde(rename = "indicador_path")]
    pub indicator_path: String,
    #[serde(rename = "orden")]
    pub order: u32,
    #[serde(rename = "obligatorio")]
    pub required: bool,
}

/// A free-text question authored against one indicator.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct SurveyQuestion {
    /// Server-assigned id. Zero on client-built questions not yet submitted.
    #[serde(default)]
    pub id: i64,
    #[serde(rename = "id_resultado_aprendizaje")]
    pub outcome_id: i64,
    #[serde(rename = "criterio_path")]
    pub criterion_path: String,
    #[serde(rename = "indicador_path")]
    pub indicator_path: String,
    #[serde(rename = "texto")]
    pub text: String,
    #[serde(rename = "orden")]
    pub order: u32,
    #[serde(rename = "obligatorio")]
    pub required: bool,
}
