//! Wire types for survey responses.
//!
//! Field names are the Spanish names the remote API persists. Respondent
//! metadata is optional throughout: internal respondents carry
//! `nombre_completo`, external ones arrive via a PIN invitation and carry
//! `usada_por` plus company fields.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::pin::Invitation;

/// Fallback display name when no respondent metadata is present.
pub const ANONYMOUS: &str = "Anónimo";

/// A single answer to one survey question.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ResponseRecord {
    #[serde(rename = "id_encuesta_pregunta")]
    pub question_id: i64,
    #[serde(rename = "nombre_nivel_seleccionado")]
    pub level: Option<String>,
    #[serde(rename = "comentario")]
    pub comment: Option<String>,
    #[serde(rename = "nombre_completo")]
    pub full_name: Option<String>,
    #[serde(rename = "usada_por")]
    pub used_by: Option<String>,
    #[serde(rename = "lugar")]
    pub place: Option<String>,
    #[serde(rename = "tipo_empresa")]
    pub company_type: Option<String>,
    #[serde(rename = "giro")]
    pub business_line: Option<String>,
    #[serde(rename = "egresados_universidad")]
    pub university_graduates: Option<String>,
    /// ISO datetime wire string; rendered locale-style only at export time.
    #[serde(rename = "fecha_respuesta")]
    pub answered_at: Option<String>,
}

impl ResponseRecord {
    /// Display name: `nombre_completo`, else `usada_por`, else `Anónimo`.
    pub fn respondent_name(&self) -> &str {
        non_blank(self.full_name.as_deref())
            .or_else(|| non_blank(self.used_by.as_deref()))
            .unwrap_or(ANONYMOUS)
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|text| !text.trim().is_empty())
}

/// Results endpoint payload: answers plus the invitations issued for the
/// survey.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ResultsPayload {
    #[serde(rename = "resultados", default)]
    pub responses: Vec<ResponseRecord>,
    #[serde(rename = "invitaciones", default)]
    pub invitations: Vec<Invitation>,
}

pub fn load_results(path: &Path) -> Result<ResultsPayload> {
    let contents = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    serde_json::from_str(&contents).with_context(|| format!("parse {}", path.display()))
}
