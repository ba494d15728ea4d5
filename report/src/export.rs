//! CSV export of survey results.
//!
//! The framing matches the export consumers already depend on: every field
//! double-quoted with `"` escaped as `""`, rows joined with CRLF, and the
//! whole file prefixed with a UTF-8 BOM so spreadsheet tools pick up the
//! encoding. Alongside the CSV a `meta.json` records input digests and a
//! timestamp for reproducibility tracking.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sha2::{Digest, Sha256};
use tracing::debug;

use rubric::io::document_store::load_document;
use rubric::io::survey_store::load_survey;
use rubric::survey::Survey;

use crate::job::ExportJob;
use crate::questions::resolve_name;
use crate::response::{ResponseRecord, load_results};
use crate::stats::group_by_question;

pub const EXPORT_HEADERS: [&str; 11] = [
    "Pregunta",
    "Encuestado",
    "Criterio",
    "Indicador",
    "Nivel Seleccionado",
    "Comentario",
    "Lugar",
    "Tipo Empresa",
    "Giro",
    "Egresados Universidad",
    "Fecha Respuesta",
];

/// Metadata written beside the CSV.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportMeta {
    pub survey_name: String,
    /// RFC 3339 UTC timestamp of the export.
    pub generated_at: String,
    /// Data rows written, excluding the header.
    pub rows: usize,
    pub inputs: Vec<InputDigest>,
}

/// SHA-256 digest of one input file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputDigest {
    pub path: String,
    pub sha256: String,
}

/// Quote a CSV field, escaping embedded quotes.
pub fn csv_field(text: &str) -> String {
    format!("\"{}\"", text.replace('"', "\"\""))
}

/// Render a wire datetime as `dd/mm/yyyy`; unparseable or absent values
/// render as `-`.
pub fn format_response_date(value: Option<&str>) -> String {
    let Some(value) = value else {
        return "-".to_string();
    };
    if let Ok(datetime) = DateTime::parse_from_rfc3339(value) {
        return datetime.format("%d/%m/%Y").to_string();
    }
    value
        .get(..10)
        .and_then(|prefix| NaiveDate::parse_from_str(prefix, "%Y-%m-%d").ok())
        .map_or_else(|| "-".to_string(), |date| date.format("%d/%m/%Y").to_string())
}

/// `resultados_encuesta_<name>_<yyyy-mm-dd>.csv`, whitespace runs in the
/// name collapsed to underscores.
pub fn export_file_name(survey_name: &str, date: NaiveDate) -> String {
    let name = survey_name.split_whitespace().collect::<Vec<_>>().join("_");
    format!("resultados_encuesta_{}_{}.csv", name, date.format("%Y-%m-%d"))
}

/// Build the complete CSV content, BOM included, plus the number of data
/// rows. The count is taken per row, not from the joined text: quoted
/// fields may embed CRLF themselves.
///
/// Rows follow question order in the survey; within a question, responses
/// keep their payload order.
pub fn build_csv(
    survey: &Survey,
    responses: &[ResponseRecord],
    rubrics: &BTreeMap<i64, Value>,
) -> (String, usize) {
    let grouped = group_by_question(responses);
    let mut lines = Vec::new();
    lines.push(
        EXPORT_HEADERS
            .iter()
            .map(|header| csv_field(header))
            .collect::<Vec<_>>()
            .join(","),
    );

    for question in &survey.questions {
        let Some(answers) = grouped.get(&question.id) else {
            continue;
        };
        let criterion = resolve_name(rubrics, question.outcome_id, &question.criterion_path);
        let indicator = resolve_name(rubrics, question.outcome_id, &question.indicator_path);
        for response in answers {
            let date = format_response_date(response.answered_at.as_deref());
            let row = [
                question.text.as_str(),
                response.respondent_name(),
                criterion.as_str(),
                indicator.as_str(),
                response.level.as_deref().unwrap_or("N/A"),
                response.comment.as_deref().unwrap_or("-"),
                response.place.as_deref().unwrap_or("-"),
                response.company_type.as_deref().unwrap_or("-"),
                response.business_line.as_deref().unwrap_or("-"),
                response.university_graduates.as_deref().unwrap_or("-"),
                date.as_str(),
            ]
            .map(csv_field)
            .join(",");
            lines.push(row);
        }
    }

    let rows = lines.len() - 1;
    (format!("\u{FEFF}{}", lines.join("\r\n")), rows)
}

/// Run a whole export job: load inputs, write the CSV and its `meta.json`,
/// return the CSV path.
pub fn run_export(job: &ExportJob) -> Result<PathBuf> {
    let survey = load_survey(&job.survey)?;
    let payload = load_results(&job.responses)?;
    let mut rubrics = BTreeMap::new();
    for rubric in &job.rubrics {
        let document = load_document(&rubric.path)?;
        rubrics.insert(rubric.id, serde_json::to_value(&document).context("serialize rubric")?);
    }

    let now = Utc::now();
    let (contents, rows) = build_csv(&survey, &payload.responses, &rubrics);

    fs::create_dir_all(&job.output_dir)
        .with_context(|| format!("create directory {}", job.output_dir.display()))?;
    let csv_path = job
        .output_dir
        .join(export_file_name(&survey.name, now.date_naive()));
    fs::write(&csv_path, contents).with_context(|| format!("write {}", csv_path.display()))?;
    debug!(path = %csv_path.display(), rows, "csv written");

    let mut inputs = vec![
        input_digest(&job.survey)?,
        input_digest(&job.responses)?,
    ];
    for rubric in &job.rubrics {
        inputs.push(input_digest(&rubric.path)?);
    }
    let meta = ExportMeta {
        survey_name: survey.name.clone(),
        generated_at: now.to_rfc3339(),
        rows,
        inputs,
    };
    let meta_path = job.output_dir.join("meta.json");
    let mut meta_json = serde_json::to_string_pretty(&meta).context("serialize meta")?;
    meta_json.push('\n');
    fs::write(&meta_path, meta_json).with_context(|| format!("write {}", meta_path.display()))?;

    Ok(csv_path)
}

fn input_digest(path: &Path) -> Result<InputDigest> {
    Ok(InputDigest {
        path: path.display().to_string(),
        sha256: file_sha256(path)?,
    })
}

fn file_sha256(path: &Path) -> Result<String> {
    let contents = fs::read(path).with_context(|| format!("read {}", path.display()))?;
    let mut hasher = Sha256::new();
    hasher.update(contents);
    let digest = hasher.finalize();
    Ok(hex::encode(digest))
}
