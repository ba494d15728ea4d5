//! Survey load/save with structural validation.

use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result, anyhow};
use tracing::debug;

use crate::core::path::{is_criterion_path, is_indicator_path};
use crate::survey::Survey;

/// Check structural invariants of a survey:
/// - non-empty `nombre`
/// - item and question paths have the canonical builder shapes
/// - every question's position appears among the selected items
/// - positive strictly increasing `orden` across items and across questions
pub fn validate_survey(survey: &Survey) -> Vec<String> {
    let mut errors = Vec::new();

    if survey.name.trim().is_empty() {
        errors.push("nombre must not be empty".to_string());
    }

    let mut item_positions = BTreeSet::new();
    let mut previous_order: Option<u32> = None;
    for (idx, item) in survey.items.iter().enumerate() {
        if !is_criterion_path(&item.criterion_path) {
            errors.push(format!("items[{idx}]: malformed criterio_path '{}'", item.criterion_path));
        }
        if !is_indicator_path(&item.indicator_path) {
            errors.push(format!("items[{idx}]: malformed indicador_path '{}'", item.indicator_path));
        }
        check_order(&format!("items[{idx}]"), item.order, &mut previous_order, &mut errors);
        item_positions.insert((
            item.outcome_id,
            item.criterion_path.clone(),
            item.indicator_path.clone(),
        ));
    }

    let mut previous_order: Option<u32> = None;
    for (idx, question) in survey.questions.iter().enumerate() {
        if question.text.trim().is_empty() {
            errors.push(format!("preguntas[{idx}]: texto must not be empty"));
        }
        check_order(&format!("preguntas[{idx}]"), question.order, &mut previous_order, &mut errors);
        let position = (
            question.outcome_id,
            question.criterion_path.clone(),
            question.indicator_path.clone(),
        );
        if !item_positions.contains(&position) {
            errors.push(format!(
                "preguntas[{idx}]: no selected item at '{}'",
                question.indicator_path
            ));
        }
    }

    errors
}

fn check_order(label: &str, order: u32, previous: &mut Option<u32>, errors: &mut Vec<String>) {
    if order == 0 {
        errors.push(format!("{label}: orden must be >= 1"));
    }
    if let Some(previous_order) = *previous
        && order <= previous_order
    {
        errors.push(format!(
            "{label}: orden {order} not greater than preceding {previous_order}"
        ));
    }
    *previous = Some(order);
}

/// Load and validate a survey from disk.
pub fn load_survey(path: &Path) -> Result<Survey> {
    debug!(path = %path.display(), "loading survey");
    let raw = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let survey: Survey =
        serde_json::from_str(&raw).with_context(|| format!("parse {}", path.display()))?;
    let errors = validate_survey(&survey);
    if !errors.is_empty() {
        return Err(anyhow!(
            "survey invariants failed in {}:\n- {}",
            path.display(),
            errors.join("\n- ")
        ));
    }
    Ok(survey)
}

/// Write a survey to disk as pretty JSON with a trailing newline.
pub fn write_survey(path: &Path, survey: &Survey) -> Result<()> {
    let errors = validate_survey(survey);
    if !errors.is_empty() {
        return Err(anyhow!("survey invariants failed:\n- {}", errors.join("\n- ")));
    }
    debug!(
        path = %path.display(),
        items = survey.items.len(),
        preguntas = survey.questions.len(),
        "writing survey"
    );
    let mut payload = serde_json::to_string_pretty(survey).context("serialize survey")?;
    payload.push('\n');
    fs::write(path, payload).with_context(|| format!("write {}", path.display()))
}
