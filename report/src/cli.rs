//! CLI command implementations.

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::debug;

use rubric::io::document_store::load_document;
use rubric::io::survey_store::load_survey;

use crate::export::run_export;
use crate::job::ExportJob;
use crate::pin::generate_invitations;
use crate::questions::group_questions;
use crate::response::load_results;
use crate::stats::{filter_responses, group_by_question, level_distribution, summarize};

/// Print summary statistics and per-question level distributions.
pub fn stats_command(job_path: &Path, search: Option<&str>) -> Result<()> {
    let job = ExportJob::load(job_path)?;
    let survey = load_survey(&job.survey)?;
    let payload = load_results(&job.responses)?;
    debug!(responses = payload.responses.len(), "results loaded");

    let filtered = filter_responses(&payload.responses, search.unwrap_or(""));
    let owned: Vec<_> = filtered.into_iter().cloned().collect();
    let summary = summarize(&survey, &owned);

    println!("stats: survey={}", survey.name);
    println!(
        "stats: responses={} questions_answered={}/{}",
        summary.total_responses, summary.answered_questions, summary.total_questions
    );
    print_counts("lugar", &summary.places);
    print_counts("tipo_empresa", &summary.company_types);
    print_counts("giro", &summary.business_lines);

    let grouped = group_by_question(&owned);
    for question in &survey.questions {
        let Some(answers) = grouped.get(&question.id) else {
            continue;
        };
        println!("question: id={} texto={}", question.id, question.text);
        for (level, count) in level_distribution(answers.iter().copied()) {
            println!("  level: {level}={count}");
        }
    }
    Ok(())
}

fn print_counts(label: &str, counts: &BTreeMap<String, usize>) {
    for (value, count) in counts {
        println!("stats: {label} {value}={count}");
    }
}

/// Run an export job and print the CSV location.
pub fn export_command(job_path: &Path) -> Result<()> {
    let job = ExportJob::load(job_path)?;
    let csv_path = run_export(&job).context("run export")?;
    println!("export: csv={}", csv_path.display());
    println!("export: meta={}", job.output_dir.join("meta.json").display());
    Ok(())
}

/// Print the survey's questions grouped by indicator, with resolved names.
pub fn questions_command(job_path: &Path) -> Result<()> {
    let job = ExportJob::load(job_path)?;
    let survey = load_survey(&job.survey)?;
    let mut rubrics = BTreeMap::new();
    for rubric in &job.rubrics {
        let document = load_document(&rubric.path)?;
        rubrics.insert(
            rubric.id,
            serde_json::to_value(&document).context("serialize rubric")?,
        );
    }

    for group in group_questions(&survey, &rubrics) {
        println!(
            "group: ra={} criterio={} indicador={}",
            group.outcome_id, group.criterion_name, group.indicator_name
        );
        for question in &group.questions {
            println!("  question: {}", question.text);
        }
    }
    Ok(())
}

/// Generate invitation PINs for an external survey.
pub fn pins_command(survey_id: i64, count: usize) -> Result<()> {
    for invitation in generate_invitations(survey_id, count) {
        println!("pin: {} id_encuesta={}", invitation.pin, invitation.survey_id);
    }
    Ok(())
}
