//! Question grouping for presentation.
//!
//! Survey questions are grouped by the indicator they were authored against
//! and enriched with the criterion/indicator names resolved from the rubric
//! documents. Resolution is speculative: the rubric may have been edited
//! since the survey was built, so misses render as `N/A`.

use std::collections::BTreeMap;

use rubric::core::resolve::resolve;
use rubric::survey::{Survey, SurveyQuestion};
use serde_json::Value;

pub const UNRESOLVED: &str = "N/A";

/// Questions sharing one (outcome, criterion, indicator) position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionGroup {
    pub outcome_id: i64,
    pub criterion_path: String,
    pub indicator_path: String,
    pub criterion_name: String,
    pub indicator_name: String,
    pub questions: Vec<SurveyQuestion>,
}

/// Resolve the `nombre` of the element at `path` inside the rubric document
/// for `outcome_id`.
pub fn resolve_name(rubrics: &BTreeMap<i64, Value>, outcome_id: i64, path: &str) -> String {
    rubrics
        .get(&outcome_id)
        .and_then(|document| resolve(document, path))
        .and_then(|element| element.get("nombre"))
        .and_then(Value::as_str)
        .filter(|name| !name.is_empty())
        .map_or_else(|| UNRESOLVED.to_string(), ToString::to_string)
}

/// Group the survey's questions by indicator position, in first-appearance
/// order.
pub fn group_questions(survey: &Survey, rubrics: &BTreeMap<i64, Value>) -> Vec<QuestionGroup> {
    let mut groups: Vec<QuestionGroup> = Vec::new();
    for question in &survey.questions {
        let position = groups.iter().position(|group| {
            group.outcome_id == question.outcome_id
                && group.criterion_path == question.criterion_path
                && group.indicator_path == question.indicator_path
        });
        let index = match position {
            Some(index) => index,
            None => {
                groups.push(QuestionGroup {
                    outcome_id: question.outcome_id,
                    criterion_path: question.criterion_path.clone(),
                    indicator_path: question.indicator_path.clone(),
                    criterion_name: resolve_name(
                        rubrics,
                        question.outcome_id,
                        &question.criterion_path,
                    ),
                    indicator_name: resolve_name(
                        rubrics,
                        question.outcome_id,
                        &question.indicator_path,
                    ),
                    questions: Vec::new(),
                });
                groups.len() - 1
            }
        };
        groups[index].questions.push(question.clone());
    }
    groups
}

#[cfg(test)]
mod tests {
    use super::*;
    use rubric::core::builder::{
        add_criterion, add_indicator, rename_criterion, set_indicator_name,
    };
    use rubric::document::starter_document;

    fn question(outcome: i64, cpath: &str, ipath: &str, text: &str) -> SurveyQuestion {
        SurveyQuestion {
            id: 0,
            outcome_id: outcome,
            criterion_path: cpath.to_string(),
            indicator_path: ipath.to_string(),
            text: text.to_string(),
            order: 1,
            required: true,
        }
    }

    fn survey_with(questions: Vec<SurveyQuestion>) -> Survey {
        Survey {
            name: "e".to_string(),
            description: "d".to_string(),
            start_date: "2026-01-01".to_string(),
            end_date: "2026-02-01".to_string(),
            external: false,
            items: Vec::new(),
            questions,
        }
    }

    fn rubric_values() -> BTreeMap<i64, Value> {
        let mut document = starter_document(&["Low".to_string()]);
        let cidx = add_criterion(&mut document);
        rename_criterion(&mut document, cidx, "Comunicación");
        let iidx = add_indicator(&mut document, cidx).expect("indicator");
        set_indicator_name(&mut document, cidx, iidx, "Claridad");
        BTreeMap::from([(42, serde_json::to_value(&document).expect("to_value"))])
    }

    /// Questions against the same indicator collapse into one group with
    /// resolved names; stale paths fall back to the sentinel.
    #[test]
    fn groups_in_first_appearance_order_with_resolved_names() {
        let cpath = "$.criterios[0]";
        let ipath = "$.criterios[0].indicadores[0]";
        let survey = survey_with(vec![
            question(42, cpath, ipath, "P1"),
            question(42, cpath, "$.criterios[0].indicadores[9]", "P2"),
            question(42, cpath, ipath, "P3"),
        ]);

        let groups = group_questions(&survey, &rubric_values());
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].criterion_name, "Comunicación");
        assert_eq!(groups[0].indicator_name, "Claridad");
        assert_eq!(groups[0].questions.len(), 2);
        assert_eq!(groups[1].indicator_name, UNRESOLVED);
        assert_eq!(groups[1].questions.len(), 1);
    }

    #[test]
    fn unknown_outcome_resolves_to_sentinel() {
        assert_eq!(
            resolve_name(&rubric_values(), 99, "$.criterios[0]"),
            UNRESOLVED
        );
    }
}
