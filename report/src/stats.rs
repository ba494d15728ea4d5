//! Response aggregation and search filtering.

use std::collections::BTreeMap;

use rubric::survey::Survey;

use crate::response::ResponseRecord;

/// Distribution label for answers without a selected level.
pub const NO_LEVEL_LABEL: &str = "Sin nivel";

/// Survey-wide summary counts.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct SummaryStats {
    pub total_responses: usize,
    pub answered_questions: usize,
    pub total_questions: usize,
    pub places: BTreeMap<String, usize>,
    pub company_types: BTreeMap<String, usize>,
    pub business_lines: BTreeMap<String, usize>,
}

/// Group responses by question id, in stable id order.
pub fn group_by_question(responses: &[ResponseRecord]) -> BTreeMap<i64, Vec<&ResponseRecord>> {
    let mut grouped: BTreeMap<i64, Vec<&ResponseRecord>> = BTreeMap::new();
    for response in responses {
        grouped.entry(response.question_id).or_default().push(response);
    }
    grouped
}

pub fn summarize(survey: &Survey, responses: &[ResponseRecord]) -> SummaryStats {
    let mut stats = SummaryStats {
        total_responses: responses.len(),
        answered_questions: group_by_question(responses).len(),
        total_questions: survey.questions.len(),
        ..SummaryStats::default()
    };
    for response in responses {
        count_into(&mut stats.places, response.place.as_deref());
        count_into(&mut stats.company_types, response.company_type.as_deref());
        count_into(&mut stats.business_lines, response.business_line.as_deref());
    }
    stats
}

fn count_into(counts: &mut BTreeMap<String, usize>, value: Option<&str>) {
    if let Some(value) = value
        && !value.trim().is_empty()
    {
        *counts.entry(value.to_string()).or_insert(0) += 1;
    }
}

/// Count selected levels across `responses`, with a fallback bucket for
/// answers that carry none.
pub fn level_distribution<'a>(
    responses: impl IntoIterator<Item = &'a ResponseRecord>,
) -> BTreeMap<String, usize> {
    let mut counts = BTreeMap::new();
    for response in responses {
        let level = response.level.as_deref().unwrap_or(NO_LEVEL_LABEL);
        *counts.entry(level.to_string()).or_insert(0) += 1;
    }
    counts
}

/// Case-insensitive search over respondent name, place, company type and
/// business line. A blank term matches everything.
pub fn filter_responses<'a>(responses: &'a [ResponseRecord], term: &str) -> Vec<&'a ResponseRecord> {
    let term = term.trim().to_lowercase();
    if term.is_empty() {
        return responses.iter().collect();
    }
    responses
        .iter()
        .filter(|response| {
            contains(response.respondent_name(), &term)
                || response
                    .place
                    .as_deref()
                    .is_some_and(|value| contains(value, &term))
                || response
                    .company_type
                    .as_deref()
                    .is_some_and(|value| contains(value, &term))
                || response
                    .business_line
                    .as_deref()
                    .is_some_and(|value| contains(value, &term))
        })
        .collect()
}

fn contains(haystack: &str, lowered_term: &str) -> bool {
    haystack.to_lowercase().contains(lowered_term)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response(question_id: i64, level: Option<&str>) -> ResponseRecord {
        ResponseRecord {
            question_id,
            level: level.map(ToString::to_string),
            ..ResponseRecord::default()
        }
    }

    #[test]
    fn groups_by_question_id() {
        let responses = vec![response(2, None), response(1, None), response(2, None)];
        let grouped = group_by_question(&responses);
        assert_eq!(grouped.keys().copied().collect::<Vec<_>>(), vec![1, 2]);
        assert_eq!(grouped[&2].len(), 2);
    }

    #[test]
    fn level_distribution_buckets_missing_levels() {
        let responses = vec![
            response(1, Some("Promedio")),
            response(1, Some("Promedio")),
            response(1, None),
        ];
        let distribution = level_distribution(&responses);
        assert_eq!(distribution.get("Promedio"), Some(&2));
        assert_eq!(distribution.get(NO_LEVEL_LABEL), Some(&1));
    }

    #[test]
    fn summarize_counts_metadata_values() {
        let survey = Survey {
            name: "e".to_string(),
            description: "d".to_string(),
            start_date: "2026-01-01".to_string(),
            end_date: "2026-02-01".to_string(),
            external: true,
            items: Vec::new(),
            questions: Vec::new(),
        };
        let mut first = response(1, None);
        first.place = Some("Quito".to_string());
        let mut second = response(1, None);
        second.place = Some("Quito".to_string());
        second.company_type = Some("Privada".to_string());

        let stats = summarize(&survey, &[first, second]);
        assert_eq!(stats.total_responses, 2);
        assert_eq!(stats.answered_questions, 1);
        assert_eq!(stats.places.get("Quito"), Some(&2));
        assert_eq!(stats.company_types.get("Privada"), Some(&1));
        assert!(stats.business_lines.is_empty());
    }

    #[test]
    fn filter_matches_any_respondent_field_case_insensitively() {
        let mut named = response(1, None);
        named.full_name = Some("Ana Torres".to_string());
        let mut by_place = response(2, None);
        by_place.place = Some("Guayaquil".to_string());
        let responses = vec![named, by_place];

        assert_eq!(filter_responses(&responses, "torres").len(), 1);
        assert_eq!(filter_responses(&responses, "GUAYA").len(), 1);
        assert_eq!(filter_responses(&responses, "  ").len(), 2);
        assert!(filter_responses(&responses, "nada").is_empty());
    }

    /// Respondents without any metadata still match a search for the
    /// anonymous display name.
    #[test]
    fn filter_matches_the_anonymous_fallback_name() {
        let responses = vec![response(1, None)];
        assert_eq!(filter_responses(&responses, "anónimo").len(), 1);
    }
}
