//! Semantic invariants not expressible via JSON Schema.

use std::collections::{BTreeSet, HashMap, HashSet};

use crate::core::path::{criterion_path, indicator_path};
use crate::document::{RubricDocument, level_key};

/// Maximum length of a rubric code on the wire.
pub const MAX_CODE_LEN: usize = 20;

/// Check semantic invariants of a rubric document:
/// - non-empty `codigo` of at most [`MAX_CODE_LEN`] characters
/// - non-empty, unique `niveles` with unique derived keys
/// - non-empty element names, positive strictly increasing `orden` values
/// - unique non-empty stable ids
/// - every indicator carries exactly one descriptor entry per level
///
/// Returns a list of stable, path-labelled error messages.
pub fn validate_document(document: &RubricDocument) -> Vec<String> {
    let mut errors = Vec::new();

    if document.code.trim().is_empty() {
        errors.push("codigo must not be empty".to_string());
    }
    if document.code.chars().count() > MAX_CODE_LEN {
        errors.push(format!("codigo must be at most {MAX_CODE_LEN} characters"));
    }

    let levels = &document.structure.levels;
    if levels.is_empty() {
        errors.push("niveles must not be empty".to_string());
    }
    let mut seen_levels = HashSet::new();
    let mut seen_keys: HashMap<String, &str> = HashMap::new();
    for level in levels {
        if !seen_levels.insert(level.as_str()) {
            errors.push(format!("duplicate nivel '{level}'"));
            continue;
        }
        let key = level_key(level);
        if let Some(previous) = seen_keys.insert(key.clone(), level) {
            errors.push(format!(
                "niveles '{previous}' and '{level}' derive the same key '{key}'"
            ));
        }
    }
    let expected_keys: BTreeSet<String> = levels.iter().map(|level| level_key(level)).collect();

    let mut seen_ids = HashSet::new();
    let mut previous_order: Option<u32> = None;
    for (cidx, criterion) in document.structure.criteria.iter().enumerate() {
        let path = criterion_path(cidx);

        if criterion.name.trim().is_empty() {
            errors.push(format!("{path}: nombre must not be empty"));
        }
        check_order(&path, criterion.order, &mut previous_order, &mut errors);
        check_id(&path, &criterion.id, &mut seen_ids, &mut errors);

        let mut previous_indicator_order: Option<u32> = None;
        for (iidx, indicator) in criterion.indicators.iter().enumerate() {
            let path = indicator_path(cidx, iidx);

            if indicator.name.trim().is_empty() {
                errors.push(format!("{path}: nombre must not be empty"));
            }
            check_order(&path, indicator.order, &mut previous_indicator_order, &mut errors);
            check_id(&path, &indicator.id, &mut seen_ids, &mut errors);

            let actual_keys: BTreeSet<String> = indicator.descriptors.keys().cloned().collect();
            for missing in expected_keys.difference(&actual_keys) {
                errors.push(format!("{path}: missing descriptor for level key '{missing}'"));
            }
            for extra in actual_keys.difference(&expected_keys) {
                errors.push(format!("{path}: descriptor key '{extra}' has no matching nivel"));
            }
        }
    }

    errors
}

fn check_order(path: &str, order: u32, previous: &mut Option<u32>, errors: &mut Vec<String>) {
    if order == 0 {
        errors.push(format!("{path}: orden must be >= 1"));
    }
    if let Some(previous_order) = *previous
        && order <= previous_order
    {
        errors.push(format!(
            "{path}: orden {order} not greater than preceding sibling's {previous_order}"
        ));
    }
    *previous = Some(order);
}

fn check_id<'a>(
    path: &str,
    id: &'a str,
    seen: &mut HashSet<&'a str>,
    errors: &mut Vec<String>,
) {
    if !id.is_empty() && !seen.insert(id) {
        errors.push(format!("{path}: duplicate id '{id}'"));
    }
}
