//! Path resolution over a JSON rubric document.
//!
//! Lookups are speculative: callers probe partial or stale documents during
//! interactive editing, so every miss is `None`, never a panic.

use serde_json::Value;

use crate::core::path::{PathStep, parse_path};

/// Resolve `path` against `document`.
///
/// Returns the addressed sub-value, or `None` when the path is malformed,
/// a field is absent, an indexed field is not an array, or the index is out
/// of bounds. No steps (empty path) resolves to the document itself.
pub fn resolve<'a>(document: &'a Value, path: &str) -> Option<&'a Value> {
    let steps = parse_path(path)?;
    resolve_steps(document, &steps)
}

/// Resolve pre-parsed steps against `document`.
pub fn resolve_steps<'a>(document: &'a Value, steps: &[PathStep]) -> Option<&'a Value> {
    let mut current = document;
    for step in steps {
        let field = current.as_object()?.get(&step.field)?;
        current = match step.index {
            Some(index) => field.as_array()?.get(index)?,
            None => field,
        };
    }
    Some(current)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> Value {
        json!({
            "criterios": [
                {"indicadores": [{"nombre": "A"}, {"nombre": "B"}]}
            ]
        })
    }

    #[test]
    fn resolves_nested_indicator() {
        let document = sample();
        let value = resolve(&document, "$.criterios[0].indicadores[1]").expect("resolved");
        assert_eq!(value, &json!({"nombre": "B"}));
    }

    #[test]
    fn out_of_bounds_index_is_not_found() {
        let document = sample();
        assert_eq!(resolve(&document, "$.criterios[0].indicadores[5]"), None);
        assert_eq!(resolve(&document, "$.criterios[3]"), None);
    }

    #[test]
    fn missing_field_is_not_found() {
        let document = sample();
        assert_eq!(resolve(&document, "$.rubricas[0]"), None);
        assert_eq!(resolve(&document, "$.criterios[0].descriptores"), None);
    }

    #[test]
    fn indexing_a_non_array_is_not_found() {
        let document = json!({"criterios": {"nested": true}});
        assert_eq!(resolve(&document, "$.criterios[0]"), None);
    }

    #[test]
    fn malformed_path_is_not_found() {
        let document = sample();
        assert_eq!(resolve(&document, "$.criterios[zero]"), None);
    }

    #[test]
    fn no_steps_resolves_to_document_itself() {
        let document = sample();
        assert_eq!(resolve(&document, ""), Some(&document));
        assert_eq!(resolve(&document, "$"), Some(&document));
    }

    #[test]
    fn bare_field_steps_descend_objects() {
        let document = json!({"estructura": {"niveles": ["Low", "High"]}});
        let value = resolve(&document, "$.estructura.niveles").expect("resolved");
        assert_eq!(value, &json!(["Low", "High"]));
    }
}
