//! Positional path grammar for addressing rubric structure.
//!
//! Paths like `$.criterios[0].indicadores[2]` are the persisted keys that
//! bind survey questions to structural positions. The textual form is part of
//! the wire contract; the builder and parser must agree exactly.

use std::sync::LazyLock;

use regex::Regex;

/// Root marker every canonical path starts with.
pub const ROOT_MARKER: &str = "$";

const CRITERIA_FIELD: &str = "criterios";
const INDICATORS_FIELD: &str = "indicadores";

/// One access step: a field name, optionally followed by an array index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathStep {
    pub field: String,
    pub index: Option<usize>,
}

impl PathStep {
    pub fn field(name: &str) -> Self {
        Self {
            field: name.to_string(),
            index: None,
        }
    }

    pub fn indexed(name: &str, index: usize) -> Self {
        Self {
            field: name.to_string(),
            index: Some(index),
        }
    }
}

static STEP_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([A-Za-z_][A-Za-z0-9_]*)(?:\[([0-9]+)\])?$").unwrap());

/// Parse a path string into ordered access steps.
///
/// Returns `None` on malformed input (broken brackets, non-numeric index,
/// empty step). An empty path or one missing the root marker is not an
/// error; it yields no steps, which callers treat as identity resolution.
pub fn parse_path(path: &str) -> Option<Vec<PathStep>> {
    let Some(rest) = path.strip_prefix(ROOT_MARKER) else {
        return Some(Vec::new());
    };
    if rest.is_empty() {
        return Some(Vec::new());
    }
    let rest = rest.strip_prefix('.')?;

    let mut steps = Vec::new();
    for part in rest.split('.') {
        let caps = STEP_RE.captures(part)?;
        let index = match caps.get(2) {
            Some(digits) => Some(digits.as_str().parse::<usize>().ok()?),
            None => None,
        };
        steps.push(PathStep {
            field: caps[1].to_string(),
            index,
        });
    }
    Some(steps)
}

/// Canonical path for the criterion at position `criterion`.
pub fn criterion_path(criterion: usize) -> String {
    format!("{ROOT_MARKER}.{CRITERIA_FIELD}[{criterion}]")
}

/// Canonical path for the indicator at position `indicator` under the
/// criterion at position `criterion`.
pub fn indicator_path(criterion: usize, indicator: usize) -> String {
    format!("{ROOT_MARKER}.{CRITERIA_FIELD}[{criterion}].{INDICATORS_FIELD}[{indicator}]")
}

/// True if `path` has the exact shape the criterion path builder produces.
pub fn is_criterion_path(path: &str) -> bool {
    matches!(parse_path(path).as_deref(),
        Some([step]) if step.field == CRITERIA_FIELD && step.index.is_some())
}

/// True if `path` has the exact shape the indicator path builder produces.
pub fn is_indicator_path(path: &str) -> bool {
    matches!(parse_path(path).as_deref(),
        Some([first, second])
            if first.field == CRITERIA_FIELD
                && first.index.is_some()
                && second.field == INDICATORS_FIELD
                && second.index.is_some())
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Round-trip property: parsing a built path yields the steps used to
    /// build it.
    #[test]
    fn parse_of_built_indicator_path_round_trips() {
        for (criterion, indicator) in [(0, 0), (2, 0), (7, 31)] {
            let steps = parse_path(&indicator_path(criterion, indicator)).expect("valid path");
            assert_eq!(
                steps,
                vec![
                    PathStep::indexed(CRITERIA_FIELD, criterion),
                    PathStep::indexed(INDICATORS_FIELD, indicator),
                ]
            );
        }
    }

    #[test]
    fn parse_of_built_criterion_path_round_trips() {
        let steps = parse_path(&criterion_path(4)).expect("valid path");
        assert_eq!(steps, vec![PathStep::indexed(CRITERIA_FIELD, 4)]);
    }

    #[test]
    fn empty_or_rootless_path_yields_no_steps() {
        assert_eq!(parse_path(""), Some(Vec::new()));
        assert_eq!(parse_path("criterios[0]"), Some(Vec::new()));
        assert_eq!(parse_path("$"), Some(Vec::new()));
    }

    #[test]
    fn malformed_paths_are_invalid() {
        assert_eq!(parse_path("$.criterios[x]"), None);
        assert_eq!(parse_path("$.criterios[0"), None);
        assert_eq!(parse_path("$.criterios]0["), None);
        assert_eq!(parse_path("$.criterios[0].."), None);
        assert_eq!(parse_path("$criterios[0]"), None);
        assert_eq!(parse_path("$."), None);
    }

    #[test]
    fn bare_field_steps_parse_without_index() {
        let steps = parse_path("$.estructura.niveles").expect("valid path");
        assert_eq!(
            steps,
            vec![PathStep::field("estructura"), PathStep::field("niveles")]
        );
    }

    #[test]
    fn shape_checks_match_builder_output() {
        assert!(is_criterion_path(&criterion_path(0)));
        assert!(is_indicator_path(&indicator_path(1, 2)));
        assert!(!is_criterion_path(&indicator_path(1, 2)));
        assert!(!is_indicator_path(&criterion_path(0)));
        assert!(!is_indicator_path("$.criterios[0].indicadores"));
        assert!(!is_criterion_path("not a path"));
    }
}
