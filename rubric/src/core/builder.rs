//! Form-builder mutations over an in-progress rubric document.
//!
//! The document is edited entirely client-side until submission, so every
//! operation mutates in place and stays total: out-of-range indices are
//! reported through the return value, never a panic.

use std::collections::BTreeMap;

use rand::Rng;
use rand::distributions::Alphanumeric;

use crate::document::{Criterion, Indicator, RubricDocument, level_key};

/// Length of generated stable element ids.
pub const ELEMENT_ID_LEN: usize = 8;

/// Generate a stable element id: lowercase alphanumeric, fixed length.
pub fn generate_element_id() -> String {
    let mut rng = rand::thread_rng();
    std::iter::repeat_with(|| rng.sample(Alphanumeric))
        .map(char::from)
        .take(ELEMENT_ID_LEN)
        .collect::<String>()
        .to_lowercase()
}

/// Append a blank criterion and return its index.
///
/// `orden` is `max(existing) + 1`; orders are never renumbered after a
/// deletion, so monotonicity holds across delete/re-add.
pub fn add_criterion(document: &mut RubricDocument) -> usize {
    let order = next_order(document.structure.criteria.iter().map(|c| c.order));
    document.structure.criteria.push(Criterion {
        id: generate_element_id(),
        name: String::new(),
        order,
        indicators: Vec::new(),
    });
    document.structure.criteria.len() - 1
}

pub fn rename_criterion(document: &mut RubricDocument, criterion: usize, name: &str) -> bool {
    match document.structure.criteria.get_mut(criterion) {
        Some(entry) => {
            entry.name = name.to_string();
            true
        }
        None => false,
    }
}

pub fn remove_criterion(document: &mut RubricDocument, criterion: usize) -> bool {
    if criterion >= document.structure.criteria.len() {
        return false;
    }
    document.structure.criteria.remove(criterion);
    true
}

/// Append a blank indicator under `criterion` and return its index.
///
/// Its descriptor map is pre-populated with one empty entry per current
/// level, keyed by the level-key derivation.
pub fn add_indicator(document: &mut RubricDocument, criterion: usize) -> Option<usize> {
    let descriptors: BTreeMap<String, String> = document
        .structure
        .levels
        .iter()
        .map(|level| (level_key(level), String::new()))
        .collect();
    let entry = document.structure.criteria.get_mut(criterion)?;
    let order = next_order(entry.indicators.iter().map(|i| i.order));
    entry.indicators.push(Indicator {
        id: generate_element_id(),
        name: String::new(),
        order,
        descriptors,
    });
    Some(entry.indicators.len() - 1)
}

pub fn set_indicator_name(
    document: &mut RubricDocument,
    criterion: usize,
    indicator: usize,
    name: &str,
) -> bool {
    match indicator_mut(document, criterion, indicator) {
        Some(entry) => {
            entry.name = name.to_string();
            true
        }
        None => false,
    }
}

/// Set the descriptor text for `level` (a display name, keyed through
/// `level_key`). Fails when the indicator is missing or the level is not in
/// the document's scale.
pub fn set_descriptor(
    document: &mut RubricDocument,
    criterion: usize,
    indicator: usize,
    level: &str,
    text: &str,
) -> bool {
    let key = level_key(level);
    match indicator_mut(document, criterion, indicator)
        .and_then(|entry| entry.descriptors.get_mut(&key))
    {
        Some(slot) => {
            *slot = text.to_string();
            true
        }
        None => false,
    }
}

pub fn remove_indicator(document: &mut RubricDocument, criterion: usize, indicator: usize) -> bool {
    let Some(entry) = document.structure.criteria.get_mut(criterion) else {
        return false;
    };
    if indicator >= entry.indicators.len() {
        return false;
    }
    entry.indicators.remove(indicator);
    true
}

/// Replace the performance scale and re-key every descriptor map.
///
/// Entries whose derived key survives the change keep their text; new levels
/// get empty entries; keys no longer backed by a level are dropped.
pub fn set_levels(document: &mut RubricDocument, levels: &[String]) {
    let keys: Vec<String> = levels.iter().map(|level| level_key(level)).collect();
    for criterion in &mut document.structure.criteria {
        for indicator in &mut criterion.indicators {
            let old = std::mem::take(&mut indicator.descriptors);
            indicator.descriptors = keys
                .iter()
                .map(|key| (key.clone(), old.get(key).cloned().unwrap_or_default()))
                .collect();
        }
    }
    document.structure.levels = levels.to_vec();
}

fn indicator_mut(
    document: &mut RubricDocument,
    criterion: usize,
    indicator: usize,
) -> Option<&mut Indicator> {
    document
        .structure
        .criteria
        .get_mut(criterion)?
        .indicators
        .get_mut(indicator)
}

fn next_order(orders: impl Iterator<Item = u32>) -> u32 {
    orders.max().unwrap_or(0) + 1
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::starter_document;

    fn blank() -> RubricDocument {
        starter_document(&["Poco".to_string(), "Superior al promedio".to_string()])
    }

    #[test]
    fn generated_ids_have_fixed_length_and_charset() {
        let id = generate_element_id();
        assert_eq!(id.len(), ELEMENT_ID_LEN);
        assert!(id.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit()));
        assert_ne!(generate_element_id(), generate_element_id());
    }

    #[test]
    fn add_criterion_assigns_id_and_next_order() {
        let mut document = blank();
        let first = add_criterion(&mut document);
        let second = add_criterion(&mut document);
        assert_eq!((first, second), (0, 1));
        assert_eq!(document.structure.criteria[0].order, 1);
        assert_eq!(document.structure.criteria[1].order, 2);
        assert!(!document.structure.criteria[0].id.is_empty());
    }

    /// Orders are not renumbered after deletion; re-adding continues past the
    /// highest surviving order.
    #[test]
    fn orders_stay_monotonic_across_delete_and_re_add() {
        let mut document = blank();
        add_criterion(&mut document);
        add_criterion(&mut document);
        assert!(remove_criterion(&mut document, 0));
        let index = add_criterion(&mut document);
        assert_eq!(document.structure.criteria[index].order, 3);
        let orders: Vec<u32> = document.structure.criteria.iter().map(|c| c.order).collect();
        assert_eq!(orders, vec![2, 3]);
    }

    #[test]
    fn add_indicator_pre_populates_descriptors_per_level() {
        let mut document = blank();
        add_criterion(&mut document);
        let index = add_indicator(&mut document, 0).expect("indicator added");
        let indicator = &document.structure.criteria[0].indicators[index];
        assert_eq!(indicator.order, 1);
        assert_eq!(
            indicator.descriptors.keys().collect::<Vec<_>>(),
            vec!["poco", "superior_al_promedio"]
        );
        assert!(indicator.descriptors.values().all(String::is_empty));
    }

    #[test]
    fn set_descriptor_rejects_levels_outside_the_scale() {
        let mut document = blank();
        add_criterion(&mut document);
        add_indicator(&mut document, 0);
        assert!(set_descriptor(&mut document, 0, 0, "Superior al promedio", "texto"));
        assert!(!set_descriptor(&mut document, 0, 0, "Excelente", "texto"));
        assert_eq!(
            document.structure.criteria[0].indicators[0].descriptor("Superior al promedio"),
            Some("texto")
        );
    }

    #[test]
    fn out_of_range_operations_report_failure() {
        let mut document = blank();
        assert!(!rename_criterion(&mut document, 0, "x"));
        assert!(!remove_criterion(&mut document, 0));
        assert!(add_indicator(&mut document, 0).is_none());
        assert!(!set_indicator_name(&mut document, 0, 0, "x"));
        assert!(!remove_indicator(&mut document, 0, 0));
    }

    /// Changing the scale re-keys descriptors: surviving keys keep their
    /// text, new levels start empty, stale keys are dropped.
    #[test]
    fn set_levels_re_keys_descriptors() {
        let mut document = blank();
        add_criterion(&mut document);
        add_indicator(&mut document, 0);
        set_descriptor(&mut document, 0, 0, "Poco", "se mantiene");

        set_levels(
            &mut document,
            &["Poco".to_string(), "Excelente".to_string()],
        );

        let descriptors = &document.structure.criteria[0].indicators[0].descriptors;
        assert_eq!(descriptors.get("poco").map(String::as_str), Some("se mantiene"));
        assert_eq!(descriptors.get("excelente").map(String::as_str), Some(""));
        assert!(!descriptors.contains_key("superior_al_promedio"));
        assert_eq!(document.structure.levels, vec!["Poco", "Excelente"]);
    }
}
