//! Stable-id lookup table over rubric structure.
//!
//! Positional paths break as soon as siblings are reordered or removed, so
//! elements carry stable ids assigned at creation. This index maps those ids
//! to current structural positions; the positional path strings stay a
//! display/legacy compatibility layer produced on demand.

use std::collections::HashMap;

use crate::core::path::{criterion_path, indicator_path};
use crate::document::Structure;

/// Structural position of an element: criterion index, plus the indicator
/// index when the element is an indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ElementRef {
    pub criterion: usize,
    pub indicator: Option<usize>,
}

impl ElementRef {
    /// Canonical positional path for this position.
    pub fn path(&self) -> String {
        match self.indicator {
            Some(indicator) => indicator_path(self.criterion, indicator),
            None => criterion_path(self.criterion),
        }
    }
}

/// Mapping table from stable element id to structural position.
///
/// Elements with empty ids (legacy documents) are skipped; duplicate ids are
/// an invariant violation reported by `validate_document`, and the last
/// occurrence wins here.
#[derive(Debug, Default, Clone)]
pub struct StructureIndex {
    by_id: HashMap<String, ElementRef>,
    id_by_path: HashMap<String, String>,
}

impl StructureIndex {
    pub fn build(structure: &Structure) -> Self {
        let mut index = Self::default();
        for (cidx, criterion) in structure.criteria.iter().enumerate() {
            index.insert(
                &criterion.id,
                ElementRef {
                    criterion: cidx,
                    indicator: None,
                },
            );
            for (iidx, indicator) in criterion.indicators.iter().enumerate() {
                index.insert(
                    &indicator.id,
                    ElementRef {
                        criterion: cidx,
                        indicator: Some(iidx),
                    },
                );
            }
        }
        index
    }

    fn insert(&mut self, id: &str, element: ElementRef) {
        if id.is_empty() {
            return;
        }
        self.id_by_path.insert(element.path(), id.to_string());
        self.by_id.insert(id.to_string(), element);
    }

    pub fn locate(&self, id: &str) -> Option<ElementRef> {
        self.by_id.get(id).copied()
    }

    /// Positional path currently addressing the element with `id`.
    pub fn path_of(&self, id: &str) -> Option<String> {
        self.locate(id).map(|element| element.path())
    }

    /// Stable id of the element a positional path currently addresses.
    pub fn id_at_path(&self, path: &str) -> Option<&str> {
        self.id_by_path.get(path).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }
}
