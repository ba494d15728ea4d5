//! Survey-building selection state and its editor.
//!
//! Replaces the original untyped map-of-maps with named structs:
//! outcome → criterion → indicator → [`SelectionLeaf`]. Mutations touch only
//! the path from the root to the addressed leaf; sibling branches are never
//! rebuilt. All operations are total over well-formed sessions and are
//! applied in the order the corresponding UI events occurred.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::core::path::{criterion_path, indicator_path};
use crate::document::Structure;
use crate::survey::{SurveyItem, SurveyQuestion};

/// Remote id of a learning-outcome rubric.
pub type OutcomeId = i64;

/// A question authored against an indicator, pending submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionItem {
    pub text: String,
}

/// Selection state for a single indicator position.
///
/// Two states only: unselected (default) and selected. Toggling off discards
/// the draft and every committed item; there is no undo.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionLeaf {
    pub selected: bool,
    pub draft_text: String,
    pub items: Vec<QuestionItem>,
}

impl SelectionLeaf {
    fn selected() -> Self {
        Self {
            selected: true,
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CriterionSelection {
    /// Leaves keyed by canonical indicator path.
    pub indicators: BTreeMap<String, SelectionLeaf>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutcomeSelection {
    /// Criterion branches keyed by canonical criterion path.
    pub criteria: BTreeMap<String, CriterionSelection>,
}

/// The indicator whose draft question is currently being authored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemCursor {
    pub outcome: OutcomeId,
    pub criterion_path: String,
    pub indicator_path: String,
}

/// Items and questions assembled for atomic submission with a survey.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SurveyPlan {
    pub items: Vec<SurveyItem>,
    pub questions: Vec<SurveyQuestion>,
}

/// Selection map plus the authoring cursor, owned together so selection
/// changes and cursor changes stay in step.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditorSession {
    outcomes: BTreeMap<OutcomeId, OutcomeSelection>,
    active: Option<ItemCursor>,
}

impl EditorSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_outcome_selected(&self, outcome: OutcomeId) -> bool {
        self.outcomes.contains_key(&outcome)
    }

    pub fn outcome(&self, outcome: OutcomeId) -> Option<&OutcomeSelection> {
        self.outcomes.get(&outcome)
    }

    pub fn leaf(
        &self,
        outcome: OutcomeId,
        criterion_path: &str,
        indicator_path: &str,
    ) -> Option<&SelectionLeaf> {
        self.outcomes
            .get(&outcome)?
            .criteria
            .get(criterion_path)?
            .indicators
            .get(indicator_path)
    }

    pub fn active(&self) -> Option<&ItemCursor> {
        self.active.as_ref()
    }

    /// Select or deselect a whole outcome.
    ///
    /// Selecting pre-expands every criterion/indicator position of
    /// `structure` to a selected leaf with empty draft and items.
    /// Deselecting removes the entire subtree and clears the cursor when it
    /// pointed into it.
    pub fn toggle_outcome(&mut self, outcome: OutcomeId, structure: &Structure) {
        if self.outcomes.remove(&outcome).is_some() {
            if self.active.as_ref().is_some_and(|cursor| cursor.outcome == outcome) {
                self.active = None;
            }
            return;
        }

        let mut criteria = BTreeMap::new();
        for (cidx, criterion) in structure.criteria.iter().enumerate() {
            let mut indicators = BTreeMap::new();
            for iidx in 0..criterion.indicators.len() {
                indicators.insert(indicator_path(cidx, iidx), SelectionLeaf::selected());
            }
            criteria.insert(criterion_path(cidx), CriterionSelection { indicators });
        }
        self.outcomes.insert(outcome, OutcomeSelection { criteria });
    }

    /// Flip the selection of one indicator leaf.
    ///
    /// Selecting a leaf absent from the map constructs the intermediate
    /// branches on demand. Deselecting discards the draft and items and
    /// clears a cursor pointing at the leaf.
    pub fn toggle_item(&mut self, outcome: OutcomeId, criterion_path: &str, indicator_path: &str) {
        let leaf = self
            .outcomes
            .entry(outcome)
            .or_default()
            .criteria
            .entry(criterion_path.to_string())
            .or_default()
            .indicators
            .entry(indicator_path.to_string())
            .or_default();

        if leaf.selected {
            *leaf = SelectionLeaf::default();
            if self.points_at(outcome, criterion_path, indicator_path) {
                self.active = None;
            }
        } else {
            *leaf = SelectionLeaf::selected();
        }
    }

    /// Update the draft question text of a leaf and make it the authoring
    /// target. No-op when the leaf is absent.
    pub fn set_draft_text(
        &mut self,
        outcome: OutcomeId,
        criterion_path: &str,
        indicator_path: &str,
        text: &str,
    ) {
        let Some(leaf) = leaf_mut(&mut self.outcomes, outcome, criterion_path, indicator_path)
        else {
            return;
        };
        leaf.draft_text = text.to_string();
        self.active = Some(ItemCursor {
            outcome,
            criterion_path: criterion_path.to_string(),
            indicator_path: indicator_path.to_string(),
        });
    }

    /// Append the trimmed draft to the leaf's items and clear the draft.
    /// A blank draft (or an absent leaf) is a no-op.
    pub fn commit_draft_item(
        &mut self,
        outcome: OutcomeId,
        criterion_path: &str,
        indicator_path: &str,
    ) {
        let Some(leaf) = leaf_mut(&mut self.outcomes, outcome, criterion_path, indicator_path)
        else {
            return;
        };
        let text = leaf.draft_text.trim();
        if text.is_empty() {
            return;
        }
        leaf.items.push(QuestionItem {
            text: text.to_string(),
        });
        leaf.draft_text.clear();
    }

    /// Remove a committed item by position. Out-of-range is a no-op.
    pub fn remove_item(
        &mut self,
        outcome: OutcomeId,
        criterion_path: &str,
        indicator_path: &str,
        index: usize,
    ) {
        let Some(leaf) = leaf_mut(&mut self.outcomes, outcome, criterion_path, indicator_path)
        else {
            return;
        };
        if index < leaf.items.len() {
            leaf.items.remove(index);
        }
    }

    /// Assemble the submission payload: one item per selected leaf and one
    /// question per committed draft, in deterministic map order, with 1-based
    /// running `orden` values.
    pub fn plan(&self) -> SurveyPlan {
        let mut plan = SurveyPlan::default();
        for (outcome, selection) in &self.outcomes {
            for (criterion_path, criterion) in &selection.criteria {
                for (indicator_path, leaf) in &criterion.indicators {
                    if !leaf.selected {
                        continue;
                    }
                    plan.items.push(SurveyItem {
                        outcome_id: *outcome,
                        criterion_path: criterion_path.clone(),
                        indicator_path: indicator_path.clone(),
                        order: plan.items.len() as u32 + 1,
                        required: true,
                    });
                    for item in &leaf.items {
                        plan.questions.push(SurveyQuestion {
                            id: 0,
                            outcome_id: *outcome,
                            criterion_path: criterion_path.clone(),
                            indicator_path: indicator_path.clone(),
                            text: item.text.clone(),
                            order: plan.questions.len() as u32 + 1,
                            required: true,
                        });
                    }
                }
            }
        }
        plan
    }

    fn points_at(&self, outcome: OutcomeId, criterion_path: &str, indicator_path: &str) -> bool {
        self.active.as_ref().is_some_and(|cursor| {
            cursor.outcome == outcome
                && cursor.criterion_path == criterion_path
                && cursor.indicator_path == indicator_path
        })
    }
}

fn leaf_mut<'a>(
    outcomes: &'a mut BTreeMap<OutcomeId, OutcomeSelection>,
    outcome: OutcomeId,
    criterion_path: &str,
    indicator_path: &str,
) -> Option<&'a mut SelectionLeaf> {
    outcomes
        .get_mut(&outcome)?
        .criteria
        .get_mut(criterion_path)?
        .indicators
        .get_mut(indicator_path)
}
