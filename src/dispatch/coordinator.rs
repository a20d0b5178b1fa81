use std::collections::BTreeMap;

use crate::dispatch::{
    error::{DispatchError, already_dispatched, invalid_candidate, invariant_violation, unknown_item},
    recommendation::RecommendationSet,
    types::{DispatchStatus, ItemId, RecipientId},
};

/// State machine enforcing at-most-one dispatch per item for the lifetime of
/// one recommendation set. `dispatch` contains no suspension point, so the
/// transition is atomic under cooperative scheduling.
#[derive(Debug, Default)]
pub struct DispatchCoordinator {
    set: RecommendationSet,
    records: BTreeMap<ItemId, RecipientId>,
}

impl DispatchCoordinator {
    pub fn new(set: RecommendationSet) -> Self {
        Self {
            set,
            records: BTreeMap::new(),
        }
    }

    /// Installs a fresh snapshot and discards the entire dispatch record.
    /// Prior decisions never leak into a new forecast window, even when item
    /// ids collide.
    pub fn install(&mut self, set: RecommendationSet) {
        self.set = set;
        self.records.clear();
    }

    pub fn set(&self) -> &RecommendationSet {
        &self.set
    }

    pub fn dispatched_count(&self) -> usize {
        self.records.len()
    }

    /// Commits `item_id` to `recipient_id`. Rejection order: unknown item,
    /// then an existing record regardless of target (idempotent-rejecting,
    /// same-recipient repeats included), then an unlisted recipient.
    pub fn dispatch(&mut self, item_id: &str, recipient_id: &str) -> Result<(), DispatchError> {
        let candidates = self
            .set
            .candidates_of(item_id)
            .ok_or_else(|| unknown_item(format!("item '{}' is not in the current recommendation set", item_id)))?;

        if let Some(existing) = self.records.get(item_id) {
            return Err(already_dispatched(format!(
                "item '{}' is already dispatched to '{}'",
                item_id, existing
            )));
        }

        if !candidates
            .iter()
            .any(|candidate| candidate.recipient_id == recipient_id)
        {
            return Err(invalid_candidate(format!(
                "recipient '{}' is not a listed candidate for item '{}'",
                recipient_id, item_id
            )));
        }

        self.records
            .insert(item_id.to_string(), recipient_id.to_string());
        Ok(())
    }

    pub fn status_of(&self, item_id: &str) -> DispatchStatus {
        if !self.set.contains(item_id) {
            return DispatchStatus::UnknownItem;
        }
        match self.records.get(item_id) {
            Some(recipient_id) => DispatchStatus::Dispatched {
                recipient_id: recipient_id.clone(),
            },
            None => DispatchStatus::Pending,
        }
    }

    /// Audits the dispatch record against the installed set: one record per
    /// item at most, every record keyed by a known item, every target among
    /// that item's candidates.
    pub fn assert_invariants(&self) -> Result<(), DispatchError> {
        if self.records.len() > self.set.len() {
            return Err(invariant_violation(format!(
                "{} dispatch records exceed {} items",
                self.records.len(),
                self.set.len()
            )));
        }

        for (item_id, recipient_id) in &self.records {
            let candidates = self.set.candidates_of(item_id).ok_or_else(|| {
                invariant_violation(format!(
                    "dispatch record references unknown item '{}'",
                    item_id
                ))
            })?;
            if !candidates
                .iter()
                .any(|candidate| &candidate.recipient_id == recipient_id)
            {
                return Err(invariant_violation(format!(
                    "item '{}' is dispatched to unlisted recipient '{}'",
                    item_id, recipient_id
                )));
            }
        }

        Ok(())
    }
}
