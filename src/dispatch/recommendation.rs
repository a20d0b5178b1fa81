use std::{collections::BTreeMap, fmt};

use crate::dispatch::types::{InventoryItem, ItemId, RecipientCandidate, StoreLocation};

/// Immutable per-session snapshot of at-risk items and their ranked recipient
/// candidates. Replaced wholesale on refetch; no mutation after construction.
#[derive(Debug, Clone, Default)]
pub struct RecommendationSet {
    items: Vec<InventoryItem>,
    index: BTreeMap<ItemId, usize>,
    store_location: Option<StoreLocation>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DuplicateItemId(pub ItemId);

impl fmt::Display for DuplicateItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "duplicate item id '{}'", self.0)
    }
}

impl std::error::Error for DuplicateItemId {}

impl RecommendationSet {
    /// An empty snapshot, the valid "no high-risk items" terminal state.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Builds a snapshot from items in service order. Item order and each
    /// item's candidate order are kept exactly as given.
    pub fn new(
        items: Vec<InventoryItem>,
        store_location: Option<StoreLocation>,
    ) -> Result<Self, DuplicateItemId> {
        let mut index = BTreeMap::new();
        for (position, item) in items.iter().enumerate() {
            if index.insert(item.id.clone(), position).is_some() {
                return Err(DuplicateItemId(item.id.clone()));
            }
        }
        Ok(Self {
            items,
            index,
            store_location,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Items in the order received from the service, assumed risk-prioritized
    /// upstream.
    pub fn items(&self) -> &[InventoryItem] {
        &self.items
    }

    pub fn contains(&self, item_id: &str) -> bool {
        self.index.contains_key(item_id)
    }

    pub fn get(&self, item_id: &str) -> Option<&InventoryItem> {
        self.index.get(item_id).map(|position| &self.items[*position])
    }

    /// Ranked candidates for an item, in recommendation order.
    pub fn candidates_of(&self, item_id: &str) -> Option<&[RecipientCandidate]> {
        self.get(item_id).map(|item| item.candidates.as_slice())
    }

    pub fn store_location(&self) -> Option<StoreLocation> {
        self.store_location
    }
}
