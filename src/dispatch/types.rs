use serde::{Deserialize, Serialize};

pub type ItemId = String;
pub type RecipientId = String;

/// One at-risk inventory unit together with its ranked recipient candidates,
/// exactly as received from the prediction service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InventoryItem {
    pub id: ItemId,
    pub name: String,
    pub risk_score: f64,
    pub quantity: u32,
    pub candidates: Vec<RecipientCandidate>,
}

/// A donation destination ranked for a specific item. Candidate order is the
/// recommendation rank and must never be re-sorted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecipientCandidate {
    pub recipient_id: RecipientId,
    pub name: String,
    pub distance_km: f64,
    pub suitability_score: f64,
    pub address: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StoreLocation {
    pub lat: f64,
    pub lon: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum DispatchStatus {
    Pending,
    Dispatched { recipient_id: RecipientId },
    UnknownItem,
}

impl DispatchStatus {
    pub fn is_dispatched(&self) -> bool {
        matches!(self, DispatchStatus::Dispatched { .. })
    }
}
