use foodflow::dispatch::{InventoryItem, RecipientCandidate, RecommendationSet};


pub fn candidate(recipient_id: &str) -> RecipientCandidate {
    RecipientCandidate {
        recipient_id: recipient_id.to_string(),
        name: format!("{} Community Kitchen", recipient_id),
        distance_km: 4.2,
        suitability_score: 78.5,
        address: format!("12 Market Road, {}", recipient_id),
    }
}

pub fn item(id: &str, recipient_ids: &[&str]) -> InventoryItem {
    InventoryItem {
        id: id.to_string(),
        name: format!("Product {}", id),
        risk_score: 62.0,
        quantity: 50,
        candidates: recipient_ids.iter().map(|rid| candidate(rid)).collect(),
    }
}

pub fn set_of(items: Vec<InventoryItem>) -> RecommendationSet {
    RecommendationSet::new(items, None).expect("fixture items must have unique ids")
}
