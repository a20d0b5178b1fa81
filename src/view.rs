use serde::Serialize;

use crate::dispatch::{DispatchCoordinator, DispatchStatus};

/// Render row for one candidate. `dispatch_enabled` goes false for every
/// candidate of an item once that item is dispatched.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CandidateView {
    pub recipient_id: String,
    pub name: String,
    pub distance_km: f64,
    pub suitability_score: f64,
    pub address: String,
    pub selected: bool,
    pub dispatch_enabled: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouteCardView {
    pub item_id: String,
    pub name: String,
    pub risk_score: f64,
    pub quantity: u32,
    pub status: DispatchStatus,
    pub candidates: Vec<CandidateView>,
}

/// Projects the coordinator state into render rows. Item and candidate order
/// mirror the recommendation set exactly.
pub fn route_cards(coordinator: &DispatchCoordinator) -> Vec<RouteCardView> {
    coordinator
        .set()
        .items()
        .iter()
        .map(|item| {
            let status = coordinator.status_of(&item.id);
            let dispatched_to = match &status {
                DispatchStatus::Dispatched { recipient_id } => Some(recipient_id.clone()),
                _ => None,
            };
            RouteCardView {
                item_id: item.id.clone(),
                name: item.name.clone(),
                risk_score: item.risk_score,
                quantity: item.quantity,
                status,
                candidates: item
                    .candidates
                    .iter()
                    .map(|candidate| CandidateView {
                        recipient_id: candidate.recipient_id.clone(),
                        name: candidate.name.clone(),
                        distance_km: candidate.distance_km,
                        suitability_score: candidate.suitability_score,
                        address: candidate.address.clone(),
                        selected: dispatched_to.as_deref()
                            == Some(candidate.recipient_id.as_str()),
                        dispatch_enabled: dispatched_to.is_none(),
                    })
                    .collect(),
            }
        })
        .collect()
}
