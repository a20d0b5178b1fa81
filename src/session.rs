use std::sync::Arc;

use serde::Serialize;

use crate::{
    dispatch::{
        DispatchCoordinator, DispatchError, DispatchErrorKind, DispatchNotifierPort,
        DispatchStatus, NoopDispatchNotifier, RecommendationSet,
        error::invariant_violation,
    },
    prediction::PredictionError,
    view::{RouteCardView, route_cards},
};

/// Handle for one refresh attempt. Tickets are monotonic; only the newest one
/// may install a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct RefreshTicket(pub u64);

#[derive(Debug, Clone, PartialEq)]
pub enum RefreshOutcome {
    Installed { item_count: usize },
    Failed { error: PredictionError },
    /// A newer refresh was started before this one completed; the response is
    /// discarded whole, never merged.
    Superseded,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DispatchReceipt {
    pub item_id: String,
    pub recipient_id: String,
    /// False when the external notification collaborator failed; the dispatch
    /// itself stays committed.
    pub notified: bool,
}

/// Per-session glue between the prediction client, the dispatch coordinator
/// and the presentation adapter. All methods are synchronous; the async fetch
/// lives with the caller, which reports back through `apply_refresh`.
pub struct DashboardSession {
    coordinator: DispatchCoordinator,
    notifier: Arc<dyn DispatchNotifierPort>,
    refresh_seq: u64,
    in_flight: Option<u64>,
    last_refresh_error: Option<PredictionError>,
}

impl Default for DashboardSession {
    fn default() -> Self {
        Self::new(Arc::new(NoopDispatchNotifier))
    }
}

impl DashboardSession {
    pub fn new(notifier: Arc<dyn DispatchNotifierPort>) -> Self {
        Self {
            coordinator: DispatchCoordinator::default(),
            notifier,
            refresh_seq: 0,
            in_flight: None,
            last_refresh_error: None,
        }
    }

    /// Starts a refresh. A ticket issued while another fetch is in flight
    /// supersedes it: last writer wins on the recommendation set reference.
    pub fn begin_refresh(&mut self) -> RefreshTicket {
        if let Some(superseded) = self.in_flight {
            tracing::debug!(
                target: "session",
                superseded_ticket = superseded,
                "refresh_superseded_by_new_trigger"
            );
        }
        self.refresh_seq += 1;
        self.in_flight = Some(self.refresh_seq);
        RefreshTicket(self.refresh_seq)
    }

    /// Completes a refresh. Stale tickets are discarded without touching
    /// state; a failed fetch keeps the previous set usable.
    pub fn apply_refresh(
        &mut self,
        ticket: RefreshTicket,
        result: Result<RecommendationSet, PredictionError>,
    ) -> RefreshOutcome {
        if self.in_flight != Some(ticket.0) {
            tracing::debug!(
                target: "session",
                ticket = ticket.0,
                "stale_refresh_response_discarded"
            );
            return RefreshOutcome::Superseded;
        }
        self.in_flight = None;

        match result {
            Ok(set) => {
                let item_count = set.len();
                self.coordinator.install(set);
                self.last_refresh_error = None;
                tracing::info!(
                    target: "session",
                    ticket = ticket.0,
                    item_count,
                    "recommendation_set_installed"
                );
                RefreshOutcome::Installed { item_count }
            }
            Err(error) => {
                tracing::warn!(
                    target: "session",
                    ticket = ticket.0,
                    kind = ?error.kind,
                    error = %error,
                    "refresh_failed_previous_set_kept"
                );
                self.last_refresh_error = Some(error.clone());
                RefreshOutcome::Failed { error }
            }
        }
    }

    /// Commits a dispatch decision, then notifies the external collaborator.
    /// Notification failure is reported on the receipt, never rolled back.
    pub fn dispatch(
        &mut self,
        item_id: &str,
        recipient_id: &str,
    ) -> Result<DispatchReceipt, DispatchError> {
        if let Err(error) = self.coordinator.dispatch(item_id, recipient_id) {
            match error.kind {
                DispatchErrorKind::AlreadyDispatched => {
                    tracing::info!(
                        target: "session",
                        item_id,
                        recipient_id,
                        "duplicate_dispatch_rejected"
                    );
                }
                _ => {
                    tracing::error!(
                        target: "session",
                        item_id,
                        recipient_id,
                        kind = ?error.kind,
                        error = %error,
                        "dispatch_integrity_violation"
                    );
                }
            }
            return Err(error);
        }

        let item = self
            .coordinator
            .set()
            .get(item_id)
            .ok_or_else(|| invariant_violation("dispatched item missing from installed set"))?;
        let candidate = item
            .candidates
            .iter()
            .find(|candidate| candidate.recipient_id == recipient_id)
            .ok_or_else(|| invariant_violation("dispatched recipient missing from candidates"))?;

        let notified = match self.notifier.notify(item, candidate) {
            Ok(()) => true,
            Err(error) => {
                tracing::warn!(
                    target: "session",
                    item_id,
                    recipient_id,
                    error = %error,
                    "dispatch_notification_failed"
                );
                false
            }
        };

        tracing::info!(target: "session", item_id, recipient_id, notified, "item_dispatched");
        Ok(DispatchReceipt {
            item_id: item_id.to_string(),
            recipient_id: recipient_id.to_string(),
            notified,
        })
    }

    pub fn status_of(&self, item_id: &str) -> DispatchStatus {
        self.coordinator.status_of(item_id)
    }

    pub fn route_cards(&self) -> Vec<RouteCardView> {
        route_cards(&self.coordinator)
    }

    pub fn set(&self) -> &RecommendationSet {
        self.coordinator.set()
    }

    pub fn dispatched_count(&self) -> usize {
        self.coordinator.dispatched_count()
    }

    pub fn refresh_in_flight(&self) -> bool {
        self.in_flight.is_some()
    }

    pub fn last_refresh_error(&self) -> Option<&PredictionError> {
        self.last_refresh_error.as_ref()
    }

    pub fn assert_invariants(&self) -> Result<(), DispatchError> {
        self.coordinator.assert_invariants()
    }
}
