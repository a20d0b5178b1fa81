use std::sync::Arc;

use foodflow::{
    dispatch::{DispatchErrorKind, DispatchStatus},
    session::DashboardSession,
};

use super::{RecordingNotifier, item, set_of, shared};

fn session_with(notifier: Arc<RecordingNotifier>) -> DashboardSession {
    let mut session = DashboardSession::new(notifier);
    let ticket = session.begin_refresh();
    session.apply_refresh(
        ticket,
        Ok(set_of(vec![
            item("P001", &["NGO1", "NGO2"]),
            item("P002", &["NGO2"]),
        ])),
    );
    session
}

#[test]
fn given_committed_dispatch_then_receipt_reports_notification() {
    let notifier = shared(RecordingNotifier::default());
    let mut session = session_with(Arc::clone(&notifier));

    let receipt = session
        .dispatch("P001", "NGO2")
        .expect("dispatch should succeed");

    assert_eq!(receipt.item_id, "P001");
    assert_eq!(receipt.recipient_id, "NGO2");
    assert!(receipt.notified);
    assert_eq!(
        notifier.recorded(),
        vec![("P001".to_string(), "NGO2".to_string())]
    );
}

#[test]
fn given_failing_notifier_then_dispatch_stays_committed() {
    let notifier = shared(RecordingNotifier::failing());
    let mut session = session_with(Arc::clone(&notifier));

    let receipt = session
        .dispatch("P001", "NGO1")
        .expect("dispatch should still commit");

    assert!(!receipt.notified);
    assert_eq!(
        session.status_of("P001"),
        DispatchStatus::Dispatched {
            recipient_id: "NGO1".to_string(),
        }
    );
    session
        .assert_invariants()
        .expect("invariants should hold after notifier failure");
}

#[test]
fn given_rejected_dispatch_then_notifier_is_never_called() {
    let notifier = shared(RecordingNotifier::default());
    let mut session = session_with(Arc::clone(&notifier));

    let err = session
        .dispatch("P001", "NGO9")
        .expect_err("unlisted recipient must be rejected");
    assert_eq!(err.kind, DispatchErrorKind::InvalidCandidate);

    let err = session
        .dispatch("P404", "NGO1")
        .expect_err("unknown item must be rejected");
    assert_eq!(err.kind, DispatchErrorKind::UnknownItem);

    assert!(notifier.recorded().is_empty());
}

#[test]
fn given_duplicate_dispatch_then_second_notification_is_never_sent() {
    let notifier = shared(RecordingNotifier::default());
    let mut session = session_with(Arc::clone(&notifier));

    session
        .dispatch("P002", "NGO2")
        .expect("dispatch should succeed");
    let err = session
        .dispatch("P002", "NGO2")
        .expect_err("repeat must be rejected");

    assert_eq!(err.kind, DispatchErrorKind::AlreadyDispatched);
    assert!(err.is_recoverable());
    assert_eq!(notifier.recorded().len(), 1, "recipient must not be notified twice");
}

#[test]
fn given_dispatched_item_then_view_disables_its_controls() {
    let notifier = shared(RecordingNotifier::default());
    let mut session = session_with(notifier);
    session
        .dispatch("P001", "NGO2")
        .expect("dispatch should succeed");

    let cards = session.route_cards();
    assert_eq!(cards.len(), 2);

    let dispatched = &cards[0];
    assert_eq!(dispatched.item_id, "P001");
    assert!(dispatched.status.is_dispatched());
    let ranked: Vec<&str> = dispatched
        .candidates
        .iter()
        .map(|c| c.recipient_id.as_str())
        .collect();
    assert_eq!(ranked, vec!["NGO1", "NGO2"], "render order follows the rank");
    assert!(dispatched.candidates.iter().all(|c| !c.dispatch_enabled));
    assert!(!dispatched.candidates[0].selected);
    assert!(dispatched.candidates[1].selected);

    let pending = &cards[1];
    assert_eq!(pending.item_id, "P002");
    assert_eq!(pending.status, DispatchStatus::Pending);
    assert!(pending.candidates.iter().all(|c| c.dispatch_enabled));
}
