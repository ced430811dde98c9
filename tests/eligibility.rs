use std::sync::Arc;
use std::time::Duration;

use sitedesk::backend::memory::MemoryBackend;
use sitedesk::backend::{Backend, BackendBudget, BackendSupplier};
use sitedesk::constants::{
    CHECK_MSG_BLOCKED_BY_OTHER, CHECK_MSG_READY_TO_CREATE, CHECK_MSG_SUPPLIER_MISSING,
    STATUS_ACCEPTED, STATUS_DRAFT, STATUS_REJECTED,
};
use sitedesk::{CheckState, EligibilityVerifier, VerificationRequest};

const PROJECT: &str = "prj-1";
const SUPPLIER: &str = "sup-1";
const OTHER_SUPPLIER: &str = "sup-2";

fn supplier(id: &str, credits: i64) -> BackendSupplier {
    BackendSupplier {
        remote_id: id.to_string(),
        name: format!("Supplier {id}"),
        trade: None,
        credits,
    }
}

fn budget(supplier_id: &str, category: &str, status: &str) -> BackendBudget {
    BackendBudget {
        remote_id: format!("bud-{supplier_id}-{category}"),
        project_remote_id: PROJECT.to_string(),
        supplier_remote_id: supplier_id.to_string(),
        category: category.to_string(),
        status: status.to_string(),
        amount: None,
        updated_at: None,
    }
}

fn request(category: &str) -> VerificationRequest {
    VerificationRequest {
        project_id: PROJECT.to_string(),
        category: category.to_string(),
        supplier_id: SUPPLIER.to_string(),
    }
}

fn verifier_for(backend: MemoryBackend) -> EligibilityVerifier {
    let backend: Arc<Box<dyn Backend>> = Arc::new(Box::new(backend));
    EligibilityVerifier::with_step_delay(backend, Duration::ZERO)
}

#[tokio::test]
async fn no_matching_budget_is_ready_to_create() {
    let backend = MemoryBackend::new();
    backend.insert_supplier(supplier(SUPPLIER, 50));

    let report = verifier_for(backend).verify(&request("electrical"), None).await;

    assert!(report.outcome.can_proceed);
    assert_eq!(report.checks[0].state, CheckState::Success);
    assert_eq!(report.checks[2].message.as_deref(), Some(CHECK_MSG_READY_TO_CREATE));
    assert!(report.checks.iter().all(|c| c.state == CheckState::Success));
}

#[tokio::test]
async fn accepted_budget_from_other_supplier_blocks() {
    let backend = MemoryBackend::new();
    // A generous balance must not override the block
    backend.insert_supplier(supplier(SUPPLIER, 1_000));
    backend.insert_budget(budget(OTHER_SUPPLIER, "electrical", STATUS_ACCEPTED));

    let report = verifier_for(backend).verify(&request("electrical"), None).await;

    assert!(!report.outcome.can_proceed);
    assert_eq!(
        report.outcome.blocking_reason.as_deref(),
        Some(CHECK_MSG_BLOCKED_BY_OTHER)
    );
    assert_eq!(report.checks[1].state, CheckState::Error);
    // Short-circuit: later checks never ran
    for check in &report.checks[2..] {
        assert_eq!(check.state, CheckState::Pending);
        assert!(check.message.is_none());
    }
}

#[tokio::test]
async fn own_accepted_budget_does_not_block() {
    let backend = MemoryBackend::new();
    backend.insert_supplier(supplier(SUPPLIER, 50));
    backend.insert_budget(budget(SUPPLIER, "electrical", STATUS_ACCEPTED));

    let report = verifier_for(backend).verify(&request("electrical"), None).await;

    assert_eq!(report.checks[1].state, CheckState::Success);
    assert!(report.outcome.can_proceed);
    // The status check classifies the accepted budget as view-only
    assert!(report.checks[2]
        .message
        .as_deref()
        .unwrap()
        .contains("view-only"));
}

#[tokio::test]
async fn insufficient_credits_reports_deficit() {
    let backend = MemoryBackend::new();
    backend.insert_supplier(supplier(SUPPLIER, 5));

    let report = verifier_for(backend).verify(&request("electrical"), None).await;

    assert!(!report.outcome.can_proceed);
    // Checks 1-4 succeeded, only the credit check failed
    for check in &report.checks[..4] {
        assert_eq!(check.state, CheckState::Success);
    }
    assert_eq!(report.checks[4].state, CheckState::Error);
    assert!(report.checks[4].message.as_deref().unwrap().contains("5/20"));
    assert_eq!(report.outcome.required_credits, 20);
    assert_eq!(report.outcome.available_credits, 5);
    assert_eq!(report.outcome.credit_deficit(), 15);
}

#[tokio::test]
async fn sufficient_credits_pass() {
    let backend = MemoryBackend::new();
    backend.insert_supplier(supplier(SUPPLIER, 20));

    let report = verifier_for(backend).verify(&request("plumbing"), None).await;

    assert!(report.outcome.can_proceed);
    assert_eq!(report.outcome.credit_deficit(), 0);
}

#[tokio::test]
async fn credit_threshold_comes_from_setting() {
    let backend = MemoryBackend::new();
    backend.insert_supplier(supplier(SUPPLIER, 12));
    backend.insert_setting("credits_per_budget", "10");

    let report = verifier_for(backend).verify(&request("plumbing"), None).await;

    assert!(report.outcome.can_proceed);
    assert_eq!(report.outcome.required_credits, 10);
}

#[tokio::test]
async fn missing_setting_defaults_to_twenty() {
    let backend = MemoryBackend::new();
    backend.insert_supplier(supplier(SUPPLIER, 19));

    let report = verifier_for(backend).verify(&request("plumbing"), None).await;

    assert!(!report.outcome.can_proceed);
    assert_eq!(report.outcome.required_credits, 20);
}

#[tokio::test]
async fn missing_supplier_profile_is_a_permissions_error() {
    let backend = MemoryBackend::new();

    let report = verifier_for(backend).verify(&request("plumbing"), None).await;

    assert!(!report.outcome.can_proceed);
    assert_eq!(report.checks[3].state, CheckState::Error);
    assert_eq!(
        report.outcome.blocking_reason.as_deref(),
        Some(CHECK_MSG_SUPPLIER_MISSING)
    );
    assert_eq!(report.checks[4].state, CheckState::Pending);
}

#[tokio::test]
async fn lookup_failure_halts_and_leaves_rest_pending() {
    let backend = MemoryBackend::new();
    backend.insert_supplier(supplier(SUPPLIER, 50));
    backend.fail_on("fetch_accepted_budgets");

    let report = verifier_for(backend).verify(&request("electrical"), None).await;

    assert!(!report.outcome.can_proceed);
    assert_eq!(report.checks[0].state, CheckState::Success);
    assert_eq!(report.checks[1].state, CheckState::Error);
    assert!(report.outcome.blocking_reason.as_deref().unwrap().contains("unavailable"));
    for check in &report.checks[2..] {
        assert_eq!(check.state, CheckState::Pending);
    }
}

#[tokio::test]
async fn rerun_after_topup_starts_clean_and_passes() {
    let backend = MemoryBackend::new();
    backend.insert_supplier(supplier(SUPPLIER, 5));
    let backend: Arc<Box<dyn Backend>> = Arc::new(Box::new(backend));
    let verifier = EligibilityVerifier::with_step_delay(Arc::clone(&backend), Duration::ZERO);

    let first = verifier.verify(&request("electrical"), None).await;
    assert!(!first.outcome.can_proceed);

    // External side effect: the purchase collaborator tops up the balance
    backend.add_supplier_credits(SUPPLIER, 15).await.unwrap();

    let second = verifier.verify(&request("electrical"), None).await;
    assert!(second.outcome.can_proceed);
    // No residual state from the first run
    assert!(second.checks.iter().all(|c| c.state == CheckState::Success));
    assert!(second
        .checks
        .iter()
        .all(|c| !c.message.as_deref().unwrap_or("").contains("Insufficient")));
}

#[test]
fn pending_checks_have_no_residual_state() {
    let checks = EligibilityVerifier::pending_checks();
    assert_eq!(checks.len(), 5);
    assert!(checks.iter().all(|c| c.state == CheckState::Pending));
    assert!(checks.iter().all(|c| c.message.is_none()));
}

#[tokio::test]
async fn category_match_is_case_insensitive_substring() {
    let backend = MemoryBackend::new();
    backend.insert_supplier(supplier(SUPPLIER, 50));
    backend.insert_budget(budget(SUPPLIER, "Electrical Installations", STATUS_DRAFT));

    let report = verifier_for(backend).verify(&request("electrical"), None).await;

    assert!(report.checks[0]
        .message
        .as_deref()
        .unwrap()
        .contains("Found existing"));
}

#[tokio::test]
async fn rejected_budget_classified_for_resubmission() {
    let backend = MemoryBackend::new();
    backend.insert_supplier(supplier(SUPPLIER, 50));
    backend.insert_budget(budget(SUPPLIER, "masonry", STATUS_REJECTED));

    let report = verifier_for(backend).verify(&request("masonry"), None).await;

    assert!(report.outcome.can_proceed);
    assert!(report.checks[2]
        .message
        .as_deref()
        .unwrap()
        .contains("resubmission"));
}

#[tokio::test]
async fn progress_snapshots_never_show_two_checks_running() {
    let backend = MemoryBackend::new();
    backend.insert_supplier(supplier(SUPPLIER, 50));
    let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();

    let report = verifier_for(backend).verify(&request("electrical"), Some(&tx)).await;
    drop(tx);

    let mut snapshots = Vec::new();
    while let Ok(snapshot) = rx.try_recv() {
        snapshots.push(snapshot);
    }

    assert!(!snapshots.is_empty());
    for snapshot in &snapshots {
        let running = snapshot
            .iter()
            .filter(|c| c.state == CheckState::Checking)
            .count();
        assert!(running <= 1, "more than one check running at once");
    }
    // The final snapshot matches the returned report
    let last = snapshots.last().unwrap();
    for (snap, final_check) in last.iter().zip(report.checks.iter()) {
        assert_eq!(snap.state, final_check.state);
    }
}
