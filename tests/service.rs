use sitedesk::backend::memory::MemoryBackend;
use sitedesk::backend::{BackendBudget, BackendSupplier};
use sitedesk::constants::{STATUS_DRAFT, STATUS_PRESENTED, STATUS_REJECTED};
use sitedesk::logger::Logger;
use sitedesk::service::ProjectService;
use sitedesk::VerificationRequest;

fn service_with(backend: MemoryBackend) -> ProjectService {
    ProjectService::new(Box::new(backend), Logger::new())
}

fn request(category: &str) -> VerificationRequest {
    VerificationRequest {
        project_id: "prj-1".to_string(),
        category: category.to_string(),
        supplier_id: "sup-1".to_string(),
    }
}

#[tokio::test]
async fn activation_creates_a_draft_when_none_exists() {
    let service = service_with(MemoryBackend::new());

    let (budget, _) = service
        .activate_budget_request(&request("electrical"), Some(12_500.0))
        .await
        .unwrap();

    assert_eq!(budget.status, STATUS_DRAFT);
    assert_eq!(budget.category, "electrical");
    assert_eq!(budget.amount, Some(12_500.0));

    let budgets = service.get_budgets("prj-1").await.unwrap();
    assert_eq!(budgets.len(), 1);
}

#[tokio::test]
async fn activation_represents_a_rejected_budget() {
    let backend = MemoryBackend::new();
    backend.insert_budget(BackendBudget {
        remote_id: "b1".to_string(),
        project_remote_id: "prj-1".to_string(),
        supplier_remote_id: "sup-1".to_string(),
        category: "electrical".to_string(),
        status: STATUS_REJECTED.to_string(),
        amount: Some(9_000.0),
        updated_at: None,
    });
    let service = service_with(backend);

    let (budget, message) = service
        .activate_budget_request(&request("electrical"), None)
        .await
        .unwrap();

    assert_eq!(budget.remote_id, "b1");
    assert_eq!(budget.status, STATUS_PRESENTED);
    assert!(message.contains("re-presented"));
}

#[tokio::test]
async fn activation_reuses_an_existing_draft() {
    let backend = MemoryBackend::new();
    backend.insert_budget(BackendBudget {
        remote_id: "b1".to_string(),
        project_remote_id: "prj-1".to_string(),
        supplier_remote_id: "sup-1".to_string(),
        category: "electrical".to_string(),
        status: STATUS_DRAFT.to_string(),
        amount: None,
        updated_at: None,
    });
    let service = service_with(backend);

    let (budget, _) = service
        .activate_budget_request(&request("electrical"), None)
        .await
        .unwrap();

    assert_eq!(budget.remote_id, "b1");
    let budgets = service.get_budgets("prj-1").await.unwrap();
    assert_eq!(budgets.len(), 1, "no duplicate budget created");
}

#[tokio::test]
async fn purchase_credits_updates_the_balance() {
    let backend = MemoryBackend::new();
    backend.insert_supplier(BackendSupplier {
        remote_id: "sup-1".to_string(),
        name: "Volta".to_string(),
        trade: None,
        credits: 5,
    });
    let service = service_with(backend);

    let supplier = service.purchase_credits("sup-1", 15).await.unwrap();
    assert_eq!(supplier.credits, 20);
}

#[tokio::test]
async fn opacity_steps_clamp_at_the_edges() {
    let backend = MemoryBackend::with_demo_data();
    let service = service_with(backend);

    let overlays = service.get_overlay_models("prj-riverside").await.unwrap();
    let mut overlay = overlays[0].clone();

    // Walk up beyond the maximum
    for _ in 0..20 {
        overlay = service.step_overlay_opacity(&overlay, true).await.unwrap();
    }
    assert_eq!(overlay.opacity, 100);

    // And back down below zero
    for _ in 0..20 {
        overlay = service.step_overlay_opacity(&overlay, false).await.unwrap();
    }
    assert_eq!(overlay.opacity, 0);
}

#[tokio::test]
async fn toggle_overlay_flips_visibility() {
    let service = service_with(MemoryBackend::with_demo_data());

    let overlays = service.get_overlay_models("prj-riverside").await.unwrap();
    let overlay = overlays[0].clone();
    let was_visible = overlay.visible;

    let updated = service.toggle_overlay_visibility(&overlay).await.unwrap();
    assert_eq!(updated.visible, !was_visible);
}

#[tokio::test]
async fn load_project_data_fetches_all_panels() {
    let service = service_with(MemoryBackend::with_demo_data());

    let data = service.load_project_data("prj-riverside").await.unwrap();
    assert!(!data.budgets.is_empty());
    assert!(!data.documents.is_empty());
    assert!(!data.overlays.is_empty());
    assert!(!data.project_versions.is_empty());
    assert!(!service.is_refreshing().await);
}

#[tokio::test]
async fn weather_reading_comes_through() {
    let service = service_with(MemoryBackend::with_demo_data());

    let report = service.get_weather("prj-riverside").await.unwrap();
    assert_eq!(report.condition, "clear");
    assert!(service.get_weather("prj-unknown").await.is_err());
}

#[tokio::test]
async fn verifier_uses_the_service_backend() {
    let backend = MemoryBackend::new();
    backend.insert_supplier(BackendSupplier {
        remote_id: "sup-1".to_string(),
        name: "Volta".to_string(),
        trade: None,
        credits: 50,
    });
    let service = service_with(backend);

    let report = service.verifier().verify(&request("electrical"), None).await;
    assert!(report.outcome.can_proceed);
}
