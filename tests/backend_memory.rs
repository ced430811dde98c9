use sitedesk::backend::memory::MemoryBackend;
use sitedesk::backend::{Backend, BackendBudget, BackendProjectVersion, BackendSupplier, UploadDocumentArgs};
use sitedesk::constants::{STATUS_ACCEPTED, STATUS_PRESENTED};

fn budget(id: &str, supplier: &str, category: &str, status: &str) -> BackendBudget {
    BackendBudget {
        remote_id: id.to_string(),
        project_remote_id: "prj-1".to_string(),
        supplier_remote_id: supplier.to_string(),
        category: category.to_string(),
        status: status.to_string(),
        amount: None,
        updated_at: None,
    }
}

#[tokio::test]
async fn find_budget_matches_category_substring() {
    let backend = MemoryBackend::new();
    backend.insert_budget(budget("b1", "sup-1", "Electrical Installations", "draft"));

    let hit = backend.find_budget("prj-1", "sup-1", "ELECTRICAL").await.unwrap();
    assert!(hit.is_some());

    let miss = backend.find_budget("prj-1", "sup-1", "plumbing").await.unwrap();
    assert!(miss.is_none());
}

#[tokio::test]
async fn accepted_scan_ignores_other_statuses() {
    let backend = MemoryBackend::new();
    backend.insert_budget(budget("b1", "sup-1", "electrical", STATUS_PRESENTED));
    backend.insert_budget(budget("b2", "sup-2", "electrical", STATUS_ACCEPTED));
    backend.insert_budget(budget("b3", "sup-3", "masonry", STATUS_ACCEPTED));

    let accepted = backend.fetch_accepted_budgets("prj-1", "electrical").await.unwrap();
    assert_eq!(accepted.len(), 1);
    assert_eq!(accepted[0].supplier_remote_id, "sup-2");
}

#[tokio::test]
async fn update_budget_status_unknown_id_errors() {
    let backend = MemoryBackend::new();
    let result = backend.update_budget_status("nope", STATUS_ACCEPTED).await;
    assert!(result.is_err());
}

#[tokio::test]
async fn credit_topup_accumulates() {
    let backend = MemoryBackend::new();
    backend.insert_supplier(BackendSupplier {
        remote_id: "sup-1".to_string(),
        name: "Volta".to_string(),
        trade: None,
        credits: 5,
    });

    backend.add_supplier_credits("sup-1", 15).await.unwrap();
    let supplier = backend.fetch_supplier("sup-1").await.unwrap().unwrap();
    assert_eq!(supplier.credits, 20);
}

#[tokio::test]
async fn upload_document_records_size_and_path() {
    let backend = MemoryBackend::new();
    let document = backend
        .upload_document(UploadDocumentArgs {
            project_remote_id: "prj-1".to_string(),
            name: "plan.pdf".to_string(),
            bytes: vec![0u8; 1234],
        })
        .await
        .unwrap();

    assert_eq!(document.size_bytes, 1234);
    assert_eq!(document.storage_path, "prj-1/plan.pdf");

    let listed = backend.fetch_documents("prj-1").await.unwrap();
    assert_eq!(listed.len(), 1);
}

#[tokio::test]
async fn delete_document_unknown_id_errors() {
    let backend = MemoryBackend::new();
    assert!(backend.delete_document("missing").await.is_err());
}

#[tokio::test]
async fn opacity_is_clamped_to_hundred() {
    let backend = MemoryBackend::with_demo_data();
    let overlays = backend.fetch_overlay_models("prj-riverside").await.unwrap();
    let overlay = &overlays[0];

    let updated = backend.set_overlay_opacity(&overlay.remote_id, 250).await.unwrap();
    assert_eq!(updated.opacity, 100);
}

#[tokio::test]
async fn exactly_one_project_version_is_active() {
    let backend = MemoryBackend::new();
    for (id, active) in [("v1", true), ("v2", false), ("v3", false)] {
        backend.insert_project_version(BackendProjectVersion {
            remote_id: id.to_string(),
            project_remote_id: "prj-1".to_string(),
            name: id.to_uppercase(),
            created_at: None,
            is_active: active,
        });
    }

    backend.activate_project_version("prj-1", "v3").await.unwrap();

    let versions = backend.fetch_project_versions("prj-1").await.unwrap();
    let active: Vec<_> = versions.iter().filter(|v| v.is_active).collect();
    assert_eq!(active.len(), 1);
    assert_eq!(active[0].remote_id, "v3");
}

#[tokio::test]
async fn injected_failures_clear() {
    let backend = MemoryBackend::new();
    backend.fail_on("fetch_projects");
    assert!(backend.fetch_projects().await.is_err());

    backend.clear_failures();
    assert!(backend.fetch_projects().await.is_ok());
}
