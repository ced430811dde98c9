//! In-memory backend used for demo mode and as the test double.
//!
//! Tables live in a single mutex-guarded store. Category lookups match
//! case-insensitively on substrings, mirroring the hosted adapter's `ilike`
//! filters. `fail_on` lets tests inject a lookup failure for any operation.

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use super::{
    Backend, BackendBudget, BackendDocument, BackendError, BackendFileVersion,
    BackendOverlayModel, BackendProject, BackendProjectVersion, BackendSupplier,
    CreateBudgetArgs, UploadDocumentArgs, WeatherReport,
};
use crate::constants::{OPACITY_MAX, STATUS_ACCEPTED, STATUS_DRAFT};

#[derive(Default)]
struct Store {
    projects: Vec<BackendProject>,
    budgets: Vec<BackendBudget>,
    suppliers: Vec<BackendSupplier>,
    settings: HashMap<String, String>,
    documents: Vec<BackendDocument>,
    overlays: Vec<BackendOverlayModel>,
    file_versions: Vec<BackendFileVersion>,
    project_versions: Vec<BackendProjectVersion>,
    weather: HashMap<String, WeatherReport>,
    fail_ops: HashSet<String>,
}

/// In-memory project store.
pub struct MemoryBackend {
    store: Mutex<Store>,
}

fn category_matches(stored: &str, query: &str) -> bool {
    stored.to_lowercase().contains(&query.to_lowercase())
}

fn now_timestamp() -> String {
    Utc::now().to_rfc3339()
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self {
            store: Mutex::new(Store::default()),
        }
    }

    fn store(&self) -> std::sync::MutexGuard<'_, Store> {
        self.store.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// A backend seeded with a small construction project, for demo mode.
    pub fn with_demo_data() -> Self {
        let backend = Self::new();
        backend.insert_project(BackendProject {
            remote_id: "prj-riverside".into(),
            name: "Riverside Offices".into(),
            location: Some("Valencia".into()),
            is_archived: false,
        });
        backend.insert_supplier(BackendSupplier {
            remote_id: "sup-volta".into(),
            name: "Volta Installations".into(),
            trade: Some("electrical".into()),
            credits: 25,
        });
        backend.insert_supplier(BackendSupplier {
            remote_id: "sup-ferro".into(),
            name: "Ferro Structures".into(),
            trade: Some("steelwork".into()),
            credits: 8,
        });
        backend.insert_budget(BackendBudget {
            remote_id: "bud-1".into(),
            project_remote_id: "prj-riverside".into(),
            supplier_remote_id: "sup-ferro".into(),
            category: "Steelwork".into(),
            status: STATUS_ACCEPTED.into(),
            amount: Some(184_000.0),
            updated_at: Some(now_timestamp()),
        });
        backend.insert_budget(BackendBudget {
            remote_id: "bud-2".into(),
            project_remote_id: "prj-riverside".into(),
            supplier_remote_id: "sup-volta".into(),
            category: "Electrical".into(),
            status: STATUS_DRAFT.into(),
            amount: None,
            updated_at: Some(now_timestamp()),
        });
        backend.insert_document(BackendDocument {
            remote_id: "doc-1".into(),
            project_remote_id: "prj-riverside".into(),
            name: "ground-floor-plan.pdf".into(),
            storage_path: "prj-riverside/ground-floor-plan.pdf".into(),
            uploaded_at: Some(now_timestamp()),
            size_bytes: 2_412_000,
        });
        backend.insert_overlay(BackendOverlayModel {
            remote_id: "ovl-1".into(),
            project_remote_id: "prj-riverside".into(),
            name: "structure.ifc".into(),
            storage_path: "prj-riverside/models/structure.ifc".into(),
            opacity: 60,
            visible: true,
        });
        backend.insert_project_version(BackendProjectVersion {
            remote_id: "ver-1".into(),
            project_remote_id: "prj-riverside".into(),
            name: "Rev A".into(),
            created_at: Some(now_timestamp()),
            is_active: true,
        });
        backend.insert_project_version(BackendProjectVersion {
            remote_id: "ver-2".into(),
            project_remote_id: "prj-riverside".into(),
            name: "Rev B".into(),
            created_at: Some(now_timestamp()),
            is_active: false,
        });
        backend.insert_weather(
            "prj-riverside",
            WeatherReport {
                temperature_c: 24.5,
                condition: "clear".into(),
                wind_kmh: 12.0,
                humidity_pct: 48,
                air_quality_index: 31,
                fetched_at: Some(now_timestamp()),
            },
        );
        backend
    }

    /// Make the named operation return a lookup error on every call until
    /// cleared. Operation names are the `Backend` method names.
    pub fn fail_on(&self, operation: &str) {
        self.store().fail_ops.insert(operation.to_string());
    }

    pub fn clear_failures(&self) {
        self.store().fail_ops.clear();
    }

    fn check_fail(&self, operation: &str) -> Result<(), BackendError> {
        if self.store().fail_ops.contains(operation) {
            return Err(BackendError::Network(format!("{operation} unavailable")));
        }
        Ok(())
    }

    // Seeding helpers, used by demo mode and tests.

    pub fn insert_project(&self, project: BackendProject) {
        self.store().projects.push(project);
    }

    pub fn insert_budget(&self, budget: BackendBudget) {
        self.store().budgets.push(budget);
    }

    pub fn insert_supplier(&self, supplier: BackendSupplier) {
        self.store().suppliers.push(supplier);
    }

    pub fn insert_setting(&self, key: &str, value: &str) {
        self.store()
            .settings
            .insert(key.to_string(), value.to_string());
    }

    pub fn insert_document(&self, document: BackendDocument) {
        self.store().documents.push(document);
    }

    pub fn insert_overlay(&self, overlay: BackendOverlayModel) {
        self.store().overlays.push(overlay);
    }

    pub fn insert_file_version(&self, version: BackendFileVersion) {
        self.store().file_versions.push(version);
    }

    pub fn insert_project_version(&self, version: BackendProjectVersion) {
        self.store().project_versions.push(version);
    }

    pub fn insert_weather(&self, project_remote_id: &str, report: WeatherReport) {
        self.store()
            .weather
            .insert(project_remote_id.to_string(), report);
    }
}

impl Default for MemoryBackend {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Backend for MemoryBackend {
    fn backend_type(&self) -> &str {
        "memory"
    }

    async fn fetch_projects(&self) -> Result<Vec<BackendProject>, BackendError> {
        self.check_fail("fetch_projects")?;
        let store = self.store();
        Ok(store
            .projects
            .iter()
            .filter(|p| !p.is_archived)
            .cloned()
            .collect())
    }

    async fn find_budget(
        &self,
        project_remote_id: &str,
        supplier_remote_id: &str,
        category: &str,
    ) -> Result<Option<BackendBudget>, BackendError> {
        self.check_fail("find_budget")?;
        let store = self.store();
        Ok(store
            .budgets
            .iter()
            .find(|b| {
                b.project_remote_id == project_remote_id
                    && b.supplier_remote_id == supplier_remote_id
                    && category_matches(&b.category, category)
            })
            .cloned())
    }

    async fn fetch_accepted_budgets(
        &self,
        project_remote_id: &str,
        category: &str,
    ) -> Result<Vec<BackendBudget>, BackendError> {
        self.check_fail("fetch_accepted_budgets")?;
        let store = self.store();
        Ok(store
            .budgets
            .iter()
            .filter(|b| {
                b.project_remote_id == project_remote_id
                    && b.status == STATUS_ACCEPTED
                    && category_matches(&b.category, category)
            })
            .cloned()
            .collect())
    }

    async fn fetch_budgets(&self, project_remote_id: &str) -> Result<Vec<BackendBudget>, BackendError> {
        self.check_fail("fetch_budgets")?;
        let store = self.store();
        Ok(store
            .budgets
            .iter()
            .filter(|b| b.project_remote_id == project_remote_id)
            .cloned()
            .collect())
    }

    async fn create_budget(&self, args: CreateBudgetArgs) -> Result<BackendBudget, BackendError> {
        self.check_fail("create_budget")?;
        let budget = BackendBudget {
            remote_id: Uuid::new_v4().to_string(),
            project_remote_id: args.project_remote_id,
            supplier_remote_id: args.supplier_remote_id,
            category: args.category,
            status: args.status,
            amount: args.amount,
            updated_at: Some(now_timestamp()),
        };
        self.store().budgets.push(budget.clone());
        Ok(budget)
    }

    async fn update_budget_status(
        &self,
        remote_id: &str,
        status: &str,
    ) -> Result<BackendBudget, BackendError> {
        self.check_fail("update_budget_status")?;
        let mut store = self.store();
        let budget = store
            .budgets
            .iter_mut()
            .find(|b| b.remote_id == remote_id)
            .ok_or_else(|| BackendError::NotFound(format!("budget {remote_id}")))?;
        budget.status = status.to_string();
        budget.updated_at = Some(now_timestamp());
        Ok(budget.clone())
    }

    async fn fetch_supplier(&self, remote_id: &str) -> Result<Option<BackendSupplier>, BackendError> {
        self.check_fail("fetch_supplier")?;
        let store = self.store();
        Ok(store
            .suppliers
            .iter()
            .find(|s| s.remote_id == remote_id)
            .cloned())
    }

    async fn add_supplier_credits(
        &self,
        remote_id: &str,
        delta: i64,
    ) -> Result<BackendSupplier, BackendError> {
        self.check_fail("add_supplier_credits")?;
        let mut store = self.store();
        let supplier = store
            .suppliers
            .iter_mut()
            .find(|s| s.remote_id == remote_id)
            .ok_or_else(|| BackendError::NotFound(format!("supplier {remote_id}")))?;
        supplier.credits += delta;
        Ok(supplier.clone())
    }

    async fn fetch_setting(&self, key: &str) -> Result<Option<String>, BackendError> {
        self.check_fail("fetch_setting")?;
        Ok(self.store().settings.get(key).cloned())
    }

    async fn fetch_documents(&self, project_remote_id: &str) -> Result<Vec<BackendDocument>, BackendError> {
        self.check_fail("fetch_documents")?;
        let store = self.store();
        Ok(store
            .documents
            .iter()
            .filter(|d| d.project_remote_id == project_remote_id)
            .cloned()
            .collect())
    }

    async fn upload_document(&self, args: UploadDocumentArgs) -> Result<BackendDocument, BackendError> {
        self.check_fail("upload_document")?;
        let document = BackendDocument {
            remote_id: Uuid::new_v4().to_string(),
            storage_path: format!("{}/{}", args.project_remote_id, args.name),
            project_remote_id: args.project_remote_id,
            name: args.name,
            uploaded_at: Some(now_timestamp()),
            size_bytes: args.bytes.len() as u64,
        };
        self.store().documents.push(document.clone());
        Ok(document)
    }

    async fn delete_document(&self, remote_id: &str) -> Result<(), BackendError> {
        self.check_fail("delete_document")?;
        let mut store = self.store();
        let before = store.documents.len();
        store.documents.retain(|d| d.remote_id != remote_id);
        if store.documents.len() == before {
            return Err(BackendError::NotFound(format!("document {remote_id}")));
        }
        Ok(())
    }

    async fn fetch_overlay_models(
        &self,
        project_remote_id: &str,
    ) -> Result<Vec<BackendOverlayModel>, BackendError> {
        self.check_fail("fetch_overlay_models")?;
        let store = self.store();
        Ok(store
            .overlays
            .iter()
            .filter(|o| o.project_remote_id == project_remote_id)
            .cloned()
            .collect())
    }

    async fn set_overlay_opacity(
        &self,
        remote_id: &str,
        opacity: u8,
    ) -> Result<BackendOverlayModel, BackendError> {
        self.check_fail("set_overlay_opacity")?;
        let mut store = self.store();
        let overlay = store
            .overlays
            .iter_mut()
            .find(|o| o.remote_id == remote_id)
            .ok_or_else(|| BackendError::NotFound(format!("overlay {remote_id}")))?;
        overlay.opacity = opacity.min(OPACITY_MAX);
        Ok(overlay.clone())
    }

    async fn set_overlay_visible(
        &self,
        remote_id: &str,
        visible: bool,
    ) -> Result<BackendOverlayModel, BackendError> {
        self.check_fail("set_overlay_visible")?;
        let mut store = self.store();
        let overlay = store
            .overlays
            .iter_mut()
            .find(|o| o.remote_id == remote_id)
            .ok_or_else(|| BackendError::NotFound(format!("overlay {remote_id}")))?;
        overlay.visible = visible;
        Ok(overlay.clone())
    }

    async fn fetch_file_versions(
        &self,
        document_remote_id: &str,
    ) -> Result<Vec<BackendFileVersion>, BackendError> {
        self.check_fail("fetch_file_versions")?;
        let store = self.store();
        let mut versions: Vec<BackendFileVersion> = store
            .file_versions
            .iter()
            .filter(|v| v.document_remote_id == document_remote_id)
            .cloned()
            .collect();
        versions.sort_by(|a, b| b.version.cmp(&a.version));
        Ok(versions)
    }

    async fn fetch_project_versions(
        &self,
        project_remote_id: &str,
    ) -> Result<Vec<BackendProjectVersion>, BackendError> {
        self.check_fail("fetch_project_versions")?;
        let store = self.store();
        Ok(store
            .project_versions
            .iter()
            .filter(|v| v.project_remote_id == project_remote_id)
            .cloned()
            .collect())
    }

    async fn activate_project_version(
        &self,
        project_remote_id: &str,
        version_remote_id: &str,
    ) -> Result<(), BackendError> {
        self.check_fail("activate_project_version")?;
        let mut store = self.store();
        if !store
            .project_versions
            .iter()
            .any(|v| v.project_remote_id == project_remote_id && v.remote_id == version_remote_id)
        {
            return Err(BackendError::NotFound(format!("version {version_remote_id}")));
        }
        // Exactly one active version per project.
        for version in store
            .project_versions
            .iter_mut()
            .filter(|v| v.project_remote_id == project_remote_id)
        {
            version.is_active = version.remote_id == version_remote_id;
        }
        Ok(())
    }

    async fn fetch_weather(&self, project_remote_id: &str) -> Result<WeatherReport, BackendError> {
        self.check_fail("fetch_weather")?;
        let store = self.store();
        store
            .weather
            .get(project_remote_id)
            .cloned()
            .ok_or_else(|| BackendError::NotFound(format!("weather for {project_remote_id}")))
    }
}
