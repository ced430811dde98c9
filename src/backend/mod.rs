//! Backend abstraction layer over the remote project store.
//!
//! This module defines the common interface the rest of the application uses
//! to talk to a project-management backend, along with common data types and
//! error handling. Two adapters exist: [`rest::RestBackend`] for the hosted
//! service and [`memory::MemoryBackend`] for demo mode and tests.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

pub mod factory;
pub mod memory;
pub mod rest;

/// Common error types for backend operations.
#[derive(Debug, thiserror::Error)]
pub enum BackendError {
    #[error("Authentication failed: {0}")]
    Auth(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Invalid data: {0}")]
    InvalidData(String),

    #[error("Backend error: {0}")]
    Other(String),
}

/// Backend-agnostic project representation.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BackendProject {
    pub remote_id: String,
    pub name: String,
    /// Free-form site location, used for the weather panel title.
    pub location: Option<String>,
    pub is_archived: bool,
}

/// Backend-agnostic budget representation.
///
/// `status` holds the raw backend value; use [`crate::eligibility`] and the
/// status constants in [`crate::constants`] to interpret it.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BackendBudget {
    pub remote_id: String,
    pub project_remote_id: String,
    pub supplier_remote_id: String,
    pub category: String,
    pub status: String,
    pub amount: Option<f64>,
    pub updated_at: Option<String>,
}

/// Backend-agnostic supplier profile.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BackendSupplier {
    pub remote_id: String,
    pub name: String,
    /// Trade the supplier bids on (e.g. "electrical").
    pub trade: Option<String>,
    pub credits: i64,
}

/// Graphic-documentation metadata row.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BackendDocument {
    pub remote_id: String,
    pub project_remote_id: String,
    pub name: String,
    pub storage_path: String,
    pub uploaded_at: Option<String>,
    pub size_bytes: u64,
}

/// 3D-viewer overlay model.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BackendOverlayModel {
    pub remote_id: String,
    pub project_remote_id: String,
    pub name: String,
    pub storage_path: String,
    /// Render opacity in percent, 0..=100.
    pub opacity: u8,
    pub visible: bool,
}

/// Version metadata for a single document.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BackendFileVersion {
    pub remote_id: String,
    pub document_remote_id: String,
    pub version: i32,
    pub author: Option<String>,
    pub uploaded_at: Option<String>,
    pub notes: Option<String>,
}

/// A selectable project version record.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BackendProjectVersion {
    pub remote_id: String,
    pub project_remote_id: String,
    pub name: String,
    pub created_at: Option<String>,
    pub is_active: bool,
}

/// Live weather and air-quality reading for a project site.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct WeatherReport {
    pub temperature_c: f64,
    pub condition: String,
    pub wind_kmh: f64,
    pub humidity_pct: u8,
    pub air_quality_index: u16,
    pub fetched_at: Option<String>,
}

/// Arguments for creating a new budget.
#[derive(Clone, Debug)]
pub struct CreateBudgetArgs {
    pub project_remote_id: String,
    pub supplier_remote_id: String,
    pub category: String,
    pub status: String,
    pub amount: Option<f64>,
}

/// Arguments for uploading a graphic document.
#[derive(Clone, Debug)]
pub struct UploadDocumentArgs {
    pub project_remote_id: String,
    pub name: String,
    pub bytes: Vec<u8>,
}

/// Backend trait every project-store adapter must implement.
///
/// Category parameters on budget lookups are matched case-insensitively as
/// substrings against stored categories, matching the hosted service's
/// `ilike` filter semantics.
#[async_trait]
pub trait Backend: Send + Sync {
    /// Returns the backend type identifier (e.g., "rest", "memory").
    fn backend_type(&self) -> &str;

    async fn fetch_projects(&self) -> Result<Vec<BackendProject>, BackendError>;

    // Budgets
    async fn find_budget(
        &self,
        project_remote_id: &str,
        supplier_remote_id: &str,
        category: &str,
    ) -> Result<Option<BackendBudget>, BackendError>;
    async fn fetch_accepted_budgets(
        &self,
        project_remote_id: &str,
        category: &str,
    ) -> Result<Vec<BackendBudget>, BackendError>;
    async fn fetch_budgets(&self, project_remote_id: &str) -> Result<Vec<BackendBudget>, BackendError>;
    async fn create_budget(&self, args: CreateBudgetArgs) -> Result<BackendBudget, BackendError>;
    async fn update_budget_status(
        &self,
        remote_id: &str,
        status: &str,
    ) -> Result<BackendBudget, BackendError>;

    // Suppliers and settings
    async fn fetch_supplier(&self, remote_id: &str) -> Result<Option<BackendSupplier>, BackendError>;
    async fn add_supplier_credits(
        &self,
        remote_id: &str,
        delta: i64,
    ) -> Result<BackendSupplier, BackendError>;
    async fn fetch_setting(&self, key: &str) -> Result<Option<String>, BackendError>;

    // Graphic documentation
    async fn fetch_documents(&self, project_remote_id: &str) -> Result<Vec<BackendDocument>, BackendError>;
    async fn upload_document(&self, args: UploadDocumentArgs) -> Result<BackendDocument, BackendError>;
    async fn delete_document(&self, remote_id: &str) -> Result<(), BackendError>;

    // Viewer overlays
    async fn fetch_overlay_models(
        &self,
        project_remote_id: &str,
    ) -> Result<Vec<BackendOverlayModel>, BackendError>;
    async fn set_overlay_opacity(
        &self,
        remote_id: &str,
        opacity: u8,
    ) -> Result<BackendOverlayModel, BackendError>;
    async fn set_overlay_visible(
        &self,
        remote_id: &str,
        visible: bool,
    ) -> Result<BackendOverlayModel, BackendError>;

    // Versions
    async fn fetch_file_versions(
        &self,
        document_remote_id: &str,
    ) -> Result<Vec<BackendFileVersion>, BackendError>;
    async fn fetch_project_versions(
        &self,
        project_remote_id: &str,
    ) -> Result<Vec<BackendProjectVersion>, BackendError>;
    async fn activate_project_version(
        &self,
        project_remote_id: &str,
        version_remote_id: &str,
    ) -> Result<(), BackendError>;

    // Weather function endpoint
    async fn fetch_weather(&self, project_remote_id: &str) -> Result<WeatherReport, BackendError>;
}
