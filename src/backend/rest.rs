//! Hosted REST adapter.
//!
//! Talks to the project-management service's PostgREST-style API: table
//! reads/writes under `/rest/v1`, object uploads under `/storage/v1`, and the
//! weather function under `/functions/v1`. HTTP calls are blocking (`ureq`)
//! and run on the tokio blocking pool.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::json;

use super::{
    Backend, BackendBudget, BackendDocument, BackendError, BackendFileVersion,
    BackendOverlayModel, BackendProject, BackendProjectVersion, BackendSupplier,
    CreateBudgetArgs, UploadDocumentArgs, WeatherReport,
};
use crate::constants::{OPACITY_MAX, STATUS_ACCEPTED};

const DOCUMENTS_BUCKET: &str = "documents";

/// Backend adapter for the hosted service.
pub struct RestBackend {
    client: RestClient,
}

impl RestBackend {
    /// `base_url` is the service root, without a trailing slash.
    pub fn new(base_url: String, api_key: String, access_token: String) -> Self {
        Self {
            client: RestClient {
                base_url: base_url.trim_end_matches('/').to_string(),
                api_key,
                access_token,
            },
        }
    }
}

#[derive(Clone)]
struct RestClient {
    base_url: String,
    api_key: String,
    access_token: String,
}

fn map_http_error(err: ureq::Error) -> BackendError {
    match err {
        ureq::Error::StatusCode(401) | ureq::Error::StatusCode(403) => {
            BackendError::Auth(err.to_string())
        }
        ureq::Error::StatusCode(404) => BackendError::NotFound(err.to_string()),
        other => BackendError::Network(other.to_string()),
    }
}

/// Percent-encode a query value for PostgREST filters.
fn encode(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for byte in value.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                out.push(byte as char);
            }
            other => out.push_str(&format!("%{other:02X}")),
        }
    }
    out
}

impl RestClient {
    fn table_url(&self, table: &str, query: &str) -> String {
        format!("{}/rest/v1/{table}?{query}", self.base_url)
    }

    fn bearer(&self) -> String {
        format!("Bearer {}", self.access_token)
    }

    fn get_rows<T: DeserializeOwned>(&self, url: &str) -> Result<Vec<T>, BackendError> {
        let mut response = ureq::get(url)
            .header("apikey", &self.api_key)
            .header("Authorization", &self.bearer())
            .call()
            .map_err(map_http_error)?;
        response
            .body_mut()
            .read_json()
            .map_err(|e| BackendError::InvalidData(e.to_string()))
    }

    fn post_json<T: DeserializeOwned>(
        &self,
        url: &str,
        payload: &serde_json::Value,
    ) -> Result<T, BackendError> {
        let mut response = ureq::post(url)
            .header("apikey", &self.api_key)
            .header("Authorization", &self.bearer())
            .header("Prefer", "return=representation")
            .send_json(payload)
            .map_err(map_http_error)?;
        response
            .body_mut()
            .read_json()
            .map_err(|e| BackendError::InvalidData(e.to_string()))
    }

    fn patch_rows<T: DeserializeOwned>(
        &self,
        url: &str,
        payload: &serde_json::Value,
    ) -> Result<Vec<T>, BackendError> {
        let mut response = ureq::patch(url)
            .header("apikey", &self.api_key)
            .header("Authorization", &self.bearer())
            .header("Prefer", "return=representation")
            .send_json(payload)
            .map_err(map_http_error)?;
        response
            .body_mut()
            .read_json()
            .map_err(|e| BackendError::InvalidData(e.to_string()))
    }

    /// POST where the endpoint returns no body (void RPCs).
    fn post_no_content(&self, url: &str, payload: &serde_json::Value) -> Result<(), BackendError> {
        ureq::post(url)
            .header("apikey", &self.api_key)
            .header("Authorization", &self.bearer())
            .send_json(payload)
            .map_err(map_http_error)?;
        Ok(())
    }

    fn delete(&self, url: &str) -> Result<(), BackendError> {
        ureq::delete(url)
            .header("apikey", &self.api_key)
            .header("Authorization", &self.bearer())
            .call()
            .map_err(map_http_error)?;
        Ok(())
    }

    fn upload_object(&self, bucket: &str, path: &str, bytes: &[u8]) -> Result<(), BackendError> {
        let url = format!("{}/storage/v1/object/{bucket}/{path}", self.base_url);
        ureq::post(&url)
            .header("apikey", &self.api_key)
            .header("Authorization", &self.bearer())
            .header("Content-Type", "application/octet-stream")
            .send(bytes)
            .map_err(map_http_error)?;
        Ok(())
    }

    fn call_function<T: DeserializeOwned>(
        &self,
        name: &str,
        payload: &serde_json::Value,
    ) -> Result<T, BackendError> {
        let url = format!("{}/functions/v1/{name}", self.base_url);
        let mut response = ureq::post(&url)
            .header("apikey", &self.api_key)
            .header("Authorization", &self.bearer())
            .send_json(payload)
            .map_err(map_http_error)?;
        response
            .body_mut()
            .read_json()
            .map_err(|e| BackendError::InvalidData(e.to_string()))
    }
}

/// Run a blocking HTTP job on the tokio blocking pool.
async fn blocking<T, F>(job: F) -> Result<T, BackendError>
where
    T: Send + 'static,
    F: FnOnce() -> Result<T, BackendError> + Send + 'static,
{
    tokio::task::spawn_blocking(job)
        .await
        .map_err(|e| BackendError::Other(format!("blocking task failed: {e}")))?
}

// Row types mirroring the hosted tables.

#[derive(Debug, Deserialize)]
struct ProjectRow {
    id: String,
    name: String,
    location: Option<String>,
    #[serde(default)]
    is_archived: bool,
}

#[derive(Debug, Deserialize)]
struct BudgetRow {
    id: String,
    project_id: String,
    supplier_id: String,
    category: String,
    status: String,
    amount: Option<f64>,
    updated_at: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SupplierRow {
    id: String,
    name: String,
    trade: Option<String>,
    #[serde(default)]
    credits: i64,
}

#[derive(Debug, Deserialize)]
struct SettingRow {
    value: String,
}

#[derive(Debug, Deserialize)]
struct DocumentRow {
    id: String,
    project_id: String,
    name: String,
    storage_path: String,
    uploaded_at: Option<String>,
    #[serde(default)]
    size_bytes: u64,
}

#[derive(Debug, Deserialize)]
struct OverlayRow {
    id: String,
    project_id: String,
    name: String,
    storage_path: String,
    #[serde(default)]
    opacity: u8,
    #[serde(default)]
    visible: bool,
}

#[derive(Debug, Deserialize)]
struct FileVersionRow {
    id: String,
    document_id: String,
    version: i32,
    author: Option<String>,
    uploaded_at: Option<String>,
    notes: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ProjectVersionRow {
    id: String,
    project_id: String,
    name: String,
    created_at: Option<String>,
    #[serde(default)]
    is_active: bool,
}

fn budget_from_row(row: BudgetRow) -> BackendBudget {
    BackendBudget {
        remote_id: row.id,
        project_remote_id: row.project_id,
        supplier_remote_id: row.supplier_id,
        category: row.category,
        status: row.status,
        amount: row.amount,
        updated_at: row.updated_at,
    }
}

fn supplier_from_row(row: SupplierRow) -> BackendSupplier {
    BackendSupplier {
        remote_id: row.id,
        name: row.name,
        trade: row.trade,
        credits: row.credits,
    }
}

fn document_from_row(row: DocumentRow) -> BackendDocument {
    BackendDocument {
        remote_id: row.id,
        project_remote_id: row.project_id,
        name: row.name,
        storage_path: row.storage_path,
        uploaded_at: row.uploaded_at,
        size_bytes: row.size_bytes,
    }
}

fn overlay_from_row(row: OverlayRow) -> BackendOverlayModel {
    BackendOverlayModel {
        remote_id: row.id,
        project_remote_id: row.project_id,
        name: row.name,
        storage_path: row.storage_path,
        opacity: row.opacity.min(OPACITY_MAX),
        visible: row.visible,
    }
}

#[async_trait]
impl Backend for RestBackend {
    fn backend_type(&self) -> &str {
        "rest"
    }

    async fn fetch_projects(&self) -> Result<Vec<BackendProject>, BackendError> {
        let client = self.client.clone();
        blocking(move || {
            let url = client.table_url("projects", "select=*&is_archived=eq.false&order=name.asc");
            let rows: Vec<ProjectRow> = client.get_rows(&url)?;
            Ok(rows
                .into_iter()
                .map(|row| BackendProject {
                    remote_id: row.id,
                    name: row.name,
                    location: row.location,
                    is_archived: row.is_archived,
                })
                .collect())
        })
        .await
    }

    async fn find_budget(
        &self,
        project_remote_id: &str,
        supplier_remote_id: &str,
        category: &str,
    ) -> Result<Option<BackendBudget>, BackendError> {
        let client = self.client.clone();
        let query = format!(
            "select=*&project_id=eq.{}&supplier_id=eq.{}&category=ilike.*{}*&limit=1",
            encode(project_remote_id),
            encode(supplier_remote_id),
            encode(category)
        );
        blocking(move || {
            let url = client.table_url("budgets", &query);
            let mut rows: Vec<BudgetRow> = client.get_rows(&url)?;
            Ok(rows.pop().map(budget_from_row))
        })
        .await
    }

    async fn fetch_accepted_budgets(
        &self,
        project_remote_id: &str,
        category: &str,
    ) -> Result<Vec<BackendBudget>, BackendError> {
        let client = self.client.clone();
        let query = format!(
            "select=*&project_id=eq.{}&category=ilike.*{}*&status=eq.{STATUS_ACCEPTED}",
            encode(project_remote_id),
            encode(category)
        );
        blocking(move || {
            let url = client.table_url("budgets", &query);
            let rows: Vec<BudgetRow> = client.get_rows(&url)?;
            Ok(rows.into_iter().map(budget_from_row).collect())
        })
        .await
    }

    async fn fetch_budgets(&self, project_remote_id: &str) -> Result<Vec<BackendBudget>, BackendError> {
        let client = self.client.clone();
        let query = format!(
            "select=*&project_id=eq.{}&order=category.asc",
            encode(project_remote_id)
        );
        blocking(move || {
            let url = client.table_url("budgets", &query);
            let rows: Vec<BudgetRow> = client.get_rows(&url)?;
            Ok(rows.into_iter().map(budget_from_row).collect())
        })
        .await
    }

    async fn create_budget(&self, args: CreateBudgetArgs) -> Result<BackendBudget, BackendError> {
        let client = self.client.clone();
        blocking(move || {
            let url = client.table_url("budgets", "select=*");
            let payload = json!({
                "project_id": args.project_remote_id,
                "supplier_id": args.supplier_remote_id,
                "category": args.category,
                "status": args.status,
                "amount": args.amount,
            });
            let mut rows: Vec<BudgetRow> = client.post_json(&url, &payload)?;
            rows.pop()
                .map(budget_from_row)
                .ok_or_else(|| BackendError::InvalidData("create returned no budget row".into()))
        })
        .await
    }

    async fn update_budget_status(
        &self,
        remote_id: &str,
        status: &str,
    ) -> Result<BackendBudget, BackendError> {
        let client = self.client.clone();
        let query = format!("id=eq.{}", encode(remote_id));
        let payload = json!({ "status": status });
        let id = remote_id.to_string();
        blocking(move || {
            let url = client.table_url("budgets", &query);
            let mut rows: Vec<BudgetRow> = client.patch_rows(&url, &payload)?;
            rows.pop()
                .map(budget_from_row)
                .ok_or_else(|| BackendError::NotFound(format!("budget {id}")))
        })
        .await
    }

    async fn fetch_supplier(&self, remote_id: &str) -> Result<Option<BackendSupplier>, BackendError> {
        let client = self.client.clone();
        let query = format!("select=*&id=eq.{}&limit=1", encode(remote_id));
        blocking(move || {
            let url = client.table_url("suppliers", &query);
            let mut rows: Vec<SupplierRow> = client.get_rows(&url)?;
            Ok(rows.pop().map(supplier_from_row))
        })
        .await
    }

    async fn add_supplier_credits(
        &self,
        remote_id: &str,
        delta: i64,
    ) -> Result<BackendSupplier, BackendError> {
        let client = self.client.clone();
        let payload = json!({ "supplier_id": remote_id, "delta": delta });
        blocking(move || {
            let url = format!("{}/rest/v1/rpc/add_supplier_credits", client.base_url);
            let row: SupplierRow = client.post_json(&url, &payload)?;
            Ok(supplier_from_row(row))
        })
        .await
    }

    async fn fetch_setting(&self, key: &str) -> Result<Option<String>, BackendError> {
        let client = self.client.clone();
        let query = format!("select=value&key=eq.{}&limit=1", encode(key));
        blocking(move || {
            let url = client.table_url("app_settings", &query);
            let mut rows: Vec<SettingRow> = client.get_rows(&url)?;
            Ok(rows.pop().map(|row| row.value))
        })
        .await
    }

    async fn fetch_documents(&self, project_remote_id: &str) -> Result<Vec<BackendDocument>, BackendError> {
        let client = self.client.clone();
        let query = format!(
            "select=*&project_id=eq.{}&order=uploaded_at.desc",
            encode(project_remote_id)
        );
        blocking(move || {
            let url = client.table_url("documents", &query);
            let rows: Vec<DocumentRow> = client.get_rows(&url)?;
            Ok(rows.into_iter().map(document_from_row).collect())
        })
        .await
    }

    async fn upload_document(&self, args: UploadDocumentArgs) -> Result<BackendDocument, BackendError> {
        let client = self.client.clone();
        blocking(move || {
            let storage_path = format!("{}/{}", args.project_remote_id, args.name);
            client.upload_object(DOCUMENTS_BUCKET, &storage_path, &args.bytes)?;

            let url = client.table_url("documents", "select=*");
            let payload = json!({
                "project_id": args.project_remote_id,
                "name": args.name,
                "storage_path": storage_path,
                "size_bytes": args.bytes.len(),
            });
            let mut rows: Vec<DocumentRow> = client.post_json(&url, &payload)?;
            rows.pop()
                .map(document_from_row)
                .ok_or_else(|| BackendError::InvalidData("upload returned no document row".into()))
        })
        .await
    }

    async fn delete_document(&self, remote_id: &str) -> Result<(), BackendError> {
        let client = self.client.clone();
        let query = format!("id=eq.{}", encode(remote_id));
        blocking(move || {
            let url = client.table_url("documents", &query);
            client.delete(&url)
        })
        .await
    }

    async fn fetch_overlay_models(
        &self,
        project_remote_id: &str,
    ) -> Result<Vec<BackendOverlayModel>, BackendError> {
        let client = self.client.clone();
        let query = format!(
            "select=*&project_id=eq.{}&order=name.asc",
            encode(project_remote_id)
        );
        blocking(move || {
            let url = client.table_url("viewer_overlays", &query);
            let rows: Vec<OverlayRow> = client.get_rows(&url)?;
            Ok(rows.into_iter().map(overlay_from_row).collect())
        })
        .await
    }

    async fn set_overlay_opacity(
        &self,
        remote_id: &str,
        opacity: u8,
    ) -> Result<BackendOverlayModel, BackendError> {
        let client = self.client.clone();
        let query = format!("id=eq.{}", encode(remote_id));
        let payload = json!({ "opacity": opacity.min(OPACITY_MAX) });
        let id = remote_id.to_string();
        blocking(move || {
            let url = client.table_url("viewer_overlays", &query);
            let mut rows: Vec<OverlayRow> = client.patch_rows(&url, &payload)?;
            rows.pop()
                .map(overlay_from_row)
                .ok_or_else(|| BackendError::NotFound(format!("overlay {id}")))
        })
        .await
    }

    async fn set_overlay_visible(
        &self,
        remote_id: &str,
        visible: bool,
    ) -> Result<BackendOverlayModel, BackendError> {
        let client = self.client.clone();
        let query = format!("id=eq.{}", encode(remote_id));
        let payload = json!({ "visible": visible });
        let id = remote_id.to_string();
        blocking(move || {
            let url = client.table_url("viewer_overlays", &query);
            let mut rows: Vec<OverlayRow> = client.patch_rows(&url, &payload)?;
            rows.pop()
                .map(overlay_from_row)
                .ok_or_else(|| BackendError::NotFound(format!("overlay {id}")))
        })
        .await
    }

    async fn fetch_file_versions(
        &self,
        document_remote_id: &str,
    ) -> Result<Vec<BackendFileVersion>, BackendError> {
        let client = self.client.clone();
        let query = format!(
            "select=*&document_id=eq.{}&order=version.desc",
            encode(document_remote_id)
        );
        blocking(move || {
            let url = client.table_url("file_versions", &query);
            let rows: Vec<FileVersionRow> = client.get_rows(&url)?;
            Ok(rows
                .into_iter()
                .map(|row| BackendFileVersion {
                    remote_id: row.id,
                    document_remote_id: row.document_id,
                    version: row.version,
                    author: row.author,
                    uploaded_at: row.uploaded_at,
                    notes: row.notes,
                })
                .collect())
        })
        .await
    }

    async fn fetch_project_versions(
        &self,
        project_remote_id: &str,
    ) -> Result<Vec<BackendProjectVersion>, BackendError> {
        let client = self.client.clone();
        let query = format!(
            "select=*&project_id=eq.{}&order=created_at.desc",
            encode(project_remote_id)
        );
        blocking(move || {
            let url = client.table_url("project_versions", &query);
            let rows: Vec<ProjectVersionRow> = client.get_rows(&url)?;
            Ok(rows
                .into_iter()
                .map(|row| BackendProjectVersion {
                    remote_id: row.id,
                    project_remote_id: row.project_id,
                    name: row.name,
                    created_at: row.created_at,
                    is_active: row.is_active,
                })
                .collect())
        })
        .await
    }

    async fn activate_project_version(
        &self,
        project_remote_id: &str,
        version_remote_id: &str,
    ) -> Result<(), BackendError> {
        let client = self.client.clone();
        // Single-active is enforced by the stored procedure.
        let payload = json!({
            "project_id": project_remote_id,
            "version_id": version_remote_id,
        });
        blocking(move || {
            let url = format!("{}/rest/v1/rpc/activate_project_version", client.base_url);
            client.post_no_content(&url, &payload)
        })
        .await
    }

    async fn fetch_weather(&self, project_remote_id: &str) -> Result<WeatherReport, BackendError> {
        let client = self.client.clone();
        let payload = json!({ "project_id": project_remote_id });
        blocking(move || client.call_function("site-weather", &payload)).await
    }
}
