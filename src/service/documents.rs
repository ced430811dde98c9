//! Graphic-documentation operations.

use anyhow::{Context, Result};
use std::path::Path;

use crate::backend::{BackendDocument, UploadDocumentArgs};
use crate::service::ProjectService;

impl ProjectService {
    /// Retrieves documentation metadata for a project.
    pub async fn get_documents(&self, project_id: &str) -> Result<Vec<BackendDocument>> {
        self.backend()
            .fetch_documents(project_id)
            .await
            .context("Failed to fetch documents")
    }

    /// Upload a local file as graphic documentation for a project.
    ///
    /// The file name becomes the document name; bytes go to the object store
    /// and a metadata row is written next to them.
    pub async fn upload_document(&self, project_id: &str, path: &Path) -> Result<BackendDocument> {
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .with_context(|| format!("invalid file name: {}", path.display()))?
            .to_string();

        let bytes = tokio::fs::read(path)
            .await
            .with_context(|| format!("Failed to read {}", path.display()))?;

        let document = self
            .backend()
            .upload_document(UploadDocumentArgs {
                project_remote_id: project_id.to_string(),
                name,
                bytes,
            })
            .await
            .context("Failed to upload document")?;

        self.logger()
            .log(format!("Uploaded document {}", document.name));
        Ok(document)
    }

    /// Delete a document's metadata row (the store cleans up the object).
    pub async fn delete_document(&self, document_id: &str) -> Result<()> {
        self.backend()
            .delete_document(document_id)
            .await
            .context("Failed to delete document")
    }
}
