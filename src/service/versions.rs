//! File-version and project-version operations.

use anyhow::{Context, Result};

use crate::backend::{BackendFileVersion, BackendProjectVersion};
use crate::service::ProjectService;

impl ProjectService {
    /// Retrieves version metadata for a document, newest first.
    pub async fn get_file_versions(&self, document_id: &str) -> Result<Vec<BackendFileVersion>> {
        self.backend()
            .fetch_file_versions(document_id)
            .await
            .context("Failed to fetch file versions")
    }

    /// Retrieves the selectable versions of a project.
    pub async fn get_project_versions(&self, project_id: &str) -> Result<Vec<BackendProjectVersion>> {
        self.backend()
            .fetch_project_versions(project_id)
            .await
            .context("Failed to fetch project versions")
    }

    /// Make `version_id` the project's active version; the store keeps
    /// exactly one version active per project.
    pub async fn select_project_version(&self, project_id: &str, version_id: &str) -> Result<()> {
        self.backend()
            .activate_project_version(project_id, version_id)
            .await
            .context("Failed to select project version")?;
        self.logger()
            .log(format!("Activated version {version_id} on {project_id}"));
        Ok(())
    }
}
