//! Data-access service layer for the application.
//!
//! [`ProjectService`] wraps the backend adapter and is the only surface the
//! UI talks to. Operations are grouped per concern: budgets, graphic
//! documentation, viewer overlays, versions, and weather, one impl-block file
//! each.

pub mod budgets;
pub mod documents;
pub mod versions;
pub mod viewer;
pub mod weather;

use anyhow::{Context, Result};
use log::info;
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::backend::{
    Backend, BackendBudget, BackendDocument, BackendOverlayModel, BackendProject,
    BackendProjectVersion,
};
use crate::eligibility::EligibilityVerifier;
use crate::logger::Logger;

/// Everything the main view needs for one project, fetched in one refresh.
#[derive(Debug, Clone, Default)]
pub struct ProjectData {
    pub budgets: Vec<BackendBudget>,
    pub documents: Vec<BackendDocument>,
    pub overlays: Vec<BackendOverlayModel>,
    pub project_versions: Vec<BackendProjectVersion>,
}

/// Service that mediates between the UI and the remote project store.
///
/// There is no local cache; the remote store is the single source of truth
/// and every read goes to it. Refreshes are single-flight: a second refresh
/// request while one is running is rejected rather than queued.
#[derive(Clone)]
pub struct ProjectService {
    backend: Arc<Box<dyn Backend>>,
    logger: Logger,
    refresh_in_progress: Arc<Mutex<bool>>,
}

impl ProjectService {
    pub fn new(backend: Box<dyn Backend>, logger: Logger) -> Self {
        Self {
            backend: Arc::new(backend),
            logger,
            refresh_in_progress: Arc::new(Mutex::new(false)),
        }
    }

    /// Shared handle to the backend adapter, for collaborators that talk to
    /// it directly (the eligibility verifier).
    pub fn backend(&self) -> Arc<Box<dyn Backend>> {
        Arc::clone(&self.backend)
    }

    pub fn logger(&self) -> &Logger {
        &self.logger
    }

    /// A verifier bound to this service's backend.
    pub fn verifier(&self) -> EligibilityVerifier {
        EligibilityVerifier::new(self.backend())
    }

    /// Checks if a refresh operation is currently in progress.
    pub async fn is_refreshing(&self) -> bool {
        *self.refresh_in_progress.lock().await
    }

    /// Retrieves all non-archived projects.
    pub async fn fetch_projects(&self) -> Result<Vec<BackendProject>> {
        self.backend
            .fetch_projects()
            .await
            .context("Failed to fetch projects")
    }

    /// Fetch the full panel dataset for one project.
    ///
    /// # Errors
    /// Fails if a refresh is already running or any backend read fails.
    pub async fn load_project_data(&self, project_id: &str) -> Result<ProjectData> {
        {
            let mut guard = self.refresh_in_progress.lock().await;
            if *guard {
                anyhow::bail!("refresh already in progress");
            }
            *guard = true;
        }

        let result = self.fetch_project_data(project_id).await;

        {
            let mut guard = self.refresh_in_progress.lock().await;
            *guard = false;
        }

        result
    }

    async fn fetch_project_data(&self, project_id: &str) -> Result<ProjectData> {
        info!("refreshing project data for {project_id}");
        self.logger.log(format!("Refreshing project {project_id}"));

        let budgets = self
            .backend
            .fetch_budgets(project_id)
            .await
            .context("Failed to fetch budgets")?;
        let documents = self
            .backend
            .fetch_documents(project_id)
            .await
            .context("Failed to fetch documents")?;
        let overlays = self
            .backend
            .fetch_overlay_models(project_id)
            .await
            .context("Failed to fetch overlay models")?;
        let project_versions = self
            .backend
            .fetch_project_versions(project_id)
            .await
            .context("Failed to fetch project versions")?;

        Ok(ProjectData {
            budgets,
            documents,
            overlays,
            project_versions,
        })
    }
}
