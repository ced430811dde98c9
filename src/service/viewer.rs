//! 3D-viewer overlay operations.

use anyhow::{Context, Result};

use crate::backend::BackendOverlayModel;
use crate::constants::{OPACITY_MAX, OPACITY_STEP};
use crate::service::ProjectService;

impl ProjectService {
    /// Retrieves the overlay models for a project.
    pub async fn get_overlay_models(&self, project_id: &str) -> Result<Vec<BackendOverlayModel>> {
        self.backend()
            .fetch_overlay_models(project_id)
            .await
            .context("Failed to fetch overlay models")
    }

    /// Step an overlay's opacity up or down, clamped to 0..=100.
    pub async fn step_overlay_opacity(
        &self,
        overlay: &BackendOverlayModel,
        increase: bool,
    ) -> Result<BackendOverlayModel> {
        let step = if increase { OPACITY_STEP } else { -OPACITY_STEP };
        let next = (i16::from(overlay.opacity) + step).clamp(0, i16::from(OPACITY_MAX)) as u8;
        self.backend()
            .set_overlay_opacity(&overlay.remote_id, next)
            .await
            .context("Failed to update overlay opacity")
    }

    /// Toggle an overlay on or off in the viewer.
    pub async fn toggle_overlay_visibility(
        &self,
        overlay: &BackendOverlayModel,
    ) -> Result<BackendOverlayModel> {
        self.backend()
            .set_overlay_visible(&overlay.remote_id, !overlay.visible)
            .await
            .context("Failed to toggle overlay visibility")
    }
}
