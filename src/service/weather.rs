//! Live weather and air-quality readings.

use anyhow::{Context, Result};

use crate::backend::WeatherReport;
use crate::service::ProjectService;

impl ProjectService {
    /// Fetch the current weather/air-quality reading for a project site.
    /// Always a live call; readings are never cached client-side.
    pub async fn get_weather(&self, project_id: &str) -> Result<WeatherReport> {
        self.backend()
            .fetch_weather(project_id)
            .await
            .context("Failed to fetch site weather")
    }
}
