//! Backend factory for creating backend instances from configuration.

use anyhow::{anyhow, Result};
use serde_json::Value;

use super::{memory::MemoryBackend, rest::RestBackend, Backend};

/// Create a backend instance from backend type and credentials.
///
/// # Arguments
/// * `backend_type` - The type of backend ("rest" or "memory")
/// * `credentials` - JSON-encoded credentials string
///
/// # Errors
/// Returns error if the backend type is unknown, the credentials are invalid
/// JSON, or required credentials are missing.
pub fn create_backend(backend_type: &str, credentials: &str) -> Result<Box<dyn Backend>> {
    let creds: Value = serde_json::from_str(credentials)
        .map_err(|e| anyhow!("Failed to parse credentials JSON: {}", e))?;

    match backend_type {
        "rest" => {
            let base_url = creds["base_url"]
                .as_str()
                .ok_or_else(|| anyhow!("Missing 'base_url' in rest credentials"))?;
            let api_key = creds["api_key"]
                .as_str()
                .ok_or_else(|| anyhow!("Missing 'api_key' in rest credentials"))?;
            let access_token = creds["access_token"]
                .as_str()
                .ok_or_else(|| anyhow!("Missing 'access_token' in rest credentials"))?;
            Ok(Box::new(RestBackend::new(
                base_url.to_string(),
                api_key.to_string(),
                access_token.to_string(),
            )))
        }
        "memory" => Ok(Box::new(MemoryBackend::with_demo_data())),
        _ => Err(anyhow!("Unknown backend type: {}", backend_type)),
    }
}
