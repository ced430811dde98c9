//! Configuration management for Sitedesk
//!
//! This module handles loading, parsing, and validation of configuration files.

use crate::constants::{CONFIG_GENERATED, SIDEBAR_DEFAULT_WIDTH, SIDEBAR_MAX_WIDTH, SIDEBAR_MIN_WIDTH};
use crate::utils::datetime;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub ui: UiConfig,
    pub supplier: SupplierConfig,
    pub display: DisplayConfig,
    pub logging: LoggingConfig,
    pub backends: BackendsConfig,
}

/// UI configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// View to open on startup: "budgets", "documents", "viewer" or "weather"
    pub default_view: String,
    /// Icon theme: "ascii" or "emoji"
    pub icon_theme: String,
    /// Enable mouse support
    pub mouse_enabled: bool,
    /// Sidebar width in columns
    pub sidebar_width: u16,
}

/// The supplier identity this client acts as
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct SupplierConfig {
    /// Supplier profile id used for budget submissions and verification
    pub id: String,
}

/// Display configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Date format for timestamps
    pub date_format: String,
    /// Show budget amounts in the list view
    pub show_amounts: bool,
    /// Show document sizes
    pub show_sizes: bool,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct LoggingConfig {
    /// Enable file logging
    pub enabled: bool,
    /// Log file path; defaults to sitedesk.log in the working directory
    pub file: Option<String>,
}

/// Backend configurations
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BackendsConfig {
    /// Default backend to use
    pub default_backend: String,
    /// Map of backend_id -> backend configuration
    pub instances: HashMap<String, BackendInstanceConfig>,
}

/// Configuration for a single backend instance
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendInstanceConfig {
    /// Backend type ("rest" or "memory")
    pub backend_type: String,
    /// Human-readable name for this backend instance
    pub name: String,
    /// Whether this backend instance is enabled
    pub enabled: bool,
    /// Backend-specific configuration as a map of key-value pairs
    pub config: HashMap<String, String>,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            default_view: "budgets".to_string(),
            icon_theme: "ascii".to_string(),
            mouse_enabled: true,
            sidebar_width: SIDEBAR_DEFAULT_WIDTH,
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            date_format: datetime::DATE_FORMAT.to_string(),
            show_amounts: true,
            show_sizes: true,
        }
    }
}

impl Default for BackendsConfig {
    fn default() -> Self {
        let mut instances = HashMap::new();

        // A hosted instance reading its secrets from the environment
        instances.insert(
            "hosted".to_string(),
            BackendInstanceConfig {
                backend_type: "rest".to_string(),
                name: "Hosted project store".to_string(),
                enabled: true,
                config: {
                    let mut config = HashMap::new();
                    config.insert("base_url".to_string(), "https://api.sitedesk.dev".to_string());
                    config.insert("api_key_env".to_string(), "SITEDESK_API_KEY".to_string());
                    config.insert(
                        "access_token_env".to_string(),
                        "SITEDESK_ACCESS_TOKEN".to_string(),
                    );
                    config
                },
            },
        );

        // Seeded in-memory instance for demo mode
        instances.insert(
            "demo".to_string(),
            BackendInstanceConfig {
                backend_type: "memory".to_string(),
                name: "Demo project".to_string(),
                enabled: true,
                config: HashMap::new(),
            },
        );

        Self {
            default_backend: "demo".to_string(),
            instances,
        }
    }
}

impl BackendInstanceConfig {
    /// Get a configuration value by key
    pub fn get_config(&self, key: &str) -> Option<&String> {
        self.config.get(key)
    }
}

impl Config {
    /// Load configuration from file or return defaults
    pub fn load() -> Result<Self> {
        let config_path = Self::find_config_file()?;

        if let Some(path) = config_path {
            Self::load_from_file(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.as_ref().display()))?;

        config.validate()?;
        Ok(config)
    }

    /// Find configuration file in order of precedence
    fn find_config_file() -> Result<Option<PathBuf>> {
        // 1. Check current directory
        let current_dir_config = PathBuf::from("sitedesk.toml");
        if current_dir_config.exists() {
            return Ok(Some(current_dir_config));
        }

        // 2. Check XDG config directory
        if let Some(config_dir) = dirs::config_dir() {
            let xdg_config = config_dir.join("sitedesk").join("config.toml");
            if xdg_config.exists() {
                return Ok(Some(xdg_config));
            }
        }

        Ok(None)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.ui.sidebar_width < SIDEBAR_MIN_WIDTH || self.ui.sidebar_width > SIDEBAR_MAX_WIDTH {
            anyhow::bail!(
                "sidebar_width must be between {} and {} columns, got {}",
                SIDEBAR_MIN_WIDTH,
                SIDEBAR_MAX_WIDTH,
                self.ui.sidebar_width
            );
        }

        let valid_views = ["budgets", "documents", "viewer", "weather"];
        if !valid_views.contains(&self.ui.default_view.as_str()) {
            anyhow::bail!(
                "default_view must be one of {}, got '{}'",
                valid_views.join(", "),
                self.ui.default_view
            );
        }

        if !["ascii", "emoji"].contains(&self.ui.icon_theme.as_str()) {
            anyhow::bail!("icon_theme must be 'ascii' or 'emoji', got '{}'", self.ui.icon_theme);
        }

        if let Err(e) = chrono::NaiveDate::parse_from_str("2025-01-01", &self.display.date_format) {
            anyhow::bail!("Invalid date_format '{}': {}", self.display.date_format, e);
        }

        self.validate_backends()?;

        Ok(())
    }

    /// Validate backend configurations
    fn validate_backends(&self) -> Result<()> {
        let default_backend = &self.backends.default_backend;
        match self.backends.instances.get(default_backend) {
            Some(instance) => {
                if !instance.enabled {
                    anyhow::bail!("default_backend '{}' is disabled", default_backend);
                }
            }
            None => {
                let available: Vec<String> = self.get_available_backend_ids();
                anyhow::bail!(
                    "default_backend '{}' not found. Available backends: {}",
                    default_backend,
                    if available.is_empty() {
                        "none".to_string()
                    } else {
                        available.join(", ")
                    }
                );
            }
        }

        for (backend_id, instance) in &self.backends.instances {
            if instance.enabled {
                self.validate_backend_instance(backend_id, instance)?;
            }
        }

        Ok(())
    }

    /// Validate a single backend instance
    fn validate_backend_instance(&self, backend_id: &str, instance: &BackendInstanceConfig) -> Result<()> {
        if instance.name.is_empty() {
            anyhow::bail!("Backend '{}': name cannot be empty", backend_id);
        }
        if instance.backend_type.is_empty() {
            anyhow::bail!("Backend '{}': backend_type cannot be empty", backend_id);
        }

        match instance.backend_type.as_str() {
            "rest" => {
                for required in ["base_url", "api_key_env", "access_token_env"] {
                    match instance.get_config(required) {
                        Some(value) if !value.is_empty() => {}
                        _ => anyhow::bail!(
                            "Backend '{}': missing required config '{}'",
                            backend_id,
                            required
                        ),
                    }
                }
            }
            "memory" => {}
            backend_type => {
                anyhow::bail!("Backend '{}': unsupported backend_type '{}'", backend_id, backend_type);
            }
        }

        Ok(())
    }

    /// Get list of available (enabled) backend IDs
    pub fn get_available_backend_ids(&self) -> Vec<String> {
        self.backends
            .instances
            .iter()
            .filter(|(_, instance)| instance.enabled)
            .map(|(backend_id, _)| backend_id.clone())
            .collect()
    }

    /// Get a specific backend instance configuration
    pub fn get_backend_instance(&self, backend_id: &str) -> Option<&BackendInstanceConfig> {
        self.backends.instances.get(backend_id)
    }

    /// Resolve the default backend instance into (type, credentials JSON) for
    /// the factory. Environment variables named in the instance config are
    /// read here.
    pub fn resolve_default_backend(&self) -> Result<(String, String)> {
        let backend_id = &self.backends.default_backend;
        let instance = self
            .get_backend_instance(backend_id)
            .with_context(|| format!("backend '{backend_id}' not configured"))?;

        let credentials = match instance.backend_type.as_str() {
            "rest" => {
                let base_url = instance
                    .get_config("base_url")
                    .context("missing base_url")?
                    .clone();
                let api_key = read_env(instance.get_config("api_key_env").context("missing api_key_env")?)?;
                let access_token = read_env(
                    instance
                        .get_config("access_token_env")
                        .context("missing access_token_env")?,
                )?;
                serde_json::json!({
                    "base_url": base_url,
                    "api_key": api_key,
                    "access_token": access_token,
                })
                .to_string()
            }
            _ => "{}".to_string(),
        };

        Ok((instance.backend_type.clone(), credentials))
    }

    /// Generate default configuration file
    pub fn generate_default_config<P: AsRef<Path>>(path: P) -> Result<()> {
        let config = Self::default();
        let toml_content = toml::to_string_pretty(&config).context("Failed to serialize default config")?;

        let header = format!(
            "# Sitedesk Configuration File\n# Generated on {}\n\n",
            chrono::Local::now().format(datetime::DATE_FORMAT)
        );

        let full_content = header + &toml_content;

        if let Some(parent) = path.as_ref().parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config directory: {}", parent.display()))?;
        }

        std::fs::write(&path, full_content)
            .with_context(|| format!("Failed to write config file: {}", path.as_ref().display()))?;

        println!("{}: {}", CONFIG_GENERATED, path.as_ref().display());
        Ok(())
    }

    /// Get the XDG config directory path
    pub fn get_xdg_config_dir() -> Result<PathBuf> {
        dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))
            .map(|dir| dir.join("sitedesk"))
    }

    /// Get the default config file path
    pub fn get_default_config_path() -> Result<PathBuf> {
        Ok(Self::get_xdg_config_dir()?.join("config.toml"))
    }
}

fn read_env(name: &str) -> Result<String> {
    std::env::var(name).with_context(|| format!("environment variable {name} not set"))
}
