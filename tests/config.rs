use sitedesk::config::Config;
use sitedesk::utils::datetime;

#[test]
fn test_default_config() {
    let config = Config::default();
    assert_eq!(config.ui.default_view, "budgets");
    assert_eq!(config.ui.icon_theme, "ascii");
    assert!(config.ui.mouse_enabled);
    assert!(config.display.show_amounts);
    assert!(!config.logging.enabled);
    assert_eq!(config.backends.default_backend, "demo");
}

#[test]
fn test_config_validation() {
    let mut config = Config::default();

    // Valid config should pass
    assert!(config.validate().is_ok());

    // Invalid sidebar width should fail
    config.ui.sidebar_width = 10;
    assert!(config.validate().is_err());

    // Reset and test invalid default view
    config.ui.sidebar_width = 28;
    config.ui.default_view = "spreadsheets".to_string();
    assert!(config.validate().is_err());
}

#[test]
fn test_rest_backend_requires_connection_config() {
    let mut config = Config::default();
    let hosted = config.backends.instances.get_mut("hosted").unwrap();
    hosted.config.remove("base_url");
    assert!(config.validate().is_err());
}

#[test]
fn test_unknown_backend_type_rejected() {
    let toml = r#"
[backends]
default_backend = "weird"

[backends.instances.weird]
backend_type = "carrier-pigeon"
name = "Weird"
enabled = true
config = {}
"#;
    let config: Config = toml::from_str(toml).unwrap();
    assert!(config.validate().is_err());
}

#[test]
fn test_config_serialization() {
    let config = Config::default();
    let toml_str = toml::to_string_pretty(&config).unwrap();
    assert!(toml_str.contains("default_view = \"budgets\""));
    assert!(toml_str.contains("default_backend = \"demo\""));
}

#[test]
fn test_partial_config_deserialization() {
    // Partial TOML configs merge with defaults
    let partial_toml = r#"
[ui]
sidebar_width = 35

[supplier]
id = "sup-volta"

[logging]
enabled = true
"#;

    let config: Config = toml::from_str(partial_toml).unwrap();

    assert_eq!(config.ui.sidebar_width, 35);
    assert_eq!(config.supplier.id, "sup-volta");
    assert!(config.logging.enabled);

    // Unspecified values use defaults
    assert_eq!(config.ui.default_view, "budgets");
    assert!(config.ui.mouse_enabled);
    assert_eq!(config.display.date_format, datetime::DATE_FORMAT);
}

#[test]
fn test_empty_config_deserialization() {
    let empty_toml = "";
    let config: Config = toml::from_str(empty_toml).unwrap();
    let default_config = Config::default();

    assert_eq!(config.ui.default_view, default_config.ui.default_view);
    assert_eq!(config.supplier.id, default_config.supplier.id);
    assert_eq!(config.logging.enabled, default_config.logging.enabled);
    assert_eq!(config.display.date_format, default_config.display.date_format);
}
