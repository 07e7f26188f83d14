// Config loading and validation tests

use hostwatch::config::AppConfig;

const VALID_CONFIG: &str = r#"
[server]
port = 8081
host = "0.0.0.0"

[database]
path = "data/server.db"
max_pool_size = 10

[auth]
jwt_secret = "s3cret"
token_ttl_secs = 3600

[metrics]
source_timeout_ms = 2000
"#;

#[test]
fn test_config_loads_from_str() {
    let config = AppConfig::load_from_str(VALID_CONFIG).expect("load_from_str");
    assert_eq!(config.server.port, 8081);
    assert_eq!(config.server.host, "0.0.0.0");
    assert_eq!(config.database.path, "data/server.db");
    assert_eq!(config.database.max_pool_size, 10);
    assert_eq!(config.auth.jwt_secret, "s3cret");
    assert_eq!(config.auth.token_ttl_secs, 3600);
    assert_eq!(config.metrics.source_timeout_ms, 2000);
}

#[test]
fn test_config_applies_defaults_for_optional_keys() {
    let minimal = VALID_CONFIG
        .replace("token_ttl_secs = 3600\n", "")
        .replace("source_timeout_ms = 2000\n", "");
    let config = AppConfig::load_from_str(&minimal).expect("load_from_str");
    assert_eq!(config.auth.token_ttl_secs, 360_000);
    assert_eq!(config.metrics.source_timeout_ms, 5_000);
}

#[test]
fn test_config_validation_rejects_invalid_port() {
    let bad = VALID_CONFIG.replace("port = 8081", "port = 0");
    let err = AppConfig::load_from_str(&bad).unwrap_err();
    assert!(err.to_string().contains("server.port"));
}

#[test]
fn test_config_validation_rejects_empty_db_path() {
    let bad = VALID_CONFIG.replace("path = \"data/server.db\"", "path = \"\"");
    let err = AppConfig::load_from_str(&bad).unwrap_err();
    assert!(err.to_string().contains("database.path"));
}

#[test]
fn test_config_validation_rejects_max_pool_size_zero() {
    let bad = VALID_CONFIG.replace("max_pool_size = 10", "max_pool_size = 0");
    let err = AppConfig::load_from_str(&bad).unwrap_err();
    assert!(err.to_string().contains("max_pool_size"));
}

#[test]
fn test_config_validation_rejects_empty_jwt_secret() {
    let bad = VALID_CONFIG.replace("jwt_secret = \"s3cret\"", "jwt_secret = \"\"");
    let err = AppConfig::load_from_str(&bad).unwrap_err();
    assert!(err.to_string().contains("jwt_secret"));
}

#[test]
fn test_config_validation_rejects_zero_token_ttl() {
    let bad = VALID_CONFIG.replace("token_ttl_secs = 3600", "token_ttl_secs = 0");
    let err = AppConfig::load_from_str(&bad).unwrap_err();
    assert!(err.to_string().contains("token_ttl_secs"));
}

#[test]
fn test_config_validation_rejects_zero_source_timeout() {
    let bad = VALID_CONFIG.replace("source_timeout_ms = 2000", "source_timeout_ms = 0");
    let err = AppConfig::load_from_str(&bad).unwrap_err();
    assert!(err.to_string().contains("source_timeout_ms"));
}

#[test]
fn test_config_rejects_missing_section() {
    let bad = VALID_CONFIG.replace("[auth]", "[other]");
    assert!(AppConfig::load_from_str(&bad).is_err());
}
