use redux_session::env::adapters;
use redux_session::{
    HydrationPolicy, SessionConfig, SessionError, SessionOptions, StorageAdapter, create,
};
use serde_json::json;
use tempfile::NamedTempFile;

#[test]
fn test_config_serialization_roundtrip() {
    let original_config = SessionConfig {
        adapter: Some(adapters::COOKIE_STORAGE.to_string()),
        hydration: HydrationPolicy::FirstAction,
        ..SessionConfig::new("todo.app")
    };

    let toml_str = original_config
        .to_toml_string()
        .expect("Should be able to serialize config to TOML");

    assert!(toml_str.contains("ns = \"todo.app\""), "Should contain ns field");
    assert!(toml_str.contains("hydration = \"first_action\""), "Should use snake_case policy names");

    let deserialized_config =
        SessionConfig::from_toml_str(&toml_str).expect("Should be able to deserialize TOML string");
    assert_eq!(original_config, deserialized_config);
}

#[test]
fn test_config_file_operations() {
    let original_config = SessionConfig {
        throttle_ms: 250,
        silent: true,
        ..SessionConfig::new("todo.app")
    };

    let temp_file = NamedTempFile::new().expect("Should be able to create temporary file");
    let temp_path = temp_file.path();

    original_config
        .to_toml_file(temp_path)
        .expect("Should be able to save config to file");
    let loaded_config =
        SessionConfig::from_toml_file(temp_path).expect("Should be able to load config from file");

    assert_eq!(original_config, loaded_config);
}

#[test]
fn test_partial_config_uses_defaults() {
    let config = SessionConfig::from_toml_str("ns = \"todo.app\"\n").expect("Should parse minimal config");

    assert_eq!(config.ns, "todo.app");
    assert_eq!(config.throttle_ms, 2000);
    assert!(!config.silent);
    assert_eq!(config.adapter, None);
    assert_eq!(config.storage_dir, None);
    assert_eq!(config.hydration, HydrationPolicy::EveryAction);
}

#[test]
fn test_config_error_handling() {
    let result = SessionConfig::from_toml_str("ns = [unterminated");
    assert!(matches!(result, Err(SessionError::ConfigFile(_))), "Invalid TOML should fail");

    let result = SessionConfig::from_toml_str("throttle_ms = \"fast\"");
    assert!(matches!(result, Err(SessionError::ConfigFile(_))), "Wrong field type should fail");

    let result = SessionConfig::from_toml_file("/nonexistent/path/session.toml");
    assert!(matches!(result, Err(SessionError::ConfigFile(_))), "Missing file should fail");
}

#[tokio::test]
async fn test_config_with_storage_dir_persists_to_disk() {
    let dir = tempfile::tempdir().unwrap();
    let toml_str = format!(
        "ns = \"todo.app\"\nstorage_dir = {:?}\n",
        dir.path().display().to_string()
    );
    let config = SessionConfig::from_toml_str(&toml_str).expect("Should parse config");

    let options = SessionOptions::<serde_json::Value>::from_config(&config).unwrap();
    let session = create(options).unwrap();
    assert_eq!(session.adapter().name(), adapters::LOCAL_STORAGE);

    session
        .adapter()
        .set("todo.app", &json!({"todos": []}), session.adapter_options())
        .unwrap();
    assert!(dir.path().join("todo.app.root").is_file());
}

#[tokio::test]
async fn test_config_namespace_is_validated_on_create() {
    let config = SessionConfig::default();

    let options = SessionOptions::<serde_json::Value>::from_config(&config).unwrap();
    let err = match create(options) {
        Err(err) => err,
        Ok(_) => panic!("empty namespace should be rejected"),
    };

    assert!(matches!(err, SessionError::Configuration(_)));
    assert!(err.to_string().contains("namespace"));
}

#[tokio::test]
async fn test_config_named_adapter_is_used() {
    let config = SessionConfig {
        adapter: Some(adapters::COOKIE_STORAGE.to_string()),
        silent: true,
        ..SessionConfig::new("todo.app")
    };

    let session = create(SessionOptions::<serde_json::Value>::from_config(&config).unwrap()).unwrap();

    assert_eq!(session.adapter().name(), adapters::COOKIE_STORAGE);
    assert!(session.adapter_options().silent);
}
