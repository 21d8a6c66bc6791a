use super::*;
use std::collections::HashMap;
use std::fs;
use tempfile::TempDir;

fn setup_test_dir() -> TempDir {
    TempDir::new().unwrap()
}

fn loader(dir: &TempDir) -> ConfigLoader {
    ConfigLoader::new(dir.path()).with_global_dir(None).without_env()
}

#[test]
fn test_default_config() {
    let config = AuditConfig::new();
    assert_eq!(config.output_dir, PathBuf::from("."));
    assert_eq!(config.as_of, None);
    assert_eq!(config.temporary_visitor_type, "临时来访（化工西门）");
    assert_eq!(config.disabled_type, "停用");
    assert!(config.targets.temporary.is_empty());
}

#[test]
fn test_parse_full_config() {
    let config = AuditConfig::from_toml(
        r#"
output_dir = "reports"
as_of = "2026-01-26"
disabled_type = "停用"

[targets]
temporary = ["黑E2080U", "黑E3CA62"]
disabled = ["黑M2D002"]
"#,
    )
    .unwrap();

    assert_eq!(config.output_dir, PathBuf::from("reports"));
    assert_eq!(config.as_of.as_deref(), Some("2026-01-26"));
    assert_eq!(config.temporary_visitor_type, "临时来访（化工西门）");
    assert_eq!(config.targets.temporary.len(), 2);
    assert_eq!(config.targets.disabled, vec!["黑M2D002"]);
}

#[test]
fn test_invalid_as_of_is_rejected() {
    let err = AuditConfig::from_toml(r#"as_of = "next monday""#).unwrap_err();
    assert!(matches!(err, Error::InvalidDate(_)));
}

#[test]
fn test_unknown_keys_are_rejected() {
    assert!(AuditConfig::from_toml("outptu_dir = \"x\"").is_err());
}

#[test]
fn test_empty_type_is_rejected() {
    let err = AuditConfig::from_toml(r#"disabled_type = " ""#).unwrap_err();
    assert!(matches!(err, Error::Config(_)));
}

#[test]
fn test_env_overrides() {
    let env: HashMap<&str, &str> = [
        ("VIP_AUDIT_OUTPUT_DIR", "/tmp/out"),
        ("VIP_AUDIT_AS_OF", "2026-02-01"),
    ]
    .into_iter()
    .collect();

    let mut config = AuditConfig::new();
    config.merge_env_with(|key| env.get(key).map(|v| v.to_string()));

    assert_eq!(config.output_dir, PathBuf::from("/tmp/out"));
    assert_eq!(config.as_of.as_deref(), Some("2026-02-01"));
}

#[test]
fn test_empty_env_values_are_ignored() {
    let mut config = AuditConfig::new();
    config.merge_env_with(|_| Some(String::new()));
    assert_eq!(config, AuditConfig::new());
}

#[test]
fn test_flag_precedence() {
    let config = AuditConfig {
        output_dir: PathBuf::from("from-config"),
        as_of: Some("2026-01-26".to_string()),
        ..Default::default()
    };

    let flag_dir = PathBuf::from("from-flag");
    assert_eq!(config.output_dir(Some(&flag_dir)), flag_dir);
    assert_eq!(config.output_dir(None), PathBuf::from("from-config"));

    let as_of = config.as_of(Some("2026-03-01")).unwrap();
    assert_eq!(as_of.format("%Y-%m-%d").to_string(), "2026-03-01");
    let as_of = config.as_of(None).unwrap();
    assert_eq!(as_of.format("%Y-%m-%d").to_string(), "2026-01-26");
}

#[test]
fn test_resolve_now_with_flag() {
    let now = resolve_now(Some("2026-01-26 08:56:53")).unwrap();
    assert_eq!(now.format("%H:%M:%S").to_string(), "08:56:53");
    assert!(resolve_now(Some("bogus")).is_err());
}

#[tokio::test]
async fn test_load_defaults_without_files() {
    let dir = setup_test_dir();
    let loaded = loader(&dir).load(None).await.unwrap();
    assert!(loaded.source.is_none());
    assert_eq!(loaded.config, AuditConfig::default());
}

#[tokio::test]
async fn test_load_from_project_dir() {
    let dir = setup_test_dir();
    fs::write(dir.path().join(CONFIG_FILE_NAME), "output_dir = \"out\"\n").unwrap();

    let loaded = loader(&dir).load(None).await.unwrap();
    assert_eq!(loaded.source, Some(dir.path().join(CONFIG_FILE_NAME)));
    assert_eq!(loaded.config.output_dir, PathBuf::from("out"));
}

#[tokio::test]
async fn test_project_file_wins_over_global() {
    let dir = setup_test_dir();
    let global = setup_test_dir();
    fs::write(global.path().join("config.toml"), "output_dir = \"global\"\n").unwrap();

    let loaded = loader(&dir)
        .with_global_dir(Some(global.path().to_path_buf()))
        .load(None)
        .await
        .unwrap();
    assert_eq!(loaded.config.output_dir, PathBuf::from("global"));

    fs::write(dir.path().join(CONFIG_FILE_NAME), "output_dir = \"project\"\n").unwrap();
    let loaded = loader(&dir)
        .with_global_dir(Some(global.path().to_path_buf()))
        .load(None)
        .await
        .unwrap();
    assert_eq!(loaded.config.output_dir, PathBuf::from("project"));
}

#[tokio::test]
async fn test_explicit_path_must_exist() {
    let dir = setup_test_dir();
    let missing = dir.path().join("missing.toml");
    let err = loader(&dir).load(Some(&missing)).await.unwrap_err();
    assert!(err.to_string().contains("does not exist"));
}

#[tokio::test]
async fn test_invalid_toml_names_the_file() {
    let dir = setup_test_dir();
    let path = dir.path().join("custom.toml");
    fs::write(&path, "output_dir = not valid toml").unwrap();

    let err = loader(&dir).load(Some(&path)).await.unwrap_err();
    assert!(err.to_string().contains("custom.toml"));
}
