use std::collections::HashMap;

use serde_json::json;
use stackwise_app::config::{
    self, BackendConfig, CURRENT_VERSION, ConfigError, ScoringSettings, StackwiseConfig,
};
use stackwise_scoring::SimilarityScale;

fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let vars: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key: &str| vars.get(key).cloned()
}

fn aws_config() -> StackwiseConfig {
    StackwiseConfig {
        backend: BackendConfig::Aws {
            region: Some("eu-west-1".to_string()),
            bucket: "stackwise-rows".to_string(),
            cognito_client_id: "abc123".to_string(),
        },
        scoring: ScoringSettings {
            similarity_scale: SimilarityScale::Unit,
            seed: Some(42),
        },
        ..StackwiseConfig::default()
    }
}

#[test]
fn v0_flat_settings_move_under_backend() {
    let v0 = json!({
        "region": "us-east-1",
        "bucket": "legacy-bucket",
        "cognito_client_id": "client-1",
    });
    let migrated = config::migrate(v0, 0).unwrap();
    assert_eq!(migrated["config_version"], 1);

    let config: StackwiseConfig = serde_json::from_value(migrated).unwrap();
    assert_eq!(
        config.backend,
        BackendConfig::Aws {
            region: Some("us-east-1".to_string()),
            bucket: "legacy-bucket".to_string(),
            cognito_client_id: "client-1".to_string(),
        }
    );
    assert_eq!(config.scoring.similarity_scale, SimilarityScale::Ten);
}

#[test]
fn v0_without_bucket_uses_memory() {
    let migrated = config::migrate(json!({}), 0).unwrap();
    let config: StackwiseConfig = serde_json::from_value(migrated).unwrap();
    assert_eq!(config.backend, BackendConfig::Memory);
}

#[test]
fn newer_versions_are_refused() {
    let err = config::migrate(json!({}), CURRENT_VERSION + 1).unwrap_err();
    assert!(matches!(err, ConfigError::UnsupportedVersion { .. }));
}

#[test]
fn save_then_load_round_trips() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("config.json");

    let mut config = aws_config();
    config.config_version = 0;
    config::save_to(&path, &config).unwrap();

    let loaded = config::load_from(&path).unwrap();
    assert_eq!(loaded.config_version, CURRENT_VERSION);
    assert_eq!(loaded.backend, config.backend);
    assert_eq!(loaded.scoring, config.scoring);
    assert!(!path.with_extension("json.tmp").exists());

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let mode = std::fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }
}

#[test]
fn load_migrates_files_on_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.json");
    std::fs::write(&path, r#"{"bucket": "legacy", "cognito_client_id": "c"}"#).unwrap();

    let loaded = config::load_from(&path).unwrap();
    assert!(matches!(loaded.backend, BackendConfig::Aws { ref bucket, .. } if bucket == "legacy"));
}

#[test]
fn env_overrides_apply_on_top_of_the_file() {
    let config = config::apply_env(
        aws_config(),
        env(&[
            ("STACKWISE_BUCKET", "override-bucket"),
            ("AWS_REGION", "ap-south-1"),
            ("STACKWISE_SIMILARITY_SCALE", "ten"),
            ("STACKWISE_SEED", "7"),
        ]),
    )
    .unwrap();

    assert_eq!(
        config.backend,
        BackendConfig::Aws {
            region: Some("ap-south-1".to_string()),
            bucket: "override-bucket".to_string(),
            cognito_client_id: "abc123".to_string(),
        }
    );
    assert_eq!(config.scoring.similarity_scale, SimilarityScale::Ten);
    assert_eq!(config.scoring.seed, Some(7));
}

#[test]
fn env_can_switch_backends() {
    let memory = config::apply_env(aws_config(), env(&[("STACKWISE_BACKEND", "memory")])).unwrap();
    assert_eq!(memory.backend, BackendConfig::Memory);

    let aws = config::apply_env(
        StackwiseConfig::default(),
        env(&[
            ("STACKWISE_BACKEND", "aws"),
            ("STACKWISE_BUCKET", "rows"),
            ("COGNITO_CLIENT_ID", "client"),
        ]),
    )
    .unwrap();
    assert!(matches!(aws.backend, BackendConfig::Aws { region: None, .. }));

    let incomplete = config::apply_env(
        StackwiseConfig::default(),
        env(&[("STACKWISE_BACKEND", "aws")]),
    );
    assert!(matches!(incomplete, Err(ConfigError::Invalid(_))));
}

#[test]
fn bad_env_values_are_errors() {
    let unknown_backend =
        config::apply_env(StackwiseConfig::default(), env(&[("STACKWISE_BACKEND", "sqlite")]));
    assert!(unknown_backend.is_err());

    let bad_scale = config::apply_env(
        StackwiseConfig::default(),
        env(&[("STACKWISE_SIMILARITY_SCALE", "percent")]),
    );
    assert!(bad_scale.is_err());

    let bad_seed =
        config::apply_env(StackwiseConfig::default(), env(&[("STACKWISE_SEED", "-1")]));
    assert!(bad_seed.is_err());

    let untouched = config::apply_env(StackwiseConfig::default(), env(&[])).unwrap();
    assert_eq!(untouched, StackwiseConfig::default());
}
