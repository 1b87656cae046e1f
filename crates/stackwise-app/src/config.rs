//! On-disk configuration with versioned migrations and environment overrides.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::Value;
use stackwise_scoring::SimilarityScale;
use thiserror::Error;
use tracing::info;

/// Current config version. Each bump needs a step in [`migrate`].
pub const CURRENT_VERSION: u32 = 1;

const APP_DIR: &str = "stackwise";
const FILE_NAME: &str = "config.json";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("no config directory found")]
    NoConfigDir,

    #[error("failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("config_version {found} is newer than this build supports ({supported})")]
    UnsupportedVersion { found: u32, supported: u32 },

    #[error("invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StackwiseConfig {
    /// Schema version. Missing or 0 = pre-versioned config.
    #[serde(default)]
    pub config_version: u32,
    pub backend: BackendConfig,
    #[serde(default)]
    pub scoring: ScoringSettings,
    #[serde(default)]
    pub log: LogSettings,
}

impl Default for StackwiseConfig {
    fn default() -> Self {
        Self {
            config_version: CURRENT_VERSION,
            backend: BackendConfig::Memory,
            scoring: ScoringSettings::default(),
            log: LogSettings::default(),
        }
    }
}

/// Where rows and accounts live.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum BackendConfig {
    /// In-process tables and accounts; nothing survives a restart.
    Memory,
    /// S3 bucket for rows, Cognito user pool for accounts.
    Aws {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        region: Option<String>,
        bucket: String,
        cognito_client_id: String,
    },
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoringSettings {
    #[serde(default)]
    pub similarity_scale: SimilarityScale,
    /// Fixed seed for reproducible verdicts; `None` seeds from the OS.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LogSettings {
    /// Emit JSON lines instead of the human-readable format.
    #[serde(default)]
    pub json: bool,
}

pub fn config_dir() -> Result<PathBuf, ConfigError> {
    let base = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
    Ok(base.join(APP_DIR))
}

pub fn config_path() -> Result<PathBuf, ConfigError> {
    Ok(config_dir()?.join(FILE_NAME))
}

/// Load from the platform config dir, falling back to defaults when no file
/// exists, then apply environment overrides.
pub fn load() -> Result<StackwiseConfig, ConfigError> {
    let path = config_path()?;
    let config = if path.exists() {
        load_from(&path)?
    } else {
        StackwiseConfig::default()
    };
    apply_env(config, |key| std::env::var(key).ok())
}

pub fn save(config: &StackwiseConfig) -> Result<(), ConfigError> {
    save_to(&config_path()?, config)
}

/// Read and migrate a config file.
pub fn load_from(path: &Path) -> Result<StackwiseConfig, ConfigError> {
    let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    // Raw JSON first so migrations run before the typed decode.
    let json: Value = serde_json::from_str(&contents)?;
    let on_disk_version = json
        .get("config_version")
        .and_then(Value::as_u64)
        .unwrap_or(0) as u32;

    let migrated = migrate(json, on_disk_version)?;
    Ok(serde_json::from_value(migrated)?)
}

/// Sequential pure transforms from `from_version` up to [`CURRENT_VERSION`].
pub fn migrate(mut json: Value, from_version: u32) -> Result<Value, ConfigError> {
    if from_version > CURRENT_VERSION {
        return Err(ConfigError::UnsupportedVersion {
            found: from_version,
            supported: CURRENT_VERSION,
        });
    }

    // v0 -> v1: flat `region`/`bucket`/`cognito_client_id` move under a
    // tagged `backend`. No bucket means the memory backend.
    if from_version < 1 {
        let obj = json
            .as_object_mut()
            .ok_or_else(|| ConfigError::Invalid("config is not a JSON object".to_string()))?;

        let region = obj.remove("region");
        let bucket = obj.remove("bucket");
        let client_id = obj.remove("cognito_client_id");

        let backend = match bucket {
            Some(Value::String(bucket)) if !bucket.is_empty() => {
                let mut backend = serde_json::json!({
                    "type": "aws",
                    "bucket": bucket,
                    "cognito_client_id": client_id.unwrap_or(Value::String(String::new())),
                });
                if let Some(region @ Value::String(_)) = region {
                    backend["region"] = region;
                }
                backend
            }
            _ => serde_json::json!({ "type": "memory" }),
        };
        obj.entry("backend").or_insert(backend);
        obj.insert("config_version".to_string(), Value::from(1));
        info!("migrated config v0 -> v1 (nested backend settings)");
    }

    Ok(json)
}

/// Write atomically (temp file + rename), always stamped with
/// [`CURRENT_VERSION`]. The file is 0600 on unix.
pub fn save_to(path: &Path, config: &StackwiseConfig) -> Result<(), ConfigError> {
    let io_err = |path: &Path| {
        let path = path.to_path_buf();
        move |source| ConfigError::Io { path, source }
    };

    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir).map_err(io_err(dir))?;
    }

    let mut stamped = config.clone();
    stamped.config_version = CURRENT_VERSION;
    let json = serde_json::to_string_pretty(&stamped)?;

    let tmp_path = path.with_extension("json.tmp");
    std::fs::write(&tmp_path, json.as_bytes()).map_err(io_err(&tmp_path))?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        std::fs::set_permissions(&tmp_path, std::fs::Permissions::from_mode(0o600))
            .map_err(io_err(&tmp_path))?;
    }

    std::fs::rename(&tmp_path, path).map_err(io_err(path))?;

    info!(path = %path.display(), "config saved");
    Ok(())
}

/// Apply `STACKWISE_*`, `AWS_REGION`, and `COGNITO_CLIENT_ID` overrides.
/// `lookup` returns the variable's value, if set.
pub fn apply_env(
    mut config: StackwiseConfig,
    lookup: impl Fn(&str) -> Option<String>,
) -> Result<StackwiseConfig, ConfigError> {
    let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

    if let Some(backend) = var("STACKWISE_BACKEND") {
        match backend.trim().to_ascii_lowercase().as_str() {
            "memory" => config.backend = BackendConfig::Memory,
            "aws" => {
                if config.backend == BackendConfig::Memory {
                    config.backend = BackendConfig::Aws {
                        region: None,
                        bucket: String::new(),
                        cognito_client_id: String::new(),
                    };
                }
            }
            other => {
                return Err(ConfigError::Invalid(format!(
                    "STACKWISE_BACKEND must be 'memory' or 'aws', got '{other}'"
                )));
            }
        }
    }

    if let BackendConfig::Aws {
        region,
        bucket,
        cognito_client_id,
    } = &mut config.backend
    {
        if let Some(value) = var("AWS_REGION") {
            *region = Some(value);
        }
        if let Some(value) = var("STACKWISE_BUCKET") {
            *bucket = value;
        }
        if let Some(value) = var("COGNITO_CLIENT_ID") {
            *cognito_client_id = value;
        }
        if bucket.is_empty() {
            return Err(ConfigError::Invalid(
                "the aws backend needs a bucket (STACKWISE_BUCKET)".to_string(),
            ));
        }
        if cognito_client_id.is_empty() {
            return Err(ConfigError::Invalid(
                "the aws backend needs a Cognito app client id (COGNITO_CLIENT_ID)".to_string(),
            ));
        }
    }

    if let Some(value) = var("STACKWISE_SIMILARITY_SCALE") {
        config.scoring.similarity_scale = value.parse().map_err(ConfigError::Invalid)?;
    }
    if let Some(value) = var("STACKWISE_SEED") {
        let seed = value
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid(format!("STACKWISE_SEED is not a u64: '{value}'")))?;
        config.scoring.seed = Some(seed);
    }

    Ok(config)
}
