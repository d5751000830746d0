//! Top-level Vigil configuration with layered resolution.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{AuditConfig, DetectorConfig, RemediationConfig};
use crate::errors::ConfigError;

/// Top-level configuration aggregating all sub-configs.
///
/// Resolution order (highest priority first):
/// 1. Environment variables (`VIGIL_*`)
/// 2. Project config (`vigil.toml` in the scanned root)
/// 3. Compiled defaults
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct VigilConfig {
    pub detector: DetectorConfig,
    pub audit: AuditConfig,
    pub remediation: RemediationConfig,
}

impl VigilConfig {
    /// Load configuration with layered resolution.
    pub fn load(root: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        let project_config_path = root.join("vigil.toml");
        if project_config_path.exists() {
            let raw = std::fs::read_to_string(&project_config_path).map_err(|source| {
                ConfigError::ReadFailed {
                    path: project_config_path.display().to_string(),
                    source,
                }
            })?;
            config = toml::from_str(&raw).map_err(|e| ConfigError::ParseError {
                path: project_config_path.display().to_string(),
                message: e.to_string(),
            })?;
            debug!(path = %project_config_path.display(), "loaded project config");
        }

        Self::apply_env_overrides(&mut config);
        Self::validate(&config)?;
        Ok(config)
    }

    /// Load configuration from a TOML string (for testing).
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(toml_str).map_err(|e| ConfigError::ParseError {
            path: "<string>".to_string(),
            message: e.to_string(),
        })?;
        Self::validate(&config)?;
        Ok(config)
    }

    fn apply_env_overrides(config: &mut Self) {
        if let Some(value) = env_u64("VIGIL_AUDIT_DEADLINE_MS") {
            config.audit.deadline_ms = Some(value);
        }
        if let Some(value) = env_u64("VIGIL_MAX_ITERATIONS") {
            config.remediation.max_iterations = value as u32;
        }
        if let Ok(value) = std::env::var("VIGIL_ARCHIVE_ROOT") {
            if !value.is_empty() {
                config.remediation.archive_root = value.into();
            }
        }
        if let Ok(value) = std::env::var("VIGIL_LOG_PATH") {
            if !value.is_empty() {
                config.remediation.log_path = value.into();
            }
        }
    }

    /// Validate the resolved configuration values.
    pub fn validate(config: &Self) -> Result<(), ConfigError> {
        if config.remediation.max_iterations == 0 {
            return Err(ConfigError::ValidationFailed {
                field: "remediation.max_iterations".to_string(),
                message: "must be at least 1".to_string(),
            });
        }
        if let Some(deadline) = config.audit.deadline_ms {
            if deadline == 0 {
                return Err(ConfigError::ValidationFailed {
                    field: "audit.deadline_ms".to_string(),
                    message: "must be positive when set".to_string(),
                });
            }
        }
        if config.detector.file_extensions.is_empty() {
            return Err(ConfigError::ValidationFailed {
                field: "detector.file_extensions".to_string(),
                message: "at least one extension is required".to_string(),
            });
        }
        Ok(())
    }
}

fn env_u64(name: &str) -> Option<u64> {
    std::env::var(name).ok()?.parse().ok()
}
