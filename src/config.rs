//! Layered configuration: built-in globals, overlaid by an optional override
//! (JSON file and/or environment), resolved into an [`EffectiveConfig`].

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

use crate::error::{error_message_or, DEFAULT_ERROR_MESSAGE};
use crate::gate::DENIED_NOTICE;
use crate::identity::{Permission, PermissionSet, Role, RoleCatalog};

pub const ENV_CONFIG_PATH: &str = "BACKOFFICE_CONFIG";
pub const ENV_SESSION_TTL: &str = "BACKOFFICE_SESSION_TTL_SECS";
/// Upper bound for session lifetimes (30 days).
pub const MAX_SESSION_TTL_SECS: u64 = 30 * 24 * 60 * 60;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read { path: String, #[source] source: std::io::Error },
    #[error("invalid config file {path}: {source}")]
    Parse { path: String, #[source] source: serde_json::Error },
    #[error("invalid value for {key}: '{value}'")]
    InvalidValue { key: String, value: String },
}

/// Built-in settings applied unless overridden.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GlobalConfig {
    pub denied_notice: String,
    pub default_error_message: String,
    pub session_ttl_secs: u64,
    /// Per-role permission lists replacing the dashboard defaults. Roles not
    /// listed keep their defaults.
    pub role_permissions: BTreeMap<Role, Vec<String>>,
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            denied_notice: DENIED_NOTICE.to_string(),
            default_error_message: DEFAULT_ERROR_MESSAGE.to_string(),
            session_ttl_secs: 60 * 60,
            role_permissions: BTreeMap::new(),
        }
    }
}

/// Deployment overrides. Unspecified values inherit from Global.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ConfigOverride {
    pub denied_notice: Option<String>,
    pub default_error_message: Option<String>,
    pub session_ttl_secs: Option<u64>,
    pub role_permissions: Option<BTreeMap<Role, Vec<String>>>,
}

/// Fully resolved config used at runtime.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EffectiveConfig {
    pub denied_notice: String,
    pub default_error_message: String,
    pub session_ttl_secs: u64,
    pub role_permissions: BTreeMap<Role, Vec<String>>,
}

impl Default for EffectiveConfig {
    fn default() -> Self {
        Self::from_layers(&GlobalConfig::default(), None)
    }
}

pub fn load_override(path: &Path) -> Result<ConfigOverride, ConfigError> {
    let display = path.display().to_string();
    let text = std::fs::read_to_string(path)
        .map_err(|source| ConfigError::Read { path: display.clone(), source })?;
    let ov: ConfigOverride =
        serde_json::from_str(&text).map_err(|source| ConfigError::Parse { path: display, source })?;
    if let Some(secs) = ov.session_ttl_secs {
        check_ttl("session_ttl_secs", secs)?;
    }
    Ok(ov)
}

fn check_ttl(key: &str, secs: u64) -> Result<u64, ConfigError> {
    if secs > MAX_SESSION_TTL_SECS {
        return Err(ConfigError::InvalidValue { key: key.to_string(), value: secs.to_string() });
    }
    Ok(secs)
}

fn parse_ttl(raw: &str) -> Result<u64, ConfigError> {
    let secs = raw
        .trim()
        .parse::<u64>()
        .map_err(|_| ConfigError::InvalidValue { key: ENV_SESSION_TTL.to_string(), value: raw.to_string() })?;
    check_ttl(ENV_SESSION_TTL, secs)
}

impl EffectiveConfig {
    /// Build an effective config from Global + optional override.
    pub fn from_layers(global: &GlobalConfig, ov: Option<&ConfigOverride>) -> Self {
        let empty = ConfigOverride::default();
        let ov = ov.unwrap_or(&empty);

        let denied_notice = ov.denied_notice.clone().unwrap_or_else(|| global.denied_notice.clone());
        let default_error_message = ov
            .default_error_message
            .clone()
            .unwrap_or_else(|| global.default_error_message.clone());
        let session_ttl_secs = ov.session_ttl_secs.unwrap_or(global.session_ttl_secs);

        // Role lists merge per role: override entries replace global ones
        let mut role_permissions = global.role_permissions.clone();
        if let Some(extra) = &ov.role_permissions {
            for (role, perms) in extra {
                role_permissions.insert(*role, perms.clone());
            }
        }

        Self { denied_notice, default_error_message, session_ttl_secs, role_permissions }
    }

    /// Resolve from `BACKOFFICE_CONFIG` (JSON override file) then
    /// `BACKOFFICE_SESSION_TTL_SECS`, which wins over the file.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut ov = match std::env::var(ENV_CONFIG_PATH) {
            Ok(path) if !path.trim().is_empty() => load_override(Path::new(path.trim()))?,
            _ => ConfigOverride::default(),
        };
        if let Ok(raw) = std::env::var(ENV_SESSION_TTL) {
            ov.session_ttl_secs = Some(parse_ttl(&raw)?);
        }
        Ok(Self::from_layers(&GlobalConfig::default(), Some(&ov)))
    }

    /// User-facing message for a REST error payload, falling back to the
    /// configured default message.
    pub fn error_message(&self, body: &serde_json::Value) -> String {
        error_message_or(body, &self.default_error_message)
    }

    /// Dashboard catalog with configured roles replaced. Blank identifiers
    /// are skipped with a warning.
    pub fn catalog(&self) -> RoleCatalog {
        let mut catalog = RoleCatalog::dashboard_default();
        for (role, names) in &self.role_permissions {
            let mut set = PermissionSet::new();
            for name in names {
                match Permission::parse(name) {
                    Ok(p) => {
                        set.insert(p);
                    }
                    Err(e) => warn!(target: "backoffice::config", role = %role, "skipping permission: {}", e),
                }
            }
            catalog.set_role(*role, set);
        }
        catalog
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
