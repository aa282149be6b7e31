//! Form builder configuration
//!
//! Loaded from a JSON file. Every section defaults, so an empty object (or no
//! file at all) gives the reference behavior.

use std::path::{Path, PathBuf};

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Top-level configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct Config {
    /// How new field ids are generated
    pub ids: IdConfig,

    /// Edit-mode behavior
    pub edit: EditConfig,

    /// Which key the validation rule table is consulted with
    pub validation: ValidationConfig,

    /// Form data housekeeping
    pub data: DataConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct IdConfig {
    pub strategy: IdStrategy,
}

/// Field id generation strategy
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum IdStrategy {
    /// `field-1`, `field-2`, ... strictly increasing within a session
    #[default]
    Sequential,
    /// Random v4 UUIDs
    Uuid,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct EditConfig {
    pub policy: EditPolicy,
}

/// When attribute edits reach the schema
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum EditPolicy {
    /// Every keystroke is written to the schema; confirm and cancel both just
    /// leave edit mode.
    #[default]
    Immediate,
    /// Edits go to a draft that confirm merges and cancel discards.
    Staged,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct ValidationConfig {
    pub key: ValidationKey,
}

/// What string the validation rule table is matched against
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ValidationKey {
    /// The field id, literally
    #[default]
    Identity,
    /// The field's type tag (`phone`, `date`, `file`, `checkbox`, ...)
    FieldType,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct DataConfig {
    /// Remove a deleted field's value and error entries along with it.
    /// Off by default: deleted fields still show up in submissions.
    pub purge_on_delete: bool,
}

/// Failure loading a configuration file
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config file {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl Config {
    /// Load configuration from a JSON file
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Load from `path` if it exists, otherwise return the defaults
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load_from_file(path)
        } else {
            tracing::debug!("No config at {}, using defaults", path.display());
            Ok(Self::default())
        }
    }
}
