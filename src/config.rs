//! Codec configuration.
//!
//! Configuration can be loaded from:
//! 1. TOML file (`.objmeta.toml`)
//! 2. Environment variables (`OBJMETA_PREFIX`, `OBJMETA_COMMIT`)
//!
//! Environment variables override TOML configuration.
//!
//! # Example TOML Configuration
//!
//! ```toml
//! [metadata]
//! prefix = "example.com"
//! commit = "atomic"
//! ```

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Default configuration file, relative to the working directory.
pub const CONFIG_FILE: &str = ".objmeta.toml";

/// How decode treats the record when a field fails.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Commit {
    /// Fields are written as they decode. On error, fields handled before
    /// the failing one keep their new values.
    #[default]
    InPlace,
    /// Every tagged field is looked up and parsed before any is written. On
    /// error the record is untouched.
    Atomic,
}

impl fmt::Display for Commit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InPlace => write!(f, "in-place"),
            Self::Atomic => write!(f, "atomic"),
        }
    }
}

impl FromStr for Commit {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "in-place" => Ok(Self::InPlace),
            "atomic" => Ok(Self::Atomic),
            other => Err(ConfigError::InvalidValue {
                setting: "commit",
                value: other.to_string(),
            }),
        }
    }
}

/// Settings for a [`Codec`](crate::Codec).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CodecConfig {
    /// Namespace joined to every tag name as `{prefix}/{tag}`.
    pub prefix: String,

    /// Decode commit strategy.
    pub commit: Commit,
}

impl CodecConfig {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            commit: Commit::default(),
        }
    }

    /// Load configuration from `.objmeta.toml` and the environment.
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables
    /// 2. TOML configuration file
    /// 3. Default values
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = if let Ok(contents) = std::fs::read_to_string(CONFIG_FILE) {
            Self::from_toml(&contents)?
        } else {
            Self::default()
        };

        config.apply_env_overrides()?;

        Ok(config)
    }

    /// Load configuration from a specific file path.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path.as_ref()).map_err(|e| ConfigError::Io {
            path: path.as_ref().display().to_string(),
            error: e.to_string(),
        })?;
        let mut config = Self::from_toml(&contents)?;
        config.apply_env_overrides()?;
        Ok(config)
    }

    /// Parse configuration from the `[metadata]` table of TOML content.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        #[derive(Deserialize)]
        struct FullConfig {
            #[serde(default)]
            metadata: CodecConfig,
        }

        let full: FullConfig =
            toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))?;

        Ok(full.metadata)
    }

    fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        self.apply_overrides(|name| std::env::var(name).ok())
    }

    fn apply_overrides<F>(&mut self, var: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(prefix) = var("OBJMETA_PREFIX") {
            self.prefix = prefix;
        }

        if let Some(commit) = var("OBJMETA_COMMIT") {
            self.commit = commit.parse()?;
        }

        Ok(())
    }
}
