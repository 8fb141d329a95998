//! Configuration models for examgen.
//!
//! All I^R (resolvable ignorance) is parameterized here.
//! The user resolves these unknowns at runtime via config file.

use super::FrameworkId;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Top-level configuration for examgen.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Where module curriculum data comes from
    #[serde(default)]
    pub catalog: CatalogConfig,

    /// Generation settings
    #[serde(default)]
    pub generation: GenerationConfig,

    /// Output settings
    #[serde(default)]
    pub output: OutputConfig,
}

/// Module catalog configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Include the built-in demo module (`module-1`)
    #[serde(default = "default_true")]
    pub include_seed: bool,

    /// Catalog JSON files or directories of them.
    /// Values can contain ${ENV_VAR} for environment variable expansion
    #[serde(default)]
    pub paths: Vec<String>,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            include_seed: true,
            paths: Vec::new(),
        }
    }
}

/// Generation configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationConfig {
    /// Framework applied when a request does not name one
    #[serde(default = "default_framework")]
    pub framework: String,
}

fn default_framework() -> String {
    "es".to_string()
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            framework: default_framework(),
        }
    }
}

/// Output configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Pretty-print single JSON responses
    #[serde(default = "default_true")]
    pub pretty: bool,

    /// Stamp `createdAt` on generated exams before writing them
    #[serde(default)]
    pub stamp_created_at: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            pretty: true,
            stamp_created_at: false,
        }
    }
}

fn default_true() -> bool {
    true
}

impl Config {
    /// Load configuration from a TOML file.
    ///
    /// B_i(file exists) → Result
    /// B_i(file is valid TOML) → Result
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_owned(),
            source: e,
        })?;

        Self::from_toml_str(&content, path)
    }

    /// Load configuration from a TOML file, falling back to defaults when
    /// the file does not exist.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            debug!(path = %path.display(), "No config file, using defaults");
            return Ok(Self::default());
        }
        Self::from_file(path)
    }

    fn from_toml_str(content: &str, path: &Path) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse {
            path: path.to_owned(),
            source: e,
        })
    }

    /// Resolve the default framework id.
    pub fn framework(&self) -> Result<FrameworkId, ConfigError> {
        self.generation
            .framework
            .parse()
            .map_err(ConfigError::UnknownFramework)
    }

    /// Catalog paths with environment variables expanded.
    pub fn catalog_paths(&self) -> Vec<PathBuf> {
        self.catalog
            .paths
            .iter()
            .map(|p| PathBuf::from(expand_env_vars(p)))
            .collect()
    }

    /// Validate everything that can be checked without generating an exam.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.framework()?;
        for path in self.catalog_paths() {
            if !path.exists() {
                return Err(ConfigError::CatalogPathMissing(path));
            }
        }
        Ok(())
    }
}

/// Expand environment variables in a string.
///
/// Supports ${VAR_NAME} syntax.
/// If the variable is not set, the placeholder is left unchanged.
pub fn expand_env_vars(s: &str) -> String {
    let Ok(re) = regex::Regex::new(r"\$\{([^}]+)\}") else {
        return s.to_string();
    };

    let mut result = s.to_string();
    for cap in re.captures_iter(s) {
        let var_name = &cap[1];
        if let Ok(value) = std::env::var(var_name) {
            result = result.replace(&cap[0], &value);
        }
    }

    result
}

/// Configuration errors.
///
/// Epistemic origin:
/// - B_i falsified: File not found, parse error
/// - I^B materialized: Referenced values that do not exist
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("Unknown framework '{0}' (supported: es)")]
    UnknownFramework(String),

    #[error("Catalog path not found: {0}")]
    CatalogPathMissing(PathBuf),
}
