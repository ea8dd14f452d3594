use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::util::DocumentFormat;

/// File names probed, in order, when no config path is given.
pub const CONFIG_FILE_NAMES: [&str; 3] = ["depweight.json", "depweight.yaml", "depweight.yml"];

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("failed to parse config YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("unsupported config format (expected .json, .yaml or .yml): {0}")]
    UnsupportedFormat(PathBuf),
}

/// Settings shared by all commands. Every field has a default, so an empty
/// file (or no file) is a valid configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyzerConfig {
    pub nm: NmConfig,
    pub graph: GraphConfig,
    pub weight: WeightConfig,
}

/// How to invoke the symbol dump tool. The binary path is appended to `args`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NmConfig {
    pub program: String,
    pub args: Vec<String>,
}

impl Default for NmConfig {
    fn default() -> Self {
        Self {
            program: "go".to_string(),
            args: vec!["tool".to_string(), "nm".to_string(), "-size".to_string()],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphConfig {
    /// Keep standard library packages in graph output.
    pub include_std: bool,
    /// Node label template, see [`crate::render::Label`].
    pub label_format: String,
    /// Newline-separated package list replacing the bundled standard set.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub std_list: Option<PathBuf>,
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            include_std: false,
            label_format: crate::render::DEFAULT_LABEL_FORMAT.to_string(),
            std_list: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WeightConfig {
    /// Maximum number of packages listed by `weight`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<usize>,
}

impl AnalyzerConfig {
    /// Load a config file; the format follows the extension.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let format = DocumentFormat::from_path(path)
            .ok_or_else(|| ConfigError::UnsupportedFormat(path.to_path_buf()))?;
        let body = std::fs::read_to_string(path)
            .map_err(|source| ConfigError::Io { path: path.to_path_buf(), source })?;
        match format {
            DocumentFormat::Json => Self::from_json_str(&body),
            DocumentFormat::Yaml => Self::from_yaml_str(&body),
        }
    }

    pub fn from_json_str(body: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(body)?)
    }

    pub fn from_yaml_str(body: &str) -> Result<Self, ConfigError> {
        // An empty YAML document deserializes as null rather than a mapping.
        if body.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(body)?)
    }

    /// Look for one of [`CONFIG_FILE_NAMES`] in `dir`.
    pub fn discover(dir: &Path) -> Result<Option<(PathBuf, Self)>, ConfigError> {
        for name in CONFIG_FILE_NAMES {
            let candidate = dir.join(name);
            if candidate.is_file() {
                let config = Self::load(&candidate)?;
                return Ok(Some((candidate, config)));
            }
        }
        Ok(None)
    }
}
