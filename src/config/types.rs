use std::path::PathBuf;

use serde::{
    Deserialize,
    Serialize,
};
use thiserror::Error;

use crate::culture::Culture;
use crate::resolver::DEFAULT_MAX_PARENT_DEPTH;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Configuration error in '{field_path}': {message}")]
pub struct ValidationError {
    /// JSON path to the field (e.g., "excludePatterns[0]")
    pub field_path: String,
    pub message: String,
}

impl ValidationError {
    #[must_use]
    pub fn new(field_path: impl Into<String>, message: impl Into<String>) -> Self {
        Self { field_path: field_path.into(), message: message.into() }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration validation failed:\n{}", format_validation_errors(.0))]
    ValidationErrors(Vec<ValidationError>),

    #[error("Failed to read configuration file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse configuration file {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

fn format_validation_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .enumerate()
        .map(|(i, err)| format!("  {}. {} - {}", i + 1, err.field_path, err.message))
        .collect::<Vec<_>>()
        .join("\n")
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LoaderSettings {
    pub bundle_files: BundleFilesConfig,

    pub exclude_patterns: Vec<String>,

    /// Joins nested bundle keys (`{"menu": {"open": ..}}` -> `menu.open`).
    pub key_separator: String,

    /// Culture in effect at startup.
    /// If unset, it is read from `LC_ALL`, `LC_MESSAGES` or `LANG`.
    pub initial_culture: Option<String>,

    /// Maximum number of cultures visited when walking a parent chain.
    pub max_parent_depth: usize,

    pub loading: LoadingConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct LoadingConfig {
    /// Bundle files read concurrently.
    /// Default: 80% of CPU cores (minimum 1).
    pub max_concurrency: Option<usize>,
}

impl LoadingConfig {
    #[must_use]
    pub fn effective_concurrency(&self) -> usize {
        self.max_concurrency.unwrap_or_else(|| (num_cpus::get() * 4 / 5).max(1)).max(1)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BundleFilesConfig {
    pub file_pattern: String,
}

impl Default for BundleFilesConfig {
    fn default() -> Self {
        Self { file_pattern: "**/{locales,satellites}/**/*.json".to_string() }
    }
}

impl LoaderSettings {
    /// Culture in effect at startup, from settings or the environment.
    #[must_use]
    pub fn resolve_initial_culture(&self) -> Culture {
        self.initial_culture.as_deref().map_or_else(Culture::from_env, Culture::new)
    }

    /// # Errors
    /// - Required field is empty
    /// - Invalid glob pattern
    /// - Invalid separator
    /// - Zero depth or concurrency
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if self.key_separator.is_empty() {
            errors.push(ValidationError::new(
                "keySeparator",
                "The separator cannot be empty. Please specify a separator, for example: \".\" (dot)",
            ));
        }

        for (index, pattern) in self.exclude_patterns.iter().enumerate() {
            if let Err(e) = globset::Glob::new(pattern) {
                errors.push(ValidationError::new(
                    format!("excludePatterns[{index}]"),
                    format!("Invalid glob pattern '{pattern}': {e}"),
                ));
            }
        }

        if self.bundle_files.file_pattern.is_empty() {
            errors.push(ValidationError::new(
                "bundleFiles.filePattern",
                "The pattern cannot be empty. Example: \"**/{locales,satellites}/**/*.json\"",
            ));
        } else if let Err(e) = globset::Glob::new(&self.bundle_files.file_pattern) {
            errors.push(ValidationError::new(
                "bundleFiles.filePattern",
                format!("Invalid glob pattern '{}': {e}", self.bundle_files.file_pattern),
            ));
        }

        if let Some(culture) = &self.initial_culture
            && culture.trim().is_empty()
        {
            errors.push(ValidationError::new(
                "initialCulture",
                "The culture cannot be empty. Please specify a culture (e.g., \"fr-FR\"), or remove this field",
            ));
        }

        if self.max_parent_depth == 0 {
            errors.push(ValidationError::new("maxParentDepth", "The depth must be at least 1"));
        }

        if self.loading.max_concurrency == Some(0) {
            errors.push(ValidationError::new(
                "loading.maxConcurrency",
                "The concurrency must be at least 1, or remove this field to use the default",
            ));
        }

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }
}

impl Default for LoaderSettings {
    fn default() -> Self {
        Self {
            bundle_files: BundleFilesConfig::default(),
            exclude_patterns: vec!["node_modules/**".to_string(), "target/**".to_string()],
            key_separator: ".".to_string(),
            initial_culture: None,
            max_parent_depth: DEFAULT_MAX_PARENT_DEPTH,
            loading: LoadingConfig::default(),
        }
    }
}
