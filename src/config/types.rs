use std::path::PathBuf;

use serde::{
    Deserialize,
    Serialize,
};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Configuration error in '{field_path}': {message}")]
pub struct ValidationError {
    /// JSON path to the field (e.g., "views[0]")
    pub field_path: String,
    /// Human readable description of the problem
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
    /// One or more settings failed validation
    #[error("Configuration validation failed:\n{}", format_validation_errors(.0))]
    ValidationErrors(Vec<ValidationError>),

    /// The settings file could not be read
    #[error("Failed to load configuration file: {0}")]
    IoError(#[from] std::io::Error),

    /// The settings file is not valid JSON for `RendererSettings`
    #[error("Failed to parse configuration: {0}")]
    ParseError(#[from] serde_json::Error),
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
pub struct RendererSettings {
    /// Template search directories, searched in order.
    pub views: Vec<PathBuf>,

    /// Locale sources (files or directories), merged in order.
    /// Empty means no locale is loaded.
    pub locales: Vec<PathBuf>,

    /// Try every candidate key and never fail on a missing translation.
    pub realistic: bool,

    /// Separator between key path segments, e.g. `"."`
    pub key_separator: String,
}

impl Default for RendererSettings {
    fn default() -> Self {
        Self {
            views: vec![PathBuf::from("templates")],
            locales: Vec::new(),
            realistic: false,
            key_separator: ".".to_string(),
        }
    }
}

impl RendererSettings {
    /// # Errors
    /// - No template directory
    /// - Empty path
    /// - Empty separator
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if self.views.is_empty() {
            errors.push(ValidationError::new(
                "views",
                "At least one template directory is required. Example: [\"templates\"]",
            ));
        }

        for (index, view) in self.views.iter().enumerate() {
            if view.as_os_str().is_empty() {
                errors.push(ValidationError::new(
                    format!("views[{index}]"),
                    "The path cannot be empty",
                ));
            }
        }

        for (index, locale) in self.locales.iter().enumerate() {
            if locale.as_os_str().is_empty() {
                errors.push(ValidationError::new(
                    format!("locales[{index}]"),
                    "The path cannot be empty. Point it at a .json/.yml file or a directory",
                ));
            }
        }

        if self.key_separator.is_empty() {
            errors.push(ValidationError::new(
                "keySeparator",
                "The separator cannot be empty. Please specify a separator, for example: \".\" (dot)",
            ));
        }

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }
}
