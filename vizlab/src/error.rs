//! Errors raised while loading datasets or drawing a lab.

use std::path::PathBuf;

use vizbind::SceneError;

#[derive(Debug, thiserror::Error)]
pub enum LabError {
    /// A dataset file could not be read.
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A dataset file is not valid JSON for its record type.
    #[error("Failed to parse {name}: {source}")]
    Json {
        name: String,
        #[source]
        source: serde_json::Error,
    },

    /// A record lacks a field the lab needs.
    #[error("Field '{field}' not found in {dataset}")]
    MissingField { dataset: String, field: String },

    /// A color name in the data is not a known CSS color.
    #[error("Unknown color '{0}'")]
    UnknownColor(String),

    #[error(transparent)]
    Scene(#[from] SceneError),

    #[error("Terminal error: {0}")]
    Terminal(#[from] std::io::Error),

    #[error("Failed to initialize logger: {0}")]
    Logger(#[from] log::SetLoggerError),
}

impl LabError {
    pub fn missing(dataset: impl Into<String>, field: impl Into<String>) -> Self {
        Self::MissingField {
            dataset: dataset.into(),
            field: field.into(),
        }
    }
}
