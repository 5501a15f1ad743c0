use std::{io, path::PathBuf};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, InfographicError>;

#[derive(Debug, Error)]
pub enum InfographicError {
    #[error("Failed to open {path}")]
    OpenInput {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("CSV parse error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Invalid CSV header in {table}: missing column '{column}'")]
    MissingColumn { table: &'static str, column: String },

    /// `line` is the 1-based file line where the record starts
    #[error("Invalid valuation at line {line}: {value:?}")]
    ValuationParse { line: usize, value: String },

    #[error("Failed to write image {path}")]
    WriteImage {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("GeoJSON error: {0}")]
    GeoJson(#[from] geojson::Error),

    #[error("Font error: {0}")]
    Font(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<toml::de::Error> for InfographicError {
    fn from(err: toml::de::Error) -> Self {
        InfographicError::Config(format!("TOML parse error: {}", err))
    }
}
