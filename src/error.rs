use std::path::PathBuf;

use thiserror::Error;

/// Failure to read a source file into rows. Fatal to the load, never to a
/// single record.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("parsing JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("parsing delimited text: {0}")]
    Csv(#[from] csv::Error),

    #[error("expected a top-level JSON array of objects")]
    NotAnArray,

    #[error("unsupported file extension: .{0}")]
    UnsupportedExtension(String),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("reading config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("parsing config {path}: {source}")]
    Toml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}
