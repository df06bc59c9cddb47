//! Error types, one enum per concern.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RosterError {
    #[error("Please upload a valid CSV file (got {name})")]
    InvalidFileType { name: String },
    #[error("Failed to read roster: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse roster: {0}")]
    Csv(#[from] csv::Error),
    #[error("Roster has no header row")]
    Empty,
}

#[derive(Debug, Error)]
pub enum ImageError {
    #[error("Failed to open image {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to decode image {path}: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
}

#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("No roster uploaded")]
    NoRoster,
    #[error("Roster has no recipients with an email address")]
    NoRecipients,
    #[error("Mark the name box on the certificate first")]
    NoNameBox,
    #[error("A batch is already being sent")]
    AlreadySending,
    #[error("Delivery to {recipient} failed: {reason}")]
    Delivery { recipient: String, reason: String },
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Could not determine config directory")]
    NoConfigDir,
    #[error("Failed to access config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
}

#[derive(Debug, Error)]
pub enum LayoutError {
    #[error("No image loaded")]
    NoImage,
    #[error("No name box drawn")]
    NoNameBox,
    #[error("Failed to serialize layout: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("Failed to write layout: {0}")]
    Io(#[from] std::io::Error),
}
