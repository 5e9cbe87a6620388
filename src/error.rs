use std::io;

use serde::{Deserialize, Serialize};
use serde_json::Error as JsonError;
use thiserror::Error;
use url::ParseError as UrlParseError;

/// Crate-wide error type.
///
/// Missing nodes during ordinary navigation are not errors; they are `None`. The variants here
/// cover caller mistakes (`Precondition`), upstream data defects (`MalformedNumber`,
/// `NumberMismatch`, `InvalidDataset`) and the ambient failures of loading content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
pub enum ContentError {
    #[error("Invalid Command: {0}")]
    Command(String),
    #[error("Invalid content dataset: {0}")]
    InvalidDataset(String),
    #[error("File System error: {0}")]
    Io(String),
    #[error("Malformed problem number '{number}': {reason}")]
    MalformedNumber { number: String, reason: String },
    #[error("Item Not Found: {0}")]
    NotFound(String),
    #[error("Problem number '{number}' does not match its position in the tree ({expected})")]
    NumberMismatch { number: String, expected: String },
    #[error("Navigation precondition violated: {0}")]
    Precondition(String),
    #[error("(De)Serialization error: {0}")]
    Serialization(String),
}

impl ContentError {
    /// True for errors that indicate a defect in the content dataset rather than in the caller
    /// or the environment.
    pub fn is_data_error(&self) -> bool {
        matches!(
            self,
            ContentError::MalformedNumber { .. }
                | ContentError::NumberMismatch { .. }
                | ContentError::InvalidDataset(_)
        )
    }
}

impl From<toml::de::Error> for ContentError {
    fn from(src: toml::de::Error) -> ContentError {
        ContentError::Serialization(format!("Toml deserialization error: {src}"))
    }
}

impl From<toml::ser::Error> for ContentError {
    fn from(src: toml::ser::Error) -> ContentError {
        ContentError::Serialization(format!("Toml serialization error: {src}"))
    }
}

impl From<JsonError> for ContentError {
    fn from(src: JsonError) -> ContentError {
        ContentError::Serialization(format!("JSON (de)serialization error: {src}"))
    }
}

impl From<UrlParseError> for ContentError {
    fn from(src: UrlParseError) -> ContentError {
        ContentError::Command(format!("Invalid URL: {src}"))
    }
}

impl From<io::Error> for ContentError {
    fn from(x: io::Error) -> Self {
        match x.kind() {
            io::ErrorKind::NotFound => ContentError::NotFound(format!("{x}")),
            _ => ContentError::Io(format!("IOError: {}", x.kind())),
        }
    }
}
