//! Error types for the editor

use folio_schema::SchemaViolation;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EditorError {
    #[error("Schema violation: {0}")]
    Schema(#[from] SchemaViolation),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid splice: {0}")]
    InvalidSplice(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Document not found: {0}")]
    NotFound(String),
}
