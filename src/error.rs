use miette::Diagnostic;
use thiserror::Error;

#[derive(Debug, Error, Diagnostic)]
pub enum RainfallError {
    #[error("invalid date: {0}")]
    InvalidDate(String),

    #[error("metadata request failed: {0}")]
    MetadataHttp(String),

    #[error("metadata endpoint returned status {status}: {message}")]
    MetadataStatus { status: u16, message: String },

    #[error("malformed metadata response: {0}")]
    MalformedMetadata(String),

    #[error("object store request failed: {0}")]
    StoreHttp(String),

    #[error("object store returned status {status}: {message}")]
    StoreStatus { status: u16, message: String },

    #[error("filesystem error: {0}")]
    Filesystem(String),
}
