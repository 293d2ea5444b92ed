use thiserror::Error;

/// Result type for feature model operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while reading or writing GeoJSON documents
#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid GeoJSON document: {0}")]
    Json(#[from] serde_json::Error),
}
