use thiserror::Error;

/// Errors produced by the catalog layer.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The identifier is not a 24-character hexadecimal document id.
    #[error("invalid image id format: {0:?}")]
    InvalidId(String),

    /// No image exists with the requested id.
    #[error("image not found: {0}")]
    NotFound(String),

    /// The backing store failed.
    #[error("storage error: {0}")]
    Storage(String),

    /// A seed file could not be read.
    #[error("failed to read seed file: {0}")]
    SeedRead(#[from] std::io::Error),

    /// A seed file did not contain a JSON array of image records.
    #[error("failed to parse seed file: {0}")]
    SeedParse(#[from] serde_json::Error),
}
