use thiserror::Error;

/// Failures raised by repositories, downloads and rendering.
#[derive(Error, Debug)]
pub enum CatalogError {
    /// Query or connection failure.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Remote image could not be downloaded.
    #[error("Image fetch failed: {0}")]
    Fetch(String),

    /// Request rejected before any work was done.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// PDF document could not be serialized.
    #[error("PDF rendering failed: {0}")]
    Render(String),

    /// Anything else, such as a panicked worker task.
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result alias over [`CatalogError`].
pub type Result<T> = std::result::Result<T, CatalogError>;
