//! Error types for the sync layer.

use thiserror::Error;

/// Errors that can occur in the data-synchronization layer.
#[derive(Debug, Error)]
pub enum SyncError {
    /// The client was shut down: pollers are stopped and calls fail fast.
    #[error("sync client is closed")]
    Closed,

    /// Local validation rejected the input before any remote call.
    #[error("validation error: {0}")]
    Validation(#[from] confab_core::ValidationError),

    /// The remote call failed. The cache is left unchanged.
    #[error("service error: {0}")]
    Service(#[from] confab_service::ServiceError),
}

/// Result type for sync operations.
pub type Result<T> = std::result::Result<T, SyncError>;
