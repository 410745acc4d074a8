//! Error types for the session facade.

use thiserror::Error;

use confab_core::AvatarError;
use confab_sync::SyncError;

/// Errors surfaced by [`crate::ChatSession`] operations.
#[derive(Debug, Error)]
pub enum ChatError {
    /// Avatar encoding failed before any remote call.
    #[error("avatar error: {0}")]
    Avatar(#[from] AvatarError),

    /// The synchronization layer failed.
    #[error(transparent)]
    Sync(#[from] SyncError),
}

/// Result type for session operations.
pub type Result<T> = std::result::Result<T, ChatError>;
