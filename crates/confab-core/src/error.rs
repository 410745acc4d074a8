//! Error types for Confab core validation and avatar encoding.

use thiserror::Error;

/// Validation errors for user-supplied values.
///
/// These are raised client-side, before any remote call; the service is
/// expected to enforce the same rules on its end.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("malformed principal: {0}")]
    MalformedPrincipal(String),

    #[error("profile name must not be empty")]
    EmptyName,

    #[error("profile name too long: {len} chars (max {max})")]
    NameTooLong { len: usize, max: usize },

    #[error("avatar must be a data:image/... URL")]
    BadAvatarEncoding,

    #[error("message content must not be empty")]
    EmptyMessage,

    #[error("message content too long: {len} bytes (max {max})")]
    MessageTooLong { len: usize, max: usize },

    #[error("page size {got} exceeds maximum {max}")]
    PageSizeTooLarge { got: u64, max: u64 },
}

/// Errors from converting raw image bytes into an avatar data URL.
#[derive(Debug, Error)]
pub enum AvatarError {
    #[error("avatar image is empty")]
    Empty,

    #[error("avatar input is not a recognized image format")]
    NotAnImage,

    #[error("avatar image is {size} bytes (max {max})")]
    TooLarge { size: usize, max: usize },
}
