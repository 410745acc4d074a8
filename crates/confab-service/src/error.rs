//! Error types for the service boundary.

use thiserror::Error;

use confab_core::{ConversationId, Principal};

/// Errors surfaced by remote service calls.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// The remote connection is not established.
    #[error("service unavailable: {0}")]
    Unavailable(String),

    /// A conversation cannot be started with oneself.
    #[error("cannot start a conversation with yourself ({0})")]
    SelfConversation(Principal),

    /// The conversation does not exist. Raised by writes only; reads on
    /// an unknown conversation yield empty pages instead.
    #[error("unknown conversation: {0}")]
    UnknownConversation(ConversationId),

    /// The caller lacks the required role or membership.
    #[error("not authorized: {0}")]
    NotAuthorized(String),

    /// The service rejected the input.
    #[error("rejected by service: {0}")]
    Rejected(String),

    /// Network or transport failure.
    #[error("transport error: {0}")]
    Transport(String),
}

/// Result type for service operations.
pub type Result<T> = std::result::Result<T, ServiceError>;
