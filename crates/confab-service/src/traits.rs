//! The ChatService trait: abstract interface to the remote messaging
//! service.
//!
//! This trait allows the synchronization layer to be service-agnostic.
//! Implementations include the in-memory reference service (tests, local
//! development) and network clients.

use async_trait::async_trait;

use confab_core::{
    ConversationId, ConversationView, Message, Principal, UserProfile, UserRole,
};

use crate::error::Result;

/// The ChatService trait: async interface to the remote procedures.
///
/// Every handle is bound to one authenticated caller; the service derives
/// the caller's principal from the handle itself, so no operation takes
/// the caller explicitly.
///
/// # Design Notes
///
/// - **Linearizable per call**: each call observes a consistent remote
///   state, but there are no transactions across calls.
/// - **Server-assigned ordering**: conversation lists arrive sorted by
///   most recent message; message ids and timestamps are assigned at
///   append time. Callers must not reorder either.
/// - **Absent is not an error**: a missing profile and an unknown
///   conversation's messages both come back as empty values.
#[async_trait]
pub trait ChatService: Send + Sync {
    /// The authenticated caller this handle acts as.
    fn principal(&self) -> Principal;

    /// Fetch the caller's own profile. `None` means not created yet.
    async fn own_profile(&self) -> Result<Option<UserProfile>>;

    /// Fetch another user's profile.
    async fn profile_of(&self, user: &Principal) -> Result<Option<UserProfile>>;

    /// Create or replace the caller's profile.
    async fn save_own_profile(&self, profile: UserProfile) -> Result<()>;

    /// List the caller's conversations, most recent message first.
    ///
    /// Conversations with no messages sort last; equal sort keys break
    /// ties by conversation id ascending.
    async fn list_conversations(&self) -> Result<Vec<ConversationView>>;

    /// Start a conversation with another user, returning its id.
    ///
    /// Fails with [`crate::ServiceError::SelfConversation`] when `to`
    /// equals the caller. Starting an already-existing pair returns the
    /// existing id.
    async fn start_conversation(&self, to: &Principal) -> Result<ConversationId>;

    /// Fetch one page of a conversation's messages, oldest first.
    ///
    /// An unknown conversation yields an empty page, never an error.
    async fn list_messages(
        &self,
        conversation: &ConversationId,
        page: u64,
        page_size: u64,
    ) -> Result<Vec<Message>>;

    /// Append a message. The service assigns its id and timestamp.
    async fn send_message(&self, conversation: &ConversationId, content: &str) -> Result<()>;

    /// The caller's role.
    async fn own_role(&self) -> Result<UserRole>;

    /// Assign a role to a user. Requires the admin role.
    async fn assign_role(&self, user: &Principal, role: UserRole) -> Result<()>;
}
