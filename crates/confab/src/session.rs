//! The chat session: unified API over the service boundary and the
//! synchronization layer.

use std::sync::Arc;

use confab_core::{
    encode_avatar, ConversationId, ConversationView, Message, Principal, UserProfile, UserRole,
};
use confab_service::ChatService;
use confab_sync::{PollHandle, SyncClient, SyncConfig};

use crate::error::Result;

/// A logged-in messaging session.
///
/// Constructing a session implies the remote client is ready; closing it
/// corresponds to logout. All reads and writes go through the
/// synchronization layer, so its staleness and invalidation rules apply
/// uniformly: a value read twice through this session never disagrees
/// with itself for longer than the configured staleness window.
pub struct ChatSession<S: ChatService> {
    sync: SyncClient<S>,
}

impl<S: ChatService + 'static> ChatSession<S> {
    /// Create a session with default staleness configuration.
    pub fn new(service: S) -> Self {
        Self {
            sync: SyncClient::new(service),
        }
    }

    /// Create a session with explicit configuration.
    pub fn with_config(service: S, config: SyncConfig) -> Self {
        Self {
            sync: SyncClient::with_config(service, config),
        }
    }

    /// The authenticated caller.
    pub fn principal(&self) -> Principal {
        self.sync.principal()
    }

    /// The underlying synchronization client.
    pub fn sync(&self) -> &SyncClient<S> {
        &self.sync
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Profile
    // ─────────────────────────────────────────────────────────────────────────

    /// The caller's profile. `None` means profile setup has not run yet.
    pub async fn own_profile(&self) -> Result<Option<UserProfile>> {
        Ok(self.sync.own_profile().await?)
    }

    /// Save the caller's profile.
    pub async fn save_profile(&self, profile: UserProfile) -> Result<()> {
        Ok(self.sync.save_own_profile(profile).await?)
    }

    /// Encode `image` as an avatar data URL and save the profile.
    ///
    /// Non-image or oversized input fails before any remote call, so a
    /// bad avatar never clobbers an existing profile.
    pub async fn save_profile_with_avatar(&self, name: &str, image: &[u8]) -> Result<()> {
        let avatar = encode_avatar(image)?;
        let profile = UserProfile::new(name).with_avatar(avatar);
        Ok(self.sync.save_own_profile(profile).await?)
    }

    /// Another user's profile.
    pub async fn profile_of(&self, user: &Principal) -> Result<Option<UserProfile>> {
        Ok(self.sync.profile_of(user).await?)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Conversations
    // ─────────────────────────────────────────────────────────────────────────

    /// The caller's conversations, most recent message first.
    pub async fn conversations(&self) -> Result<Arc<Vec<ConversationView>>> {
        Ok(self.sync.list_conversations().await?)
    }

    /// Start a conversation with `to`, returning its id.
    pub async fn start_conversation(&self, to: &Principal) -> Result<ConversationId> {
        Ok(self.sync.start_conversation(to).await?)
    }

    /// Watch the conversations list on the configured poll cadence.
    pub fn watch_conversations(&self) -> PollHandle<Vec<ConversationView>> {
        self.sync.watch_conversations()
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Messages
    // ─────────────────────────────────────────────────────────────────────────

    /// One page of a conversation's messages, oldest first.
    pub async fn messages(
        &self,
        conversation: &ConversationId,
        page: u64,
    ) -> Result<Arc<Vec<Message>>> {
        Ok(self.sync.list_messages(conversation, page).await?)
    }

    /// Send a message to a conversation.
    pub async fn send_message(&self, conversation: &ConversationId, content: &str) -> Result<()> {
        Ok(self.sync.send_message(conversation, content).await?)
    }

    /// Watch one message page on the configured poll cadence.
    pub fn watch_messages(
        &self,
        conversation: &ConversationId,
        page: u64,
    ) -> PollHandle<Vec<Message>> {
        self.sync.watch_messages(conversation, page)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Roles
    // ─────────────────────────────────────────────────────────────────────────

    /// The caller's role.
    pub async fn own_role(&self) -> Result<UserRole> {
        Ok(self.sync.own_role().await?)
    }

    /// Whether the caller holds the admin role.
    pub async fn is_admin(&self) -> Result<bool> {
        Ok(self.own_role().await?.is_admin())
    }

    /// Assign a role to a user. The service enforces that only admins
    /// may do this.
    pub async fn assign_role(&self, user: &Principal, role: UserRole) -> Result<()> {
        Ok(self.sync.assign_role(user, role).await?)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Lifecycle
    // ─────────────────────────────────────────────────────────────────────────

    /// Log out: stop pollers and disable further calls. Idempotent.
    pub fn close(&self) {
        self.sync.close();
    }

    /// Whether [`close`](Self::close) has been called.
    pub fn is_closed(&self) -> bool {
        self.sync.is_closed()
    }
}
