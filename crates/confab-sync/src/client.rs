//! The synchronization client: cached reads and invalidating mutations.
//!
//! Each read serves a fresh cached snapshot when one exists and fetches
//! through the service otherwise; each mutation calls the remote
//! procedure and invalidates exactly the reads it affects. Failures
//! surface to the caller and leave the cache untouched; nothing is
//! retried.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;

use confab_core::{
    validate_message_content, validate_profile, ConversationId, ConversationView, Message,
    Principal, UserProfile, UserRole,
};
use confab_service::{ChatService, ServiceError};

use crate::cache::{PageKey, QueryCache, Scope};
use crate::error::{Result, SyncError};

/// Staleness windows and polling cadence.
///
/// The poll interval doubles as the staleness window of the matching
/// read: a snapshot older than the interval is refetched on the next
/// read, and a poller refetches on that same cadence.
#[derive(Debug, Clone)]
pub struct SyncConfig {
    /// Poll interval and staleness window for the conversations list.
    pub conversations_interval: Duration,
    /// Poll interval and staleness window for message pages.
    pub messages_interval: Duration,
    /// Rows per message page.
    pub page_size: u64,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            conversations_interval: Duration::from_secs(5),
            messages_interval: Duration::from_secs(3),
            page_size: 50,
        }
    }
}

/// The data-synchronization client.
///
/// Cheap to clone; all clones share one cache and one shutdown signal.
pub struct SyncClient<S> {
    inner: Arc<ClientInner<S>>,
}

impl<S> Clone for SyncClient<S> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

pub(crate) struct ClientInner<S> {
    pub(crate) service: Arc<S>,
    pub(crate) cache: QueryCache,
    pub(crate) config: SyncConfig,
    /// Closed signal: pollers watch it, reads and mutations check it.
    pub(crate) shutdown: watch::Sender<bool>,
}

impl<S: ChatService> SyncClient<S> {
    /// Wrap a ready service with default configuration.
    pub fn new(service: S) -> Self {
        Self::with_config(service, SyncConfig::default())
    }

    /// Wrap a ready service with explicit configuration.
    pub fn with_config(service: S, config: SyncConfig) -> Self {
        let (shutdown, _) = watch::channel(false);
        Self {
            inner: Arc::new(ClientInner {
                service: Arc::new(service),
                cache: QueryCache::new(),
                config,
                shutdown,
            }),
        }
    }

    /// The authenticated caller.
    pub fn principal(&self) -> Principal {
        self.inner.service.principal()
    }

    /// The active configuration.
    pub fn config(&self) -> &SyncConfig {
        &self.inner.config
    }

    /// The underlying service handle.
    pub fn service(&self) -> &S {
        &self.inner.service
    }

    /// Whether [`close`](Self::close) has been called.
    pub fn is_closed(&self) -> bool {
        *self.inner.shutdown.borrow()
    }

    /// Shut the client down. Pollers stop, list reads return the designed
    /// empty default, everything else fails fast with
    /// [`SyncError::Closed`]. Idempotent.
    pub fn close(&self) {
        self.inner.shutdown.send_replace(true);
        tracing::debug!("sync client closed");
    }

    pub(crate) fn shutdown_rx(&self) -> watch::Receiver<bool> {
        self.inner.shutdown.subscribe()
    }

    fn ensure_open(&self) -> Result<()> {
        if self.is_closed() {
            Err(SyncError::Closed)
        } else {
            Ok(())
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Cached Reads
    // ─────────────────────────────────────────────────────────────────────────

    /// The caller's own profile. `None` means no profile yet, which is
    /// not an error.
    ///
    /// Cached until invalidated by [`save_own_profile`](Self::save_own_profile);
    /// never refreshed on a timer, never retried on failure.
    pub async fn own_profile(&self) -> Result<Option<UserProfile>> {
        self.ensure_open()?;
        if let Some(snapshot) = self.inner.cache.profile_fresh() {
            return Ok((*snapshot).clone());
        }
        let snapshot = self.fetch_profile().await?;
        Ok((*snapshot).clone())
    }

    /// The caller's conversations, most recent message first.
    ///
    /// Cached within the conversations staleness window. Once the client
    /// is closed this returns the designed empty snapshot.
    pub async fn list_conversations(&self) -> Result<Arc<Vec<ConversationView>>> {
        if self.is_closed() {
            return Ok(Arc::new(Vec::new()));
        }
        let window = self.inner.config.conversations_interval;
        if let Some(snapshot) = self.inner.cache.conversations_fresh(window) {
            return Ok(snapshot);
        }
        self.fetch_conversations().await
    }

    /// One page of a conversation's messages, oldest first.
    ///
    /// Cached per `(conversation, page)` within the messages staleness
    /// window. Once the client is closed this returns the designed empty
    /// snapshot.
    pub async fn list_messages(
        &self,
        conversation: &ConversationId,
        page: u64,
    ) -> Result<Arc<Vec<Message>>> {
        if self.is_closed() {
            return Ok(Arc::new(Vec::new()));
        }
        let key = PageKey {
            conversation: conversation.clone(),
            page,
        };
        let window = self.inner.config.messages_interval;
        if let Some(snapshot) = self.inner.cache.messages_fresh(&key, window) {
            return Ok(snapshot);
        }
        self.fetch_messages(&key).await
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Mutations
    // ─────────────────────────────────────────────────────────────────────────

    /// Save the caller's profile, then invalidate the profile read.
    ///
    /// No optimistic update: the cache changes only after the remote
    /// call resolves. Concurrent saves are not coalesced; the service
    /// serializes them.
    pub async fn save_own_profile(&self, profile: UserProfile) -> Result<()> {
        self.ensure_open()?;
        validate_profile(&profile)?;
        self.inner.service.save_own_profile(profile).await?;
        self.inner.cache.invalidate(&Scope::OwnProfile);
        Ok(())
    }

    /// Start a conversation with `to`, invalidating the conversations
    /// list on success.
    ///
    /// Fails before the remote call when `to` is the caller.
    pub async fn start_conversation(&self, to: &Principal) -> Result<ConversationId> {
        self.ensure_open()?;
        if *to == self.principal() {
            return Err(ServiceError::SelfConversation(to.clone()).into());
        }
        let id = self.inner.service.start_conversation(to).await?;
        self.inner.cache.invalidate(&Scope::Conversations);
        tracing::debug!(conversation = %id, "conversation started");
        Ok(id)
    }

    /// Append a message, invalidating every cached page of that
    /// conversation plus the conversations list (a send moves the
    /// conversation in the most-recent-message ordering).
    pub async fn send_message(&self, conversation: &ConversationId, content: &str) -> Result<()> {
        self.ensure_open()?;
        validate_message_content(content)?;
        self.inner.service.send_message(conversation, content).await?;
        self.inner
            .cache
            .invalidate(&Scope::Messages(conversation.clone()));
        self.inner.cache.invalidate(&Scope::Conversations);
        Ok(())
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Uncached Pass-throughs
    // ─────────────────────────────────────────────────────────────────────────

    /// Another user's profile. Uncached; peers are read rarely.
    pub async fn profile_of(&self, user: &Principal) -> Result<Option<UserProfile>> {
        self.ensure_open()?;
        Ok(self.inner.service.profile_of(user).await?)
    }

    /// The caller's role. Uncached.
    pub async fn own_role(&self) -> Result<UserRole> {
        self.ensure_open()?;
        Ok(self.inner.service.own_role().await?)
    }

    /// Assign a role to a user. Authorization is enforced by the service.
    pub async fn assign_role(&self, user: &Principal, role: UserRole) -> Result<()> {
        self.ensure_open()?;
        Ok(self.inner.service.assign_role(user, role).await?)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Fetch Paths (shared by reads and pollers)
    // ─────────────────────────────────────────────────────────────────────────

    pub(crate) async fn fetch_profile(&self) -> Result<Arc<Option<UserProfile>>> {
        let generation = self.inner.cache.profile_begin();
        let fetched = self.inner.service.own_profile().await?;
        let snapshot = Arc::new(fetched);
        if !self.inner.cache.profile_settle(generation, Arc::clone(&snapshot)) {
            tracing::debug!("own-profile fetch superseded by invalidation");
        }
        Ok(snapshot)
    }

    pub(crate) async fn fetch_conversations(&self) -> Result<Arc<Vec<ConversationView>>> {
        let generation = self.inner.cache.conversations_begin();
        let fetched = self.inner.service.list_conversations().await?;
        let snapshot = Arc::new(fetched);
        if !self
            .inner
            .cache
            .conversations_settle(generation, Arc::clone(&snapshot))
        {
            tracing::debug!("conversations fetch superseded by invalidation");
        }
        Ok(snapshot)
    }

    pub(crate) async fn fetch_messages(&self, key: &PageKey) -> Result<Arc<Vec<Message>>> {
        let generation = self.inner.cache.messages_begin(key);
        let fetched = self
            .inner
            .service
            .list_messages(&key.conversation, key.page, self.inner.config.page_size)
            .await?;
        let snapshot = Arc::new(fetched);
        if !self
            .inner
            .cache
            .messages_settle(key, generation, Arc::clone(&snapshot))
        {
            tracing::debug!(
                conversation = %key.conversation,
                page = key.page,
                "messages fetch superseded by invalidation"
            );
        }
        Ok(snapshot)
    }
}
