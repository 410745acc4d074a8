//! Transient query cache: whole-value snapshots with generation-checked
//! replacement.
//!
//! The cache never persists anything and never merges partially. Each
//! logical read owns one [`Slot`] holding an `Arc` snapshot that is
//! replaced atomically. Invalidation is a monotonic "refetch needed"
//! signal: it bumps the slot's generation and clears freshness, keeping
//! the last snapshot available to pollers that want stale data.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use std::time::Duration;

use tokio::time::Instant;

use confab_core::{ConversationId, ConversationView, Message, UserProfile};

/// Cache key for one page of a conversation's messages.
///
/// The page size is session configuration and deliberately not part of
/// the key: all pages of a conversation invalidate together.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PageKey {
    pub conversation: ConversationId,
    pub page: u64,
}

/// Which cached reads an invalidation covers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Scope {
    /// The caller's own profile.
    OwnProfile,
    /// The conversations list.
    Conversations,
    /// Every cached page of one conversation's messages.
    Messages(ConversationId),
}

/// One cached read: an atomically replaced snapshot plus bookkeeping.
struct Slot<T> {
    value: Option<Arc<T>>,
    fetched_at: Option<Instant>,
    generation: u64,
}

impl<T> Slot<T> {
    /// The snapshot, if still fresh under `window`.
    ///
    /// A `None` window means "fresh until invalidated".
    fn fresh(&self, window: Option<Duration>) -> Option<Arc<T>> {
        let value = self.value.clone()?;
        let fetched_at = self.fetched_at?;
        match window {
            None => Some(value),
            Some(window) if fetched_at.elapsed() < window => Some(value),
            Some(_) => None,
        }
    }

    /// Generation to carry through a fetch that begins now.
    fn begin(&self) -> u64 {
        self.generation
    }

    /// Store a settled fetch, unless the slot was invalidated after the
    /// fetch began. Superseded results are dropped, never merged.
    fn settle(&mut self, generation: u64, value: Arc<T>) -> bool {
        if generation != self.generation {
            return false;
        }
        self.value = Some(value);
        self.fetched_at = Some(Instant::now());
        true
    }

    /// Mark the slot as needing a refetch. Keeps the snapshot.
    fn invalidate(&mut self) {
        self.generation = self.generation.wrapping_add(1);
        self.fetched_at = None;
    }
}

impl<T> Default for Slot<T> {
    fn default() -> Self {
        Self {
            value: None,
            fetched_at: None,
            generation: 0,
        }
    }
}

/// The query cache: one slot per logical read.
pub(crate) struct QueryCache {
    inner: RwLock<CacheInner>,
}

#[derive(Default)]
struct CacheInner {
    own_profile: Slot<Option<UserProfile>>,
    conversations: Slot<Vec<ConversationView>>,
    messages: HashMap<PageKey, Slot<Vec<Message>>>,
}

impl QueryCache {
    pub(crate) fn new() -> Self {
        Self {
            inner: RwLock::new(CacheInner::default()),
        }
    }

    // ─── Own profile ───

    pub(crate) fn profile_fresh(&self) -> Option<Arc<Option<UserProfile>>> {
        self.inner.read().unwrap().own_profile.fresh(None)
    }

    pub(crate) fn profile_begin(&self) -> u64 {
        self.inner.read().unwrap().own_profile.begin()
    }

    pub(crate) fn profile_settle(&self, generation: u64, value: Arc<Option<UserProfile>>) -> bool {
        self.inner
            .write()
            .unwrap()
            .own_profile
            .settle(generation, value)
    }

    // ─── Conversations ───

    pub(crate) fn conversations_fresh(&self, window: Duration) -> Option<Arc<Vec<ConversationView>>> {
        self.inner.read().unwrap().conversations.fresh(Some(window))
    }

    pub(crate) fn conversations_begin(&self) -> u64 {
        self.inner.read().unwrap().conversations.begin()
    }

    pub(crate) fn conversations_settle(
        &self,
        generation: u64,
        value: Arc<Vec<ConversationView>>,
    ) -> bool {
        self.inner
            .write()
            .unwrap()
            .conversations
            .settle(generation, value)
    }

    // ─── Message pages ───

    pub(crate) fn messages_fresh(&self, key: &PageKey, window: Duration) -> Option<Arc<Vec<Message>>> {
        self.inner
            .read()
            .unwrap()
            .messages
            .get(key)
            .and_then(|slot| slot.fresh(Some(window)))
    }

    pub(crate) fn messages_begin(&self, key: &PageKey) -> u64 {
        self.inner
            .write()
            .unwrap()
            .messages
            .entry(key.clone())
            .or_default()
            .begin()
    }

    pub(crate) fn messages_settle(
        &self,
        key: &PageKey,
        generation: u64,
        value: Arc<Vec<Message>>,
    ) -> bool {
        self.inner
            .write()
            .unwrap()
            .messages
            .entry(key.clone())
            .or_default()
            .settle(generation, value)
    }

    // ─── Invalidation ───

    pub(crate) fn invalidate(&self, scope: &Scope) {
        let mut inner = self.inner.write().unwrap();
        match scope {
            Scope::OwnProfile => inner.own_profile.invalidate(),
            Scope::Conversations => inner.conversations.invalidate(),
            Scope::Messages(conversation) => {
                for (key, slot) in inner.messages.iter_mut() {
                    if &key.conversation == conversation {
                        slot.invalidate();
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use confab_core::{MessageId, Principal, Timestamp};

    fn message(id: u64) -> Message {
        Message {
            id: MessageId::new(id),
            content: format!("m{id}"),
            sender: Principal::from_text("alice-01").unwrap(),
            timestamp: Timestamp::from_nanos(id),
        }
    }

    fn page(conversation: &str, page: u64) -> PageKey {
        PageKey {
            conversation: ConversationId::new(conversation),
            page,
        }
    }

    #[tokio::test(start_paused = true)]
    async fn snapshot_goes_stale_after_window() {
        let cache = QueryCache::new();
        let window = Duration::from_secs(3);

        let generation = cache.messages_begin(&page("conv-1", 0));
        assert!(cache.messages_settle(&page("conv-1", 0), generation, Arc::new(vec![message(0)])));

        assert!(cache.messages_fresh(&page("conv-1", 0), window).is_some());
        tokio::time::advance(Duration::from_secs(3)).await;
        assert!(cache.messages_fresh(&page("conv-1", 0), window).is_none());
    }

    #[tokio::test]
    async fn profile_stays_fresh_until_invalidated() {
        let cache = QueryCache::new();

        let generation = cache.profile_begin();
        assert!(cache.profile_settle(generation, Arc::new(None)));
        assert!(cache.profile_fresh().is_some());

        cache.invalidate(&Scope::OwnProfile);
        assert!(cache.profile_fresh().is_none());
    }

    #[tokio::test]
    async fn superseded_fetch_does_not_settle() {
        let cache = QueryCache::new();
        let key = page("conv-1", 0);

        // A fetch begins, then the slot is invalidated mid-flight.
        let generation = cache.messages_begin(&key);
        cache.invalidate(&Scope::Messages(ConversationId::new("conv-1")));

        assert!(!cache.messages_settle(&key, generation, Arc::new(vec![message(0)])));
        assert!(cache.messages_fresh(&key, Duration::from_secs(3)).is_none());

        // A fetch that began after the invalidation settles normally.
        let generation = cache.messages_begin(&key);
        assert!(cache.messages_settle(&key, generation, Arc::new(vec![message(1)])));
        assert!(cache.messages_fresh(&key, Duration::from_secs(3)).is_some());
    }

    #[tokio::test]
    async fn conversation_invalidation_covers_all_pages() {
        let cache = QueryCache::new();
        let window = Duration::from_secs(3);

        for n in 0..3 {
            let key = page("conv-1", n);
            let generation = cache.messages_begin(&key);
            cache.messages_settle(&key, generation, Arc::new(vec![message(n)]));
        }
        let other = page("conv-2", 0);
        let generation = cache.messages_begin(&other);
        cache.messages_settle(&other, generation, Arc::new(vec![message(9)]));

        cache.invalidate(&Scope::Messages(ConversationId::new("conv-1")));

        for n in 0..3 {
            assert!(cache.messages_fresh(&page("conv-1", n), window).is_none());
        }
        assert!(cache.messages_fresh(&other, window).is_some());
    }

    #[tokio::test]
    async fn settle_replaces_whole_value() {
        let cache = QueryCache::new();
        let key = page("conv-1", 0);

        let generation = cache.messages_begin(&key);
        cache.messages_settle(&key, generation, Arc::new(vec![message(0), message(1)]));

        let generation = cache.messages_begin(&key);
        cache.messages_settle(&key, generation, Arc::new(vec![message(2)]));

        let snapshot = cache
            .messages_fresh(&key, Duration::from_secs(3))
            .expect("fresh");
        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot[0].id, MessageId::new(2));
    }
}
