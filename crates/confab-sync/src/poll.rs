//! Polling-based refresh: the freshness mechanism standing in for a
//! push channel.
//!
//! Each watch handle owns a tokio task that refetches its read on a
//! fixed interval and publishes whole snapshots. Bounded staleness
//! falls out of the cadence: a change made by the other participant is
//! visible no later than the next tick. A task stops when its handle is
//! dropped or the client is closed, so no timer fires against a
//! torn-down client.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use confab_core::{ConversationId, ConversationView, Message};
use confab_service::ChatService;

use crate::cache::PageKey;
use crate::client::SyncClient;
use crate::error::{Result, SyncError};

/// The latest polled state of one read.
///
/// The last good snapshot and the latest error coexist: a failed tick
/// keeps serving stale data while surfacing the failure.
pub struct PollSnapshot<T> {
    /// Most recent successful snapshot, if any tick has succeeded.
    pub value: Option<Arc<T>>,
    /// Error from the most recent tick, cleared on the next success.
    pub error: Option<Arc<SyncError>>,
}

impl<T> Default for PollSnapshot<T> {
    fn default() -> Self {
        Self {
            value: None,
            error: None,
        }
    }
}

impl<T> Clone for PollSnapshot<T> {
    fn clone(&self) -> Self {
        Self {
            value: self.value.clone(),
            error: self.error.clone(),
        }
    }
}

/// Handle to a polling task. Dropping it stops the poller.
pub struct PollHandle<T> {
    rx: watch::Receiver<PollSnapshot<T>>,
    task: JoinHandle<()>,
}

impl<T> PollHandle<T> {
    /// The current snapshot.
    pub fn snapshot(&self) -> PollSnapshot<T> {
        self.rx.borrow().clone()
    }

    /// Wait for the next published snapshot.
    ///
    /// Returns `None` once the poller has stopped (client closed).
    pub async fn changed(&mut self) -> Option<PollSnapshot<T>> {
        match self.rx.changed().await {
            Ok(()) => Some(self.rx.borrow_and_update().clone()),
            Err(_) => None,
        }
    }
}

impl<T> Drop for PollHandle<T> {
    fn drop(&mut self) {
        self.task.abort();
    }
}

impl<S: ChatService + 'static> SyncClient<S> {
    /// Watch the conversations list, refetching on the conversations
    /// interval. The first tick fires immediately.
    pub fn watch_conversations(&self) -> PollHandle<Vec<ConversationView>> {
        let client = self.clone();
        let period = self.config().conversations_interval;
        spawn_poller(period, self.shutdown_rx(), move || {
            let client = client.clone();
            async move { client.fetch_conversations().await }
        })
    }

    /// Watch one message page, refetching on the messages interval. The
    /// first tick fires immediately.
    pub fn watch_messages(
        &self,
        conversation: &ConversationId,
        page: u64,
    ) -> PollHandle<Vec<Message>> {
        let client = self.clone();
        let key = PageKey {
            conversation: conversation.clone(),
            page,
        };
        let period = self.config().messages_interval;
        spawn_poller(period, self.shutdown_rx(), move || {
            let client = client.clone();
            let key = key.clone();
            async move { client.fetch_messages(&key).await }
        })
    }
}

fn spawn_poller<T, F, Fut>(
    period: Duration,
    mut shutdown: watch::Receiver<bool>,
    fetch: F,
) -> PollHandle<T>
where
    T: Send + Sync + 'static,
    F: Fn() -> Fut + Send + 'static,
    Fut: Future<Output = Result<Arc<T>>> + Send + 'static,
{
    let (tx, rx) = watch::channel(PollSnapshot::default());
    let task = tokio::spawn(async move {
        if *shutdown.borrow() {
            return;
        }
        let mut ticker = tokio::time::interval(period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    match fetch().await {
                        Ok(value) => {
                            tx.send_modify(|snapshot| {
                                snapshot.value = Some(value);
                                snapshot.error = None;
                            });
                        }
                        Err(err) => {
                            tracing::warn!(error = %err, "poll refetch failed");
                            tx.send_modify(|snapshot| snapshot.error = Some(Arc::new(err)));
                        }
                    }
                }
                changed = shutdown.changed() => {
                    if changed.is_err() || *shutdown.borrow() {
                        break;
                    }
                }
            }
        }
    });
    PollHandle { rx, task }
}

#[cfg(test)]
mod tests {
    use super::*;
    use confab_core::Principal;
    use confab_service::{MemoryHub, MemoryService};

    fn principal(text: &str) -> Principal {
        Principal::from_text(text).unwrap()
    }

    fn two_clients() -> (
        std::sync::Arc<MemoryHub>,
        SyncClient<MemoryService>,
        SyncClient<MemoryService>,
    ) {
        let alice = principal("alice-01");
        let bob = principal("bob-01");
        let hub = MemoryHub::with_admin(&alice);
        let a = SyncClient::new(hub.connect(alice));
        let b = SyncClient::new(hub.connect(bob));
        (hub, a, b)
    }

    #[tokio::test(start_paused = true)]
    async fn poller_publishes_initial_and_periodic_snapshots() {
        let (_hub, alice, bob) = two_clients();

        let mut handle = alice.watch_conversations();
        let first = handle.changed().await.expect("poller alive");
        assert!(first.error.is_none());
        assert_eq!(first.value.as_deref().map(Vec::len), Some(0));

        // The other participant starts a conversation; the next tick
        // makes it visible.
        bob.start_conversation(&alice.principal()).await.unwrap();
        tokio::time::advance(Duration::from_secs(5)).await;
        let next = handle.changed().await.expect("poller alive");
        assert_eq!(next.value.as_deref().map(Vec::len), Some(1));
    }

    #[tokio::test(start_paused = true)]
    async fn failed_tick_keeps_stale_snapshot_and_surfaces_error() {
        let (hub, alice, bob) = two_clients();
        let conv = alice.start_conversation(&bob.principal()).await.unwrap();
        alice.send_message(&conv, "hi").await.unwrap();

        let mut handle = alice.watch_messages(&conv, 0);
        let first = handle.changed().await.expect("poller alive");
        assert_eq!(first.value.as_deref().map(Vec::len), Some(1));
        assert!(first.error.is_none());

        hub.set_offline(true);
        tokio::time::advance(Duration::from_secs(3)).await;
        let degraded = handle.changed().await.expect("poller alive");
        assert_eq!(degraded.value.as_deref().map(Vec::len), Some(1));
        assert!(degraded.error.is_some());

        hub.set_offline(false);
        tokio::time::advance(Duration::from_secs(3)).await;
        let recovered = handle.changed().await.expect("poller alive");
        assert!(recovered.error.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn close_stops_pollers() {
        let (_hub, alice, _bob) = two_clients();

        let mut handle = alice.watch_conversations();
        handle.changed().await.expect("first tick");

        alice.close();
        assert!(handle.changed().await.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn snapshot_accessor_reflects_latest_publish() {
        let (_hub, alice, _bob) = two_clients();

        let mut handle = alice.watch_conversations();
        assert!(handle.snapshot().value.is_none());

        handle.changed().await.expect("first tick");
        assert!(handle.snapshot().value.is_some());
    }
}
