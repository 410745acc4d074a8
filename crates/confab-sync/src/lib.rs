//! # Confab Sync
//!
//! The data-synchronization layer: cached reads, mutations with
//! deterministic invalidation, and polling-based refresh.
//!
//! ## Overview
//!
//! [`SyncClient`] wraps a [`confab_service::ChatService`] so that every
//! piece of UI observes the same value for the same logical entity,
//! within a bounded staleness window:
//!
//! - **Reads** serve a cached snapshot while it is fresh and refetch
//!   otherwise. The own-profile read stays fresh until invalidated; the
//!   conversations and message-page reads go stale after their poll
//!   interval (5 s and 3 s by default).
//! - **Mutations** call the remote procedure and, on success, invalidate
//!   exactly the reads they affect. There is no optimistic update: the
//!   cache changes only after the remote call resolves.
//! - **Pollers** refetch a read on a fixed interval and publish whole
//!   snapshots over a watch channel. Polling is the freshness mechanism
//!   for changes made by the other participant; no push channel exists.
//!
//! ## Consistency Model
//!
//! ```text
//! read ──► fresh snapshot? ── yes ──► serve cached Arc
//!               │ no
//!               ▼
//!         fetch via service ──► settle (generation-checked) ──► serve
//!
//! mutation ──► remote call ──► on success: invalidate dependent slots
//! ```
//!
//! ## Key Properties
//!
//! - **Whole-value replacement**: a cache slot is only ever replaced by
//!   a complete new snapshot, never partially merged, so concurrent
//!   readers see either the old value or the new one.
//! - **Monotonic invalidation**: invalidating bumps a generation counter
//!   and marks the slot stale; it never supplies data. A fetch that was
//!   in flight across an invalidation settles into nothing: its result
//!   is served to its caller and then dropped.
//! - **No retries**: a failed read or mutation surfaces its error and
//!   leaves the cache untouched.
//! - **Bounded staleness**: an external change becomes visible no later
//!   than the next poll tick.

pub mod cache;
pub mod client;
pub mod error;
pub mod poll;

pub use cache::{PageKey, Scope};
pub use client::{SyncClient, SyncConfig};
pub use error::{Result, SyncError};
pub use poll::{PollHandle, PollSnapshot};
