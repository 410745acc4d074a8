//! # Confab
//!
//! The unified client API for the Confab messaging system.
//!
//! ## Overview
//!
//! Confab is the client side of a two-party messaging service. The
//! remote service owns persistence, identity verification, and
//! authorization; this library owns what the client observes:
//!
//! - **Sessions**: one [`ChatSession`] per authenticated user, created
//!   once the remote client is ready and closed on logout.
//! - **Synchronized reads**: profiles, conversation lists, and message
//!   pages served from a transient cache with bounded staleness.
//! - **Mutations**: profile saves, conversation starts, and message
//!   sends that deterministically invalidate the reads they affect.
//! - **Polling**: watch handles that refetch on a fixed cadence, the
//!   stand-in for a push channel.
//!
//! ## Usage
//!
//! ```rust
//! use confab::{ChatSession, MemoryHub, Principal};
//!
//! # async fn example() {
//! let alice = Principal::from_text("alice-01").unwrap();
//! let bob = Principal::from_text("bob-01").unwrap();
//!
//! let hub = MemoryHub::with_admin(&alice);
//! let session = ChatSession::new(hub.connect(alice));
//!
//! let conversation = session.start_conversation(&bob).await.unwrap();
//! session.send_message(&conversation, "hi").await.unwrap();
//!
//! let messages = session.messages(&conversation, 0).await.unwrap();
//! assert_eq!(messages[0].content, "hi");
//!
//! session.close();
//! # }
//! ```
//!
//! ## Re-exports
//!
//! This crate re-exports the component crates for convenience:
//!
//! - `confab::core` - Core primitives (Principal, Message, etc.)
//! - `confab::service` - The remote service boundary
//! - `confab::sync` - The data-synchronization layer

pub mod error;
pub mod session;

// Re-export component crates
pub use confab_core as core;
pub use confab_service as service;
pub use confab_sync as sync;

// Re-export main types for convenience
pub use error::{ChatError, Result};
pub use session::ChatSession;

// Re-export commonly used component types
pub use confab_core::{
    AvatarError, ConversationId, ConversationView, Message, MessageId, Principal, Timestamp,
    UserProfile, UserRole, ValidationError,
};
pub use confab_service::{ChatService, MemoryHub, MemoryService, ServiceError};
pub use confab_sync::{PollHandle, PollSnapshot, SyncClient, SyncConfig, SyncError};
