//! # Confab Service
//!
//! The remote service boundary: every remote procedure the client
//! consumes, expressed as one async capability trait.
//!
//! ## Overview
//!
//! The remote service owns persistence, identity verification, and
//! authorization; this crate only describes its contract. The
//! [`ChatService`] trait lets the synchronization layer stay
//! service-agnostic: tests and local development use the in-memory
//! [`MemoryHub`]/[`MemoryService`] pair, which reproduces the observable
//! semantics of the production service (server-assigned ids and
//! timestamps, most-recent-message ordering, pagination, authorization)
//! without any network.
//!
//! ## Usage
//!
//! ```rust
//! use confab_core::Principal;
//! use confab_service::{ChatService, MemoryHub};
//!
//! # async fn example() {
//! let alice = Principal::from_text("alice-01").unwrap();
//! let bob = Principal::from_text("bob-01").unwrap();
//!
//! let hub = MemoryHub::with_admin(&alice);
//! let service = hub.connect(alice);
//!
//! let conversation = service.start_conversation(&bob).await.unwrap();
//! service.send_message(&conversation, "hi").await.unwrap();
//! # }
//! ```

pub mod error;
pub mod memory;
pub mod traits;

pub use error::{Result, ServiceError};
pub use memory::{MemoryHub, MemoryService};
pub use traits::ChatService;
