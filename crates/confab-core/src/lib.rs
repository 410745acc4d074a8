//! # Confab Core
//!
//! Core primitives for the Confab messaging client: identities, profiles,
//! conversations, messages, validation, and avatar encoding.
//!
//! ## Overview
//!
//! Everything in this crate is plain data or pure logic:
//!
//! - **Identifiers**: newtypes for principals, conversations, messages,
//!   and timestamps, so the compiler catches mixups.
//! - **Model types**: [`UserProfile`], [`Message`], [`ConversationView`],
//!   and [`UserRole`], the shapes the remote service exchanges.
//! - **Validation**: client-side checks that run before any remote call.
//! - **Avatar encoding**: raw image bytes to a self-contained data URL,
//!   with format sniffing and a hard size cap.
//!
//! The remote service owns persistence and authorization; nothing here
//! touches the network.

pub mod avatar;
pub mod conversation;
pub mod error;
pub mod limits;
pub mod profile;
pub mod types;
pub mod validation;

pub use avatar::{encode_avatar, sniff_image_mime};
pub use conversation::{normalize_pair, ConversationView, Message};
pub use error::{AvatarError, ValidationError};
pub use profile::{UserProfile, UserRole};
pub use types::{ConversationId, MessageId, Principal, Timestamp};
pub use validation::{validate_message_content, validate_page_size, validate_profile};
