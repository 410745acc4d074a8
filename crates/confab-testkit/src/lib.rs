//! # Confab Testkit
//!
//! Testing utilities for Confab.
//!
//! ## Overview
//!
//! This crate provides:
//!
//! - **Fixtures**: ready-made hubs and sessions for two-party scenarios
//! - **Generators**: proptest strategies for property-based testing
//!
//! ## Fixtures
//!
//! ```rust
//! use confab_testkit::TestFixture;
//!
//! # async fn example() {
//! let fixture = TestFixture::new();
//! let conversation = fixture
//!     .alice
//!     .start_conversation(&fixture.bob_id())
//!     .await
//!     .unwrap();
//! fixture.alice.send_message(&conversation, "hi").await.unwrap();
//! # }
//! ```
//!
//! ## Property Testing
//!
//! ```rust,ignore
//! use proptest::prelude::*;
//! use confab_testkit::generators;
//!
//! proptest! {
//!     #[test]
//!     fn profiles_validate(profile in generators::profile()) {
//!         prop_assert!(confab_core::validate_profile(&profile).is_ok());
//!     }
//! }
//! ```

pub mod fixtures;
pub mod generators;

pub use fixtures::{random_principal, seeded_principal, TestFixture};
