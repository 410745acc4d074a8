//! Test fixtures and helpers.
//!
//! Common setup code for integration tests.

use std::sync::Arc;

use confab::{ChatSession, MemoryHub, MemoryService, Principal};

/// Deterministic principal derived from a seed byte.
pub fn seeded_principal(seed: u8) -> Principal {
    let bytes = [seed, seed.wrapping_add(1), seed.wrapping_add(2)];
    Principal::from_text(&format!("user-{}", hex::encode(bytes)))
        .expect("seeded principal is well-formed")
}

/// Random principal, for tests that need unrelated actors.
pub fn random_principal() -> Principal {
    use rand::Rng;
    let bytes: [u8; 8] = rand::thread_rng().gen();
    Principal::from_text(&format!("user-{}", hex::encode(bytes)))
        .expect("generated principal is well-formed")
}

/// A two-party fixture: one hub plus sessions for alice and bob.
///
/// Alice is seeded as the deployment admin.
pub struct TestFixture {
    pub hub: Arc<MemoryHub>,
    pub alice: ChatSession<MemoryService>,
    pub bob: ChatSession<MemoryService>,
}

impl TestFixture {
    /// Create a fixture with deterministic principals.
    pub fn new() -> Self {
        let alice_id = seeded_principal(0xa1);
        let bob_id = seeded_principal(0xb0);
        let hub = MemoryHub::with_admin(&alice_id);
        let alice = ChatSession::new(hub.connect(alice_id));
        let bob = ChatSession::new(hub.connect(bob_id));
        Self { hub, alice, bob }
    }

    /// Alice's principal.
    pub fn alice_id(&self) -> Principal {
        self.alice.principal()
    }

    /// Bob's principal.
    pub fn bob_id(&self) -> Principal {
        self.bob.principal()
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seeded_principals_are_deterministic_and_distinct() {
        assert_eq!(seeded_principal(1), seeded_principal(1));
        assert_ne!(seeded_principal(1), seeded_principal(2));
        assert_ne!(random_principal(), random_principal());
    }

    #[tokio::test]
    async fn fixture_parties_share_one_deployment() {
        let fixture = TestFixture::new();

        let conversation = fixture
            .alice
            .start_conversation(&fixture.bob_id())
            .await
            .unwrap();
        fixture
            .alice
            .send_message(&conversation, "hi bob")
            .await
            .unwrap();

        let seen = fixture.bob.messages(&conversation, 0).await.unwrap();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].sender, fixture.alice_id());
    }
}
