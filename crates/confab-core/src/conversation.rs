//! Conversations and messages.

use serde::{Deserialize, Serialize};

use crate::types::{ConversationId, MessageId, Principal, Timestamp};

/// A single message within a conversation.
///
/// Messages are immutable: the service assigns `id` and `timestamp` at
/// append time and never rewrites or deletes them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub id: MessageId,
    pub content: String,
    pub sender: Principal,
    pub timestamp: Timestamp,
}

/// A conversation between exactly two participants.
///
/// The participant pair is unordered but fixed at creation; messages are
/// append-only and arrive in server-defined order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationView {
    pub id: ConversationId,
    pub participants: [Principal; 2],
    pub messages: Vec<Message>,
}

impl ConversationView {
    /// Whether `who` is one of the two participants.
    pub fn has_participant(&self, who: &Principal) -> bool {
        self.participants.iter().any(|p| p == who)
    }

    /// The participant other than `me`, if `me` is in the pair.
    pub fn peer_of(&self, me: &Principal) -> Option<&Principal> {
        if !self.has_participant(me) {
            return None;
        }
        self.participants.iter().find(|p| *p != me)
    }

    /// Timestamp of the most recent message, if any.
    pub fn last_message_at(&self) -> Option<Timestamp> {
        self.messages.last().map(|m| m.timestamp)
    }
}

/// Normalize an unordered participant pair into canonical order.
pub fn normalize_pair(a: Principal, b: Principal) -> [Principal; 2] {
    if a <= b {
        [a, b]
    } else {
        [b, a]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn principal(text: &str) -> Principal {
        Principal::from_text(text).unwrap()
    }

    fn conversation(a: &str, b: &str) -> ConversationView {
        ConversationView {
            id: ConversationId::new("conv-1"),
            participants: normalize_pair(principal(a), principal(b)),
            messages: Vec::new(),
        }
    }

    #[test]
    fn pair_normalization_is_order_insensitive() {
        let left = normalize_pair(principal("alice-01"), principal("bob-01"));
        let right = normalize_pair(principal("bob-01"), principal("alice-01"));
        assert_eq!(left, right);
    }

    #[test]
    fn peer_lookup() {
        let conv = conversation("alice-01", "bob-01");
        assert!(conv.has_participant(&principal("alice-01")));
        assert!(!conv.has_participant(&principal("carol-01")));
        assert_eq!(
            conv.peer_of(&principal("alice-01")),
            Some(&principal("bob-01"))
        );
        assert_eq!(conv.peer_of(&principal("carol-01")), None);
    }

    #[test]
    fn last_message_timestamp() {
        let mut conv = conversation("alice-01", "bob-01");
        assert_eq!(conv.last_message_at(), None);
        conv.messages.push(Message {
            id: MessageId::new(0),
            content: "hi".into(),
            sender: principal("alice-01"),
            timestamp: Timestamp::from_nanos(42),
        });
        assert_eq!(conv.last_message_at(), Some(Timestamp::from_nanos(42)));
    }

    #[test]
    fn message_json_shape() {
        let message = Message {
            id: MessageId::new(0),
            content: "hi".into(),
            sender: principal("alice-01"),
            timestamp: Timestamp::from_nanos(7),
        };
        let json = serde_json::to_string(&message).unwrap();
        assert_eq!(
            json,
            r#"{"id":0,"content":"hi","sender":"alice-01","timestamp":7}"#
        );
    }
}
