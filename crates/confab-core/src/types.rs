//! Strong type definitions for Confab.
//!
//! All identifiers are newtypes to prevent misuse at compile time.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::ValidationError;

/// An opaque identifier for an authenticated actor.
///
/// Principals are issued by the external authentication flow; this layer
/// only checks their textual shape: lowercase ASCII alphanumerics and `-`,
/// 5 to 63 characters, no leading or trailing dash.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Principal(String);

impl Principal {
    /// Minimum length of the textual form.
    pub const MIN_LEN: usize = 5;
    /// Maximum length of the textual form.
    pub const MAX_LEN: usize = 63;

    /// Parse a principal from its textual form.
    pub fn from_text(text: &str) -> Result<Self, ValidationError> {
        if text.len() < Self::MIN_LEN || text.len() > Self::MAX_LEN {
            return Err(ValidationError::MalformedPrincipal(format!(
                "length {} outside {}..={}",
                text.len(),
                Self::MIN_LEN,
                Self::MAX_LEN
            )));
        }
        if text.starts_with('-') || text.ends_with('-') {
            return Err(ValidationError::MalformedPrincipal(
                "leading or trailing dash".into(),
            ));
        }
        if let Some(bad) = text.chars().find(|c| !matches!(c, 'a'..='z' | '0'..='9' | '-')) {
            return Err(ValidationError::MalformedPrincipal(format!(
                "invalid character {bad:?}"
            )));
        }
        Ok(Self(text.to_string()))
    }

    /// The textual form.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Principal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Principal({})", self.0)
    }
}

impl fmt::Display for Principal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Principal {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// An opaque, server-assigned conversation identifier.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ConversationId(String);

impl ConversationId {
    /// Wrap a server-assigned identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The textual form.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ConversationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ConversationId({})", self.0)
    }
}

impl fmt::Display for ConversationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A message identifier, assigned by the service at append time.
///
/// Ids increase monotonically within one conversation, starting at 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MessageId(pub u64);

impl MessageId {
    /// Wrap a raw id.
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// The raw id.
    pub const fn as_u64(self) -> u64 {
        self.0
    }
}

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A nanosecond-precision instant, assigned by the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Timestamp(pub u64);

impl Timestamp {
    /// Wrap raw nanoseconds since the Unix epoch.
    pub const fn from_nanos(nanos: u64) -> Self {
        Self(nanos)
    }

    /// Nanoseconds since the Unix epoch.
    pub const fn as_nanos(self) -> u64 {
        self.0
    }

    /// The current wall-clock time.
    pub fn now() -> Self {
        use std::time::{SystemTime, UNIX_EPOCH};
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("system clock before Unix epoch")
            .as_nanos();
        Self(nanos as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn principal_accepts_well_formed_text() {
        let p = Principal::from_text("alice-01").unwrap();
        assert_eq!(p.as_str(), "alice-01");
        assert_eq!(format!("{}", p), "alice-01");
        assert_eq!(format!("{:?}", p), "Principal(alice-01)");
    }

    #[test]
    fn principal_rejects_bad_shapes() {
        assert!(Principal::from_text("abcd").is_err()); // too short
        assert!(Principal::from_text(&"a".repeat(64)).is_err()); // too long
        assert!(Principal::from_text("-alice").is_err());
        assert!(Principal::from_text("alice-").is_err());
        assert!(Principal::from_text("Alice-01").is_err()); // uppercase
        assert!(Principal::from_text("alice 01").is_err()); // whitespace
    }

    #[test]
    fn conversation_id_display() {
        let id = ConversationId::new("conv-1");
        assert_eq!(id.as_str(), "conv-1");
        assert_eq!(format!("{:?}", id), "ConversationId(conv-1)");
    }

    #[test]
    fn message_ids_order() {
        assert!(MessageId::new(0) < MessageId::new(1));
    }

    #[test]
    fn timestamp_now_is_nonzero() {
        assert!(Timestamp::now().as_nanos() > 0);
    }

    #[test]
    fn principal_serde_is_transparent() {
        let p = Principal::from_text("alice-01").unwrap();
        let json = serde_json::to_string(&p).unwrap();
        assert_eq!(json, "\"alice-01\"");
    }
}
