//! User profiles and roles.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A user's public profile.
///
/// Created by the user on first login, mutated only by its owner. The
/// avatar, when present, is a self-contained `data:image/...;base64,`
/// URL produced by [`crate::avatar::encode_avatar`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
}

impl UserProfile {
    /// A profile with no avatar.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            avatar: None,
        }
    }

    /// Attach an already-encoded avatar data URL.
    pub fn with_avatar(mut self, data_url: impl Into<String>) -> Self {
        self.avatar = Some(data_url.into());
        self
    }
}

/// Role assigned to an authenticated caller by the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Admin,
    User,
    Guest,
}

impl UserRole {
    /// Whether this role carries administrative rights.
    pub fn is_admin(self) -> bool {
        matches!(self, UserRole::Admin)
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            UserRole::Admin => "admin",
            UserRole::User => "user",
            UserRole::Guest => "guest",
        };
        f.write_str(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn profile_builder() {
        let profile = UserProfile::new("Alice").with_avatar("data:image/png;base64,aGk=");
        assert_eq!(profile.name, "Alice");
        assert!(profile.avatar.is_some());
    }

    #[test]
    fn profile_json_omits_missing_avatar() {
        let json = serde_json::to_string(&UserProfile::new("Alice")).unwrap();
        assert_eq!(json, r#"{"name":"Alice"}"#);
    }

    #[test]
    fn role_serde_uses_lowercase() {
        assert_eq!(serde_json::to_string(&UserRole::Admin).unwrap(), "\"admin\"");
        assert!(UserRole::Admin.is_admin());
        assert!(!UserRole::Guest.is_admin());
    }
}
