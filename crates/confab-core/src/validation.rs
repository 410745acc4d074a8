//! Input validation for profiles and message content.
//!
//! These checks run client-side before any remote call, so bad input
//! fails fast without a network round trip. The reference service
//! applies the same rules on the server side.

use crate::error::ValidationError;
use crate::limits;
use crate::profile::UserProfile;

/// Validate a profile before saving.
pub fn validate_profile(profile: &UserProfile) -> Result<(), ValidationError> {
    // 1. Name must be present
    if profile.name.trim().is_empty() {
        return Err(ValidationError::EmptyName);
    }

    // 2. Name length
    let len = profile.name.chars().count();
    if len > limits::MAX_NAME_CHARS {
        return Err(ValidationError::NameTooLong {
            len,
            max: limits::MAX_NAME_CHARS,
        });
    }

    // 3. Avatar, when present, must already be data-URL encoded
    if let Some(avatar) = &profile.avatar {
        if !avatar.starts_with("data:image/") {
            return Err(ValidationError::BadAvatarEncoding);
        }
    }

    Ok(())
}

/// Validate message content before sending.
pub fn validate_message_content(content: &str) -> Result<(), ValidationError> {
    if content.trim().is_empty() {
        return Err(ValidationError::EmptyMessage);
    }
    if content.len() > limits::MAX_MESSAGE_BYTES {
        return Err(ValidationError::MessageTooLong {
            len: content.len(),
            max: limits::MAX_MESSAGE_BYTES,
        });
    }
    Ok(())
}

/// Validate a requested message page size.
pub fn validate_page_size(page_size: u64) -> Result<(), ValidationError> {
    if page_size > limits::MAX_PAGE_SIZE {
        return Err(ValidationError::PageSizeTooLarge {
            got: page_size,
            max: limits::MAX_PAGE_SIZE,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn profile_requires_name() {
        assert!(validate_profile(&UserProfile::new("Alice")).is_ok());
        assert!(matches!(
            validate_profile(&UserProfile::new("")),
            Err(ValidationError::EmptyName)
        ));
        assert!(matches!(
            validate_profile(&UserProfile::new("   ")),
            Err(ValidationError::EmptyName)
        ));
    }

    #[test]
    fn profile_name_length_is_bounded() {
        let long = "x".repeat(limits::MAX_NAME_CHARS + 1);
        assert!(matches!(
            validate_profile(&UserProfile::new(long)),
            Err(ValidationError::NameTooLong { .. })
        ));
    }

    #[test]
    fn profile_avatar_must_be_data_url() {
        let good = UserProfile::new("Alice").with_avatar("data:image/png;base64,aGk=");
        assert!(validate_profile(&good).is_ok());

        let bad = UserProfile::new("Alice").with_avatar("https://example.com/a.png");
        assert!(matches!(
            validate_profile(&bad),
            Err(ValidationError::BadAvatarEncoding)
        ));
    }

    #[test]
    fn message_content_rules() {
        assert!(validate_message_content("hi").is_ok());
        assert!(matches!(
            validate_message_content(""),
            Err(ValidationError::EmptyMessage)
        ));
        assert!(matches!(
            validate_message_content(" \n\t"),
            Err(ValidationError::EmptyMessage)
        ));
        let long = "x".repeat(limits::MAX_MESSAGE_BYTES + 1);
        assert!(matches!(
            validate_message_content(&long),
            Err(ValidationError::MessageTooLong { .. })
        ));
    }

    #[test]
    fn page_size_is_capped() {
        assert!(validate_page_size(limits::MAX_PAGE_SIZE).is_ok());
        assert!(matches!(
            validate_page_size(limits::MAX_PAGE_SIZE + 1),
            Err(ValidationError::PageSizeTooLarge { .. })
        ));
    }
}
