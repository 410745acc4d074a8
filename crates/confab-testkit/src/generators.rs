//! Proptest generators for property-based testing.

use proptest::prelude::*;

use confab_core::{limits, Principal, UserProfile};

/// Generate a valid principal.
pub fn principal() -> impl Strategy<Value = Principal> {
    "[a-z0-9][a-z0-9-]{3,40}[a-z0-9]".prop_map(|text| {
        Principal::from_text(&text).expect("generated text is a well-formed principal")
    })
}

/// Generate a valid profile display name.
pub fn profile_name() -> impl Strategy<Value = String> {
    "[A-Za-z]{1,40}"
}

/// Generate a valid profile without an avatar.
pub fn profile() -> impl Strategy<Value = UserProfile> {
    profile_name().prop_map(UserProfile::new)
}

/// Generate valid message content.
pub fn message_content() -> impl Strategy<Value = String> {
    "[ -~]{1,200}".prop_filter("content must not be blank", |s| !s.trim().is_empty())
}

/// Generate a page size within service limits.
pub fn page_size() -> impl Strategy<Value = u64> {
    1..=limits::MAX_PAGE_SIZE
}

#[cfg(test)]
mod tests {
    use super::*;
    use confab_core::{validate_message_content, validate_page_size, validate_profile};

    proptest! {
        #[test]
        fn generated_principals_parse(p in principal()) {
            prop_assert!(Principal::from_text(p.as_str()).is_ok());
        }

        #[test]
        fn generated_profiles_validate(p in profile()) {
            prop_assert!(validate_profile(&p).is_ok());
        }

        #[test]
        fn generated_content_validates(content in message_content()) {
            prop_assert!(validate_message_content(&content).is_ok());
        }

        #[test]
        fn generated_page_sizes_validate(size in page_size()) {
            prop_assert!(validate_page_size(size).is_ok());
        }
    }
}
