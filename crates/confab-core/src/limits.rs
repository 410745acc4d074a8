//! Size limits enforced by validation and by the reference service.

/// Max avatar input size in bytes, checked before encoding.
pub const MAX_AVATAR_BYTES: usize = 2 * 1024 * 1024;
/// Max message content size in bytes.
pub const MAX_MESSAGE_BYTES: usize = 8 * 1024;
/// Max profile display-name length in characters.
pub const MAX_NAME_CHARS: usize = 100;
/// Max rows a single message page may request.
pub const MAX_PAGE_SIZE: u64 = 500;
