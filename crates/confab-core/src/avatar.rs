//! Avatar encoding: raw image bytes to a self-contained data URL.
//!
//! The checks here run before any remote call: non-image or oversized
//! input fails fast with a descriptive error.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;

use crate::error::AvatarError;
use crate::limits::MAX_AVATAR_BYTES;

/// Image formats recognized by plain prefix sniffing.
const SIGNATURES: &[(&[u8], &str)] = &[
    (b"\x89PNG\r\n\x1a\n", "image/png"),
    (b"\xff\xd8\xff", "image/jpeg"),
    (b"GIF87a", "image/gif"),
    (b"GIF89a", "image/gif"),
    (b"BM", "image/bmp"),
];

/// Sniff the MIME type of an image from its leading bytes.
///
/// WebP needs a two-part check (RIFF container with a WEBP tag); the
/// rest are plain prefixes.
pub fn sniff_image_mime(bytes: &[u8]) -> Option<&'static str> {
    for (magic, mime) in SIGNATURES {
        if bytes.starts_with(magic) {
            return Some(mime);
        }
    }
    if bytes.len() >= 12 && &bytes[0..4] == b"RIFF" && &bytes[8..12] == b"WEBP" {
        return Some("image/webp");
    }
    None
}

/// Convert raw image bytes to a `data:<mime>;base64,<payload>` URL.
///
/// Fails on empty input, unrecognized formats, and inputs over
/// [`MAX_AVATAR_BYTES`].
pub fn encode_avatar(bytes: &[u8]) -> Result<String, AvatarError> {
    if bytes.is_empty() {
        return Err(AvatarError::Empty);
    }
    let mime = sniff_image_mime(bytes).ok_or(AvatarError::NotAnImage)?;
    if bytes.len() > MAX_AVATAR_BYTES {
        return Err(AvatarError::TooLarge {
            size: bytes.len(),
            max: MAX_AVATAR_BYTES,
        });
    }
    Ok(format!("data:{};base64,{}", mime, STANDARD.encode(bytes)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn png_bytes(len: usize) -> Vec<u8> {
        let mut bytes = vec![0u8; len.max(8)];
        bytes[..8].copy_from_slice(b"\x89PNG\r\n\x1a\n");
        bytes
    }

    #[test]
    fn sniffs_common_formats() {
        assert_eq!(sniff_image_mime(&png_bytes(16)), Some("image/png"));
        assert_eq!(sniff_image_mime(b"\xff\xd8\xff\xe0rest"), Some("image/jpeg"));
        assert_eq!(sniff_image_mime(b"GIF89a..."), Some("image/gif"));
        assert_eq!(sniff_image_mime(b"RIFF\x00\x00\x00\x00WEBPVP8 "), Some("image/webp"));
        assert_eq!(sniff_image_mime(b"BM\x00\x00"), Some("image/bmp"));
        assert_eq!(sniff_image_mime(b"plain text"), None);
    }

    #[test]
    fn encodes_png_as_data_url() {
        let url = encode_avatar(&png_bytes(500 * 1024)).unwrap();
        assert!(url.starts_with("data:image/png;base64,"));

        // The payload decodes back to the original bytes.
        let payload = url.split(',').nth(1).unwrap();
        let decoded = STANDARD.decode(payload).unwrap();
        assert_eq!(decoded, png_bytes(500 * 1024));
    }

    #[test]
    fn rejects_non_image_input() {
        let err = encode_avatar(b"#!/bin/sh\necho hi\n").unwrap_err();
        assert!(matches!(err, AvatarError::NotAnImage));
    }

    #[test]
    fn rejects_oversized_input() {
        let err = encode_avatar(&png_bytes(3 * 1024 * 1024)).unwrap_err();
        assert!(matches!(
            err,
            AvatarError::TooLarge {
                size,
                max: MAX_AVATAR_BYTES,
            } if size == 3 * 1024 * 1024
        ));
    }

    #[test]
    fn rejects_empty_input() {
        assert!(matches!(encode_avatar(&[]), Err(AvatarError::Empty)));
    }

    #[test]
    fn boundary_size_is_accepted() {
        assert!(encode_avatar(&png_bytes(MAX_AVATAR_BYTES)).is_ok());
    }
}
