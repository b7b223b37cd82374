//! Image type sniffing for uploads.
//!
//! Uploads arrive as raw bytes, so the check is on magic numbers rather than
//! the client-supplied filename or Content-Type, both of which lie.

/// Detect a supported image type from leading magic bytes.
///
/// Returns the MIME type, or `None` when the payload is not a supported
/// image.
pub fn sniff_image(bytes: &[u8]) -> Option<&'static str> {
    match bytes {
        [0xFF, 0xD8, 0xFF, ..] => Some("image/jpeg"),
        [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A, ..] => Some("image/png"),
        [b'G', b'I', b'F', b'8', ..] => Some("image/gif"),
        [b'R', b'I', b'F', b'F', _, _, _, _, b'W', b'E', b'B', b'P', ..] => Some("image/webp"),
        [b'I', b'I', 0x2A, 0x00, ..] | [b'M', b'M', 0x00, 0x2A, ..] => Some("image/tiff"),
        [b'B', b'M', ..] => Some("image/bmp"),
        _ => None,
    }
}
