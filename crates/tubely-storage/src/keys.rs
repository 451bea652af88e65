//! Storage key generation shared by all backends.
//!
//! Thumbnails are stored as `{token}.{ext}`, videos as `{prefix}/{token}.{ext}`.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use rand::RngCore;

/// Bytes of randomness behind every key token.
pub const TOKEN_BYTES: usize = 32;

/// 32 bytes from the thread-local CSPRNG, URL-safe base64 without padding.
pub fn random_token() -> String {
    let mut buf = [0u8; TOKEN_BYTES];
    rand::rng().fill_bytes(&mut buf);
    URL_SAFE_NO_PAD.encode(buf)
}

/// Key for a thumbnail with the given file extension.
pub fn thumbnail_key(extension: &str) -> String {
    format!("{}.{}", random_token(), extension)
}

/// Key for a video, grouped under an aspect-ratio prefix such as `landscape`.
pub fn video_key(prefix: &str, extension: &str) -> String {
    format!(
        "{}/{}.{}",
        prefix.trim_matches('/'),
        random_token(),
        extension
    )
}
