use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;

/// Decode a VAPID public key into raw bytes.
///
/// Keys arrive URL-safe base64 encoded, but some servers pad them or use the
/// standard alphabet; both are accepted.
pub fn decode_application_server_key(key: &str) -> Result<Vec<u8>, base64::DecodeError> {
    let normalized: String = key
        .trim()
        .trim_end_matches('=')
        .chars()
        .map(|c| match c {
            '+' => '-',
            '/' => '_',
            other => other,
        })
        .collect();
    URL_SAFE_NO_PAD.decode(normalized)
}
