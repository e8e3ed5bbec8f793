//! Conversions between raw bytes and hex strings.
//!
//! These helpers never fail loudly: malformed input yields `false` or `None` so that callers
//! parsing user-typed text can turn the failure into a positioned syntax error of their own.

/// Returns whether every character of `s` is a hex digit (`0-9`, `a-f`, `A-F`).
///
/// The empty string is vacuously a hex string.
///
/// ```
/// use mongo_extjson::hexutil::is_hex_string;
///
/// assert!(is_hex_string("00ffAB"));
/// assert!(is_hex_string(""));
/// assert!(!is_hex_string("0x12"));
/// ```
pub fn is_hex_string(s: &str) -> bool {
    s.bytes().all(|b| b.is_ascii_hexdigit())
}

/// Renders `bytes` as lowercase hex, two characters per byte, without separators.
pub fn to_hex_lower(bytes: impl AsRef<[u8]>) -> String {
    hex::encode(bytes)
}

/// Decodes a hex string into bytes, high nibble first.
///
/// Returns `None` if `s` has an odd length or contains a non-hex character.
///
/// ```
/// use mongo_extjson::hexutil::from_hex;
///
/// assert_eq!(from_hex("0aFF"), Some(vec![0x0a, 0xff]));
/// assert_eq!(from_hex("abc"), None);
/// ```
pub fn from_hex(s: &str) -> Option<Vec<u8>> {
    if s.len() % 2 != 0 {
        return None;
    }
    hex::decode(s).ok()
}

/// Decodes exactly `N` bytes from a hex string of length `2 * N`.
pub(crate) fn from_hex_array<const N: usize>(s: &str) -> Option<[u8; N]> {
    let mut buf = [0u8; N];
    hex::decode_to_slice(s, &mut buf).ok()?;
    Some(buf)
}
