use base64::{Engine, engine::general_purpose::STANDARD};

use crate::error::{Error, Result};

const ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789+/=";

pub(crate) fn encode<T: AsRef<[u8]>>(input: T) -> String {
    STANDARD.encode(input)
}

pub(crate) fn decode<T: AsRef<[u8]>>(input: T) -> Result<Vec<u8>> {
    STANDARD.decode(input).map_err(Error::binary)
}

/// Whether every character of `s` belongs to the standard base64 alphabet, padding included.
pub(crate) fn is_base64_string(s: &str) -> bool {
    s.bytes().all(|b| ALPHABET.contains(&b))
}
