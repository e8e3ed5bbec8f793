//! UUID text support for the extended JSON codec.
//!
//! BSON stores UUIDs as binary values with either the standard UUID subtype (4) or the legacy
//! UUID subtype (3). Before subtype 4 existed, each driver wrote the 16 UUID bytes to subtype 3
//! in its own byte order, so reading such a value back requires knowing which driver wrote it.
//! [`UuidEncoding`] names those byte orders, and the functions in this module convert between
//! hex payloads and the canonical dashed UUID text under a given encoding.
//!
//! ```
//! use mongo_extjson::uuid::{hex_to_uuid, uuid_to_hex, UuidEncoding};
//!
//! let hex = "00112233445566778899aabbccddeeff";
//! assert_eq!(
//!     hex_to_uuid(hex, UuidEncoding::Default),
//!     "00112233-4455-6677-8899-aabbccddeeff"
//! );
//! assert_eq!(
//!     hex_to_uuid(hex, UuidEncoding::JavaLegacy),
//!     "77665544-3322-1100-ffee-ddccbbaa9988"
//! );
//! assert_eq!(
//!     uuid_to_hex("{77665544-3322-1100-FFEE-DDCCBBAA9988}", UuidEncoding::JavaLegacy),
//!     hex
//! );
//! ```

use crate::{
    Binary,
    error::{Error, Result},
    hexutil,
    spec::BinarySubtype,
};

/// The byte order used to store a UUID in a BSON binary value with the legacy subtype (3).
///
/// If a UUID has been written with a particular encoding, it MUST be read back with the same
/// encoding. Standard UUIDs (subtype 4) always use the [`UuidEncoding::Default`] byte order.
#[derive(PartialEq, Eq, Clone, Copy, Debug, Default, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum UuidEncoding {
    /// The canonical RFC 4122 byte order used by MongoDB itself.
    #[default]
    Default,
    /// The order of the legacy Java driver: each 8-byte half is byte-reversed.
    JavaLegacy,
    /// The order of the legacy C# driver, matching .NET's `Guid` layout: the first three fields
    /// (4, 2 and 2 bytes) are each byte-reversed.
    CSharpLegacy,
    /// The order of the legacy Python driver, which is the same as [`UuidEncoding::Default`].
    PythonLegacy,
}

impl UuidEncoding {
    /// All encodings, in the order of their persisted setting values.
    pub const ALL: [UuidEncoding; 4] = [
        UuidEncoding::Default,
        UuidEncoding::JavaLegacy,
        UuidEncoding::CSharpLegacy,
        UuidEncoding::PythonLegacy,
    ];

    /// Restores an encoding from its persisted integer setting. Values outside the known range
    /// fall back to [`UuidEncoding::Default`].
    pub fn from_setting(value: i32) -> Self {
        usize::try_from(value)
            .ok()
            .and_then(|i| Self::ALL.get(i).copied())
            .unwrap_or_default()
    }

    /// The integer under which this encoding is persisted.
    pub fn to_setting(self) -> i32 {
        match self {
            UuidEncoding::Default => 0,
            UuidEncoding::JavaLegacy => 1,
            UuidEncoding::CSharpLegacy => 2,
            UuidEncoding::PythonLegacy => 3,
        }
    }

    /// The shell constructor that renders a legacy (subtype 3) UUID stored in this encoding.
    pub fn legacy_constructor(self) -> &'static str {
        match self {
            UuidEncoding::Default => "LUUID",
            UuidEncoding::JavaLegacy => "JUUID",
            UuidEncoding::CSharpLegacy => "NUUID",
            UuidEncoding::PythonLegacy => "PYUUID",
        }
    }

    /// Converts between this encoding's byte order and the canonical one, in place.
    ///
    /// Every permutation here is its own inverse, so the same call serves both directions.
    fn permute(self, bytes: &mut [u8; 16]) {
        match self {
            UuidEncoding::Default | UuidEncoding::PythonLegacy => {}
            UuidEncoding::JavaLegacy => {
                bytes[0..8].reverse();
                bytes[8..16].reverse();
            }
            UuidEncoding::CSharpLegacy => {
                bytes[0..4].reverse();
                bytes[4..6].reverse();
                bytes[6..8].reverse();
            }
        }
    }
}

/// Converts a 32-character hex payload, stored in the given encoding, into canonical dashed UUID
/// text (`8-4-4-4-12`, lowercase).
///
/// Returns an empty string if `hex` is not exactly 32 hex characters.
pub fn hex_to_uuid(hex: &str, encoding: UuidEncoding) -> String {
    let Some(mut bytes) = hexutil::from_hex_array::<16>(hex) else {
        return String::new();
    };
    encoding.permute(&mut bytes);
    uuid::Uuid::from_bytes(bytes).hyphenated().to_string()
}

/// Converts UUID text into the lowercase hex payload stored under the given encoding.
///
/// `{`, `}` and `-` are stripped first, so both `{XXXXXXXX-XXXX-...}` and the bare 32-digit form
/// are accepted, in either case. Returns an empty string if what remains is not exactly 32 hex
/// characters.
pub fn uuid_to_hex(uuid: &str, encoding: UuidEncoding) -> String {
    let stripped: String = uuid
        .chars()
        .filter(|c| !matches!(c, '{' | '}' | '-'))
        .collect();
    if stripped.len() != 32 {
        return String::new();
    }
    let Some(mut bytes) = hexutil::from_hex_array::<16>(&stripped) else {
        return String::new();
    };
    encoding.permute(&mut bytes);
    hexutil::to_hex_lower(bytes)
}

/// Renders a UUID-subtyped binary value as the shell constructor that reproduces it.
///
/// Standard UUIDs (subtype 4) always render as `UUID("...")` in canonical order. Legacy UUIDs
/// (subtype 3) are decoded with `encoding` and render as `LUUID`, `JUUID`, `NUUID` or `PYUUID`
/// accordingly.
///
/// Returns an error if the binary is not UUID-subtyped or its payload is not 16 bytes.
pub fn format_uuid(binary: &Binary, encoding: UuidEncoding) -> Result<String> {
    let (constructor, encoding) = match binary.subtype {
        BinarySubtype::Uuid => ("UUID", UuidEncoding::Default),
        BinarySubtype::UuidOld => (encoding.legacy_constructor(), encoding),
        other => return Err(Error::unsupported_uuid_subtype(other)),
    };
    let text = hex_to_uuid(&hexutil::to_hex_lower(&binary.bytes), encoding);
    if text.is_empty() {
        return Err(Error::invalid_uuid_length(binary.bytes.len()));
    }
    Ok(format!("{constructor}(\"{text}\")"))
}

impl Binary {
    /// Builds a UUID-subtyped binary value from UUID text whose bytes are stored in the given
    /// encoding.
    ///
    /// ```
    /// use mongo_extjson::{spec::BinarySubtype, uuid::UuidEncoding, Binary};
    ///
    /// let bin = Binary::from_uuid_str(
    ///     "00112233-4455-6677-8899-aabbccddeeff",
    ///     BinarySubtype::UuidOld,
    ///     UuidEncoding::CSharpLegacy,
    /// )?;
    /// assert_eq!(&bin.bytes[..4], &[0x33, 0x22, 0x11, 0x00]);
    /// # Ok::<(), mongo_extjson::error::Error>(())
    /// ```
    pub fn from_uuid_str(
        uuid: &str,
        subtype: BinarySubtype,
        encoding: UuidEncoding,
    ) -> Result<Self> {
        let hex = uuid_to_hex(uuid, encoding);
        let bytes = hexutil::from_hex(&hex)
            .filter(|bytes| bytes.len() == 16)
            .ok_or_else(|| Error::invalid_uuid_string(format!("\"{uuid}\" is not a UUID")))?;
        Ok(Binary { subtype, bytes })
    }

    /// Renders this UUID-subtyped binary value as canonical dashed UUID text, reading legacy
    /// payloads with the given encoding.
    pub fn to_uuid_string(&self, encoding: UuidEncoding) -> Result<String> {
        let encoding = match self.subtype {
            BinarySubtype::Uuid => UuidEncoding::Default,
            BinarySubtype::UuidOld => encoding,
            other => return Err(Error::unsupported_uuid_subtype(other)),
        };
        let text = hex_to_uuid(&hexutil::to_hex_lower(&self.bytes), encoding);
        if text.is_empty() {
            return Err(Error::invalid_uuid_length(self.bytes.len()));
        }
        Ok(text)
    }
}
