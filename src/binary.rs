use std::fmt::{self, Display};

use crate::{base64, error::Result, spec::BinarySubtype};

/// Represents a BSON binary value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Binary {
    /// The subtype of the bytes.
    pub subtype: BinarySubtype,

    /// The binary bytes.
    pub bytes: Vec<u8>,
}

impl Display for Binary {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        write!(
            fmt,
            "Binary({:#x}, {})",
            u8::from(self.subtype),
            base64::encode(&self.bytes)
        )
    }
}

impl Binary {
    /// Creates a [`Binary`] from a base64 string and optional [`BinarySubtype`]. If the
    /// `subtype` argument is [`None`], the [`Binary`] constructed will default to
    /// [`BinarySubtype::Generic`].
    ///
    /// ```rust
    /// # use mongo_extjson::{Binary, error::Result};
    /// # fn example() -> Result<()> {
    /// let binary = Binary::from_base64("aGVsbG8=", None)?;
    /// assert_eq!(binary.bytes, b"hello");
    /// # Ok(())
    /// # }
    /// # example().unwrap();
    /// ```
    pub fn from_base64(
        input: impl AsRef<str>,
        subtype: impl Into<Option<BinarySubtype>>,
    ) -> Result<Self> {
        let bytes = base64::decode(input.as_ref())?;
        let subtype = subtype.into().unwrap_or(BinarySubtype::Generic);
        Ok(Binary { subtype, bytes })
    }

    /// The payload as standard, padded base64.
    pub fn to_base64(&self) -> String {
        base64::encode(&self.bytes)
    }

    /// Whether this value is a UUID that renders as a shell UUID constructor: a UUID subtype
    /// with a 16-byte payload.
    pub(crate) fn is_uuid_literal(&self) -> bool {
        self.subtype.is_uuid() && self.bytes.len() == 16
    }
}
