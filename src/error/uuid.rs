use thiserror::Error as ThisError;

use crate::{
    error::{Error, ErrorKind},
    spec::BinarySubtype,
};

/// The kinds of errors that can occur when converting UUID text or UUID-subtyped binaries.
#[derive(Clone, Debug, ThisError)]
#[non_exhaustive]
pub enum UuidErrorKind {
    /// A string that does not hold 32 hex digits (after removing `{`, `}` and `-`) was used as
    /// a UUID.
    #[error("invalid UUID string")]
    #[non_exhaustive]
    InvalidString {},

    /// A binary value with a subtype other than `UuidOld` (3) or `Uuid` (4) was formatted as a
    /// UUID.
    #[error("binary subtype {subtype:?} is not a UUID subtype")]
    #[non_exhaustive]
    UnsupportedSubtype {
        /// The subtype of the binary value.
        subtype: BinarySubtype,
    },

    /// A UUID-subtyped binary value did not contain exactly 16 bytes.
    #[error("expected length of 16 bytes, got {length}")]
    #[non_exhaustive]
    InvalidLength {
        /// The actual length of the data.
        length: usize,
    },
}

impl Error {
    pub(crate) fn invalid_uuid_string(message: impl ToString) -> Self {
        Self::from(ErrorKind::Uuid {
            kind: UuidErrorKind::InvalidString {},
        })
        .with_message(message)
    }

    pub(crate) fn unsupported_uuid_subtype(subtype: BinarySubtype) -> Self {
        ErrorKind::Uuid {
            kind: UuidErrorKind::UnsupportedSubtype { subtype },
        }
        .into()
    }

    pub(crate) fn invalid_uuid_length(length: usize) -> Self {
        ErrorKind::Uuid {
            kind: UuidErrorKind::InvalidLength { length },
        }
        .into()
    }
}
