//! Contains the error-related types for the `mongo-extjson` crate.

mod datetime;
mod oid;
mod syntax;
mod uuid;
mod value_access;

use thiserror::Error;

pub use datetime::DateTimeErrorKind;
pub use oid::ObjectIdErrorKind;
pub use uuid::UuidErrorKind;
pub use value_access::ValueAccessErrorKind;

/// The result type for all methods that can return an error in the `mongo-extjson` crate.
pub type Result<T> = std::result::Result<T, Error>;

/// An error that can occur in the `mongo-extjson` crate.
#[derive(Clone, Debug, Error)]
#[non_exhaustive]
pub struct Error {
    /// The kind of error that occurred.
    pub kind: ErrorKind,

    /// An optional message describing the error.
    pub message: Option<String>,
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.kind)?;
        if let Some(message) = self.message.as_deref() {
            write!(f, ": {message}")?;
        }
        Ok(())
    }
}

/// The types of errors that can occur in the `mongo-extjson` crate.
#[derive(Clone, Debug, Error)]
#[non_exhaustive]
pub enum ErrorKind {
    /// The extended JSON text could not be parsed.
    #[error("{message} at offset {offset}")]
    #[non_exhaustive]
    Syntax {
        /// A description of what the parser expected.
        message: String,

        /// The byte offset into the input at which the failure was detected.
        offset: usize,
    },

    /// An error related to the [`ObjectId`](crate::oid::ObjectId) type occurred.
    #[error("an ObjectId-related error occurred: {kind}")]
    ObjectId {
        /// The kind of error that occurred.
        kind: ObjectIdErrorKind,
    },

    /// An error related to UUID text or UUID-subtyped binaries occurred.
    #[error("a UUID-related error occurred: {kind}")]
    Uuid {
        /// The kind of error that occurred.
        kind: UuidErrorKind,
    },

    /// An error related to the [`DateTime`](crate::DateTime) type occurred.
    #[error("a DateTime-related error occurred: {kind}")]
    DateTime {
        /// The kind of error that occurred.
        kind: DateTimeErrorKind,
    },

    /// Base64 binary data could not be decoded.
    #[error("invalid binary data: {message}")]
    #[non_exhaustive]
    Binary { message: String },

    /// An error occurred when attempting to access a value in a document.
    #[error("an error occurred when attempting to access a document value: {kind}")]
    ValueAccess {
        /// The kind of error that occurred.
        kind: ValueAccessErrorKind,
    },
}

impl From<ErrorKind> for Error {
    fn from(kind: ErrorKind) -> Self {
        Self {
            kind,
            message: None,
        }
    }
}

impl Error {
    pub(crate) fn with_message(mut self, message: impl ToString) -> Self {
        self.message = Some(message.to_string());
        self
    }

    pub(crate) fn binary(message: impl ToString) -> Self {
        ErrorKind::Binary {
            message: message.to_string(),
        }
        .into()
    }
}
