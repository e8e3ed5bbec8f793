//! Parsing and rendering of MongoDB shell-flavored extended JSON.
//!
//! ## Overview
//!
//! Plain JSON cannot say whether `5` is a 32-bit or a 64-bit integer, or that a string is really
//! an ObjectId. The MongoDB shell extends JSON with constructor literals and `$`-prefixed wrapper
//! objects that carry this type information:
//!
//! ```text
//! {
//!     "_id" : ObjectId("507f1f77bcf86cd799439011"),
//!     "count" : NumberLong(5),
//!     "when" : ISODate("2012-12-19T06:01:17.171Z"),
//!     "key" : UUID("00112233-4455-6677-8899-aabbccddeeff"),
//!     "pattern" : /^ab+/i,
//!     "blob" : { "$binary" : "aGVsbG8=", "$type" : "00" }
//! }
//! ```
//!
//! [`from_json`] accepts both styles, mixed freely, along with unquoted field names,
//! single-quoted strings and the `NaN`/`Infinity`/`undefined` keywords.
//!
//! ## Dialects
//!
//! Output comes in one of two [`JsonStringFormat`]s:
//!   - [`JsonStringFormat::TenGen`] uses the shell constructors (`ObjectId(...)`, `ISODate(...)`,
//!     `NumberLong(...)`, `/pattern/flags`), which is how the shell itself prints documents.
//!   - [`JsonStringFormat::Strict`] only uses constructs valid in plain JSON, spelling typed values
//!     as wrapper objects such as `{ "$oid" : "..." }`.
//!
//! UUID-subtyped binaries are rendered as `UUID(...)` or one of the legacy constructors in both
//! dialects; see [`crate::uuid`].
//!
//! ```rust
//! use mongo_extjson::{extjson::{JsonOptions, JsonStringFormat}, from_json};
//!
//! let doc = from_json(r#"{ "a" : NumberLong(1), b : ObjectId("507f1f77bcf86cd799439011") }"#)?;
//!
//! let tengen = JsonOptions::default().format(JsonStringFormat::TenGen);
//! assert_eq!(
//!     tengen.to_json_string(&doc),
//!     r#"{ "a" : NumberLong(1), "b" : ObjectId("507f1f77bcf86cd799439011") }"#
//! );
//!
//! let strict = JsonOptions::default();
//! assert_eq!(
//!     strict.to_json_string(&doc),
//!     r#"{ "a" : 1, "b" : { "$oid" : "507f1f77bcf86cd799439011" } }"#
//! );
//! # Ok::<(), mongo_extjson::error::Error>(())
//! ```

mod parser;
mod ser;

pub use parser::{from_json, from_json_many, from_json_prefix};
pub use ser::{to_json_string, value_to_json_string};

use crate::{Bson, Document, uuid::UuidEncoding};

/// The dialect of extended JSON produced by the serializer.
#[derive(PartialEq, Eq, Clone, Copy, Debug, Default, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum JsonStringFormat {
    /// Strict JSON: typed values are spelled as `$`-prefixed wrapper objects.
    #[default]
    Strict,
    /// The mongo shell's notation, using constructor literals such as `ObjectId("...")`.
    TenGen,
}

/// Options for rendering documents as extended JSON.
///
/// The defaults are [`JsonStringFormat::Strict`], single-line output and
/// [`UuidEncoding::Default`].
#[derive(PartialEq, Eq, Clone, Copy, Debug, Default, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, rename_all = "camelCase"))]
#[non_exhaustive]
pub struct JsonOptions {
    /// The output dialect.
    pub format: JsonStringFormat,

    /// The indentation level. 0 renders everything on one line; 1 or more puts each field on its
    /// own line, indented four spaces per level.
    pub pretty: usize,

    /// The byte order assumed for legacy (subtype 3) UUIDs.
    pub uuid_encoding: UuidEncoding,
}

impl JsonOptions {
    /// Sets the output dialect.
    pub fn format(mut self, format: JsonStringFormat) -> Self {
        self.format = format;
        self
    }

    /// Sets the indentation level.
    pub fn pretty(mut self, pretty: usize) -> Self {
        self.pretty = pretty;
        self
    }

    /// Sets the byte order assumed for legacy UUIDs.
    pub fn uuid_encoding(mut self, uuid_encoding: UuidEncoding) -> Self {
        self.uuid_encoding = uuid_encoding;
        self
    }

    /// Renders `doc` with these options.
    pub fn to_json_string(&self, doc: &Document) -> String {
        to_json_string(doc, self.format, self.pretty, self.uuid_encoding)
    }

    /// Renders a single value with these options.
    pub fn value_to_json_string(&self, value: &Bson) -> String {
        value_to_json_string(value, self.format, self.pretty, self.uuid_encoding)
    }
}
