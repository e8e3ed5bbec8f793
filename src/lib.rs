// The MIT License (MIT)

// Copyright (c) 2015 Y. T. Chung <zonyitoo@gmail.com>

// Permission is hereby granted, free of charge, to any person obtaining a copy of
// this software and associated documentation files (the "Software"), to deal in
// the Software without restriction, including without limitation the rights to
// use, copy, modify, merge, publish, distribute, sublicense, and/or sell copies of
// the Software, and to permit persons to whom the Software is furnished to do so,
// subject to the following conditions:

// The above copyright notice and this permission notice shall be included in all
// copies or substantial portions of the Software.

// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
// IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY, FITNESS
// FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR
// COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER
// IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN
// CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

//! A codec for the extended JSON dialect spoken by the MongoDB shell.
//!
//! The shell prints and accepts a superset of JSON in which BSON values that plain JSON cannot
//! express are written as constructor literals (`ObjectId("...")`, `ISODate("...")`,
//! `NumberLong(...)`, `UUID("...")`, `/regex/flags`) or as `$`-prefixed wrapper objects
//! (`{ "$oid" : "..." }`). This crate parses that text into an in-memory [`Document`], renders
//! documents back in either the shell's own notation or strict JSON, and converts UUIDs between
//! the byte orders used by the legacy Java, C# and Python drivers.
//!
//! ## Basic usage
//!
//! ```rust
//! use mongo_extjson::{doc, extjson::JsonStringFormat, from_json, to_json_string, uuid::UuidEncoding};
//!
//! let doc = from_json(r#"{ "name" : "widget", "qty" : NumberLong(12), tags : [ "a", "b" ] }"#)?;
//! assert_eq!(doc, doc! { "name": "widget", "qty": 12i64, "tags": ["a", "b"] });
//!
//! let text = to_json_string(&doc, JsonStringFormat::TenGen, 0, UuidEncoding::Default);
//! assert_eq!(text, r#"{ "name" : "widget", "qty" : NumberLong(12), "tags" : [ "a", "b" ] }"#);
//! # Ok::<(), mongo_extjson::error::Error>(())
//! ```
//!
//! Syntax errors carry the byte offset at which parsing stopped:
//!
//! ```rust
//! let err = mongo_extjson::from_json(r#"{ "a" : ObjectId("1234") }"#).unwrap_err();
//! assert_eq!(err.offset(), Some(24));
//! ```

pub use self::{
    binary::Binary,
    bson::{Array, Bson, DbRef, JavaScriptCodeWithScope, Regex, Timestamp},
    datetime::DateTime,
    document::Document,
    extjson::{
        JsonOptions,
        JsonStringFormat,
        from_json,
        from_json_many,
        from_json_prefix,
        to_json_string,
    },
    uuid::UuidEncoding,
};

#[macro_use]
pub mod macros;
mod base64;
mod binary;
mod bson;
pub mod datetime;
mod document;
pub mod error;
pub mod extjson;
pub mod hexutil;
pub mod oid;
pub mod spec;
pub mod uuid;
