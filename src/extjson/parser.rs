//! A single-pass recursive-descent parser for shell-flavored extended JSON.
//!
//! The parser walks the input bytes directly. Each value position tries the literal forms in a
//! fixed order (`{`, `[`, `new`, the shell constructors, `/`, quotes, keywords) and falls back to
//! a number. The first violation aborts the parse with a message and the byte offset at which
//! it was detected.

use crate::{
    Binary,
    Bson,
    DateTime,
    Document,
    base64,
    bson::{DbRef, JavaScriptCodeWithScope, Regex, Timestamp},
    error::{Error, Result},
    hexutil,
    oid::ObjectId,
    spec::BinarySubtype,
    uuid::{UuidEncoding, uuid_to_hex},
};

/// Field names that turn an object into a wrapped value such as `{ "$oid" : "..." }`.
const RESERVED_FIELDS: &[&str] = &[
    "$oid",
    "$binary",
    "$date",
    "$timestamp",
    "$regex",
    "$ref",
    "$undefined",
    "$code",
    "$minKey",
    "$maxKey",
];

const REGEX_OPTIONS: &[u8] = b"gims";

/// Nesting beyond this many objects and arrays is rejected instead of exhausting the stack.
const MAX_NESTING_DEPTH: usize = 256;

/// `isspace` in the C locale, which unlike [`u8::is_ascii_whitespace`] includes `\v`.
pub(crate) fn is_space(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\n' | 0x0b | 0x0c | b'\r')
}

fn is_field_start(b: u8) -> bool {
    b.is_ascii_alphabetic() || b == b'_' || b == b'$'
}

fn is_field_char(b: u8) -> bool {
    is_field_start(b) || b.is_ascii_digit()
}

pub(crate) struct Parser<'a> {
    bytes: &'a [u8],
    pos: usize,
    depth: usize,
}

impl<'a> Parser<'a> {
    /// Starts parsing `text` at byte offset `pos`. Offsets in errors are relative to the start
    /// of `text`.
    pub(crate) fn new(text: &'a str, pos: usize) -> Self {
        Self {
            bytes: text.as_bytes(),
            pos,
            depth: 0,
        }
    }

    pub(crate) fn offset(&self) -> usize {
        self.pos
    }

    fn error(&self, message: impl ToString) -> Error {
        Error::syntax(message, self.pos)
    }

    fn at_end(&self) -> bool {
        self.pos >= self.bytes.len()
    }

    fn skip_space(&mut self) {
        while self.bytes.get(self.pos).copied().is_some_and(is_space) {
            self.pos += 1;
        }
    }

    /// Position of the next non-space byte, without moving.
    fn next_token_start(&self) -> usize {
        let mut check = self.pos;
        while self.bytes.get(check).copied().is_some_and(is_space) {
            check += 1;
        }
        check
    }

    /// Whether `token` follows, after optional whitespace.
    fn peek(&self, token: &str) -> bool {
        let start = self.next_token_start();
        self.bytes
            .get(start..)
            .is_some_and(|rest| rest.starts_with(token.as_bytes()))
    }

    /// Consumes `token` and any whitespace before it, if `token` follows.
    fn accept(&mut self, token: &str) -> bool {
        if self.peek(token) {
            self.pos = self.next_token_start() + token.len();
            true
        } else {
            false
        }
    }

    fn expect(&mut self, token: &str, message: &str) -> Result<()> {
        if self.accept(token) {
            Ok(())
        } else {
            Err(self.error(message))
        }
    }

    /// Reads the next field name and checks that it is `expected`.
    fn accept_field(&mut self, expected: &str) -> bool {
        let start = self.pos;
        match self.field() {
            Ok(name) if name == expected => true,
            _ => {
                self.pos = start;
                false
            }
        }
    }

    fn enter(&mut self) -> Result<()> {
        if self.depth >= MAX_NESTING_DEPTH {
            return Err(self.error("Exceeded maximum nesting depth"));
        }
        self.depth += 1;
        Ok(())
    }

    fn leave(&mut self) {
        self.depth -= 1;
    }

    /// Parses the top-level object. Wrapped values such as `{ "$oid" : ... }` are rejected here,
    /// since the root must be a plain document.
    pub(crate) fn root(&mut self) -> Result<Document> {
        self.expect("{", "Expecting '{'")?;
        if self.accept("}") {
            return Ok(Document::new());
        }
        let first = self.field()?;
        if RESERVED_FIELDS.contains(&first.as_str()) {
            return Err(self.error(format!("Reserved field name in base object: {first}")));
        }
        self.enter()?;
        let doc = self.fields(first)?;
        self.leave();
        self.expect("}", "Expecting '}' or ','")?;
        Ok(doc)
    }

    fn value(&mut self) -> Result<Bson> {
        log::trace!("extended JSON value at offset {}", self.pos);

        if self.peek("{") {
            self.object()
        } else if self.peek("[") {
            self.array()
        } else if self.accept("new") {
            self.constructor()
        } else if self.accept("Date") {
            self.date()
        } else if self.accept("ISODate") {
            self.iso_date()
        } else if self.accept("NumberLong") {
            self.number_long()
        } else if self.accept("UUID") {
            self.uuid(BinarySubtype::Uuid, UuidEncoding::Default)
        } else if self.accept("LUUID") {
            self.uuid(BinarySubtype::UuidOld, UuidEncoding::Default)
        } else if self.accept("JUUID") {
            self.uuid(BinarySubtype::UuidOld, UuidEncoding::JavaLegacy)
        } else if self.accept("NUUID") || self.accept("CSUUID") {
            self.uuid(BinarySubtype::UuidOld, UuidEncoding::CSharpLegacy)
        } else if self.accept("PYUUID") {
            self.uuid(BinarySubtype::UuidOld, UuidEncoding::PythonLegacy)
        } else if self.accept("Timestamp") {
            self.timestamp()
        } else if self.accept("ObjectId") {
            self.object_id()
        } else if self.accept("Dbref") || self.accept("DBRef") {
            self.db_ref()
        } else if self.peek("/") {
            self.regex()
        } else if self.peek("\"") || self.peek("'") {
            Ok(Bson::String(self.quoted_string()?))
        } else if self.accept("true") {
            Ok(Bson::Boolean(true))
        } else if self.accept("false") {
            Ok(Bson::Boolean(false))
        } else if self.accept("null") {
            Ok(Bson::Null)
        } else if self.accept("undefined") {
            Ok(Bson::Undefined)
        } else if self.accept("NaN") {
            Ok(Bson::Double(f64::NAN))
        } else if self.accept("Infinity") {
            Ok(Bson::Double(f64::INFINITY))
        } else if self.accept("-Infinity") {
            Ok(Bson::Double(f64::NEG_INFINITY))
        } else {
            self.number()
        }
    }

    /// A nested object: either a plain document or one of the reserved wrappers.
    fn object(&mut self) -> Result<Bson> {
        self.expect("{", "Expecting '{'")?;
        if self.accept("}") {
            return Ok(Bson::Document(Document::new()));
        }
        self.enter()?;
        let first = self.field()?;
        let value = match first.as_str() {
            "$oid" => self.object_id_object()?,
            "$binary" => self.binary_object()?,
            "$date" => self.date_object()?,
            "$timestamp" => self.timestamp_object()?,
            "$regex" => self.regex_object()?,
            "$ref" => self.db_ref_object()?,
            "$undefined" => self.undefined_object()?,
            "$code" => self.code_object()?,
            "$minKey" => self.key_bound_object("$minKey", Bson::MinKey)?,
            "$maxKey" => self.key_bound_object("$maxKey", Bson::MaxKey)?,
            _ => Bson::Document(self.fields(first)?),
        };
        self.leave();
        self.expect("}", "Expecting '}' or ','")?;
        Ok(value)
    }

    /// The `: value` of the first field, then every further `, field : value` pair.
    fn fields(&mut self, first: String) -> Result<Document> {
        let mut doc = Document::new();
        self.expect(":", "Expecting ':'")?;
        let value = self.value()?;
        doc.append(first, value);

        while self.accept(",") {
            let name = self.field()?;
            self.expect(":", "Expecting ':'")?;
            let value = self.value()?;
            doc.append(name, value);
        }
        Ok(doc)
    }

    fn object_id_object(&mut self) -> Result<Bson> {
        self.expect(":", "Expected ':'")?;
        let id = self.quoted_string()?;
        self.object_id_from_hex(&id)
    }

    fn binary_object(&mut self) -> Result<Bson> {
        self.expect(":", "Expected ':'")?;
        let data = self.quoted_string()?;
        if data.len() % 4 != 0 {
            return Err(self.error("Invalid length base64 encoded string"));
        }
        if !base64::is_base64_string(&data) {
            return Err(self.error("Invalid character in base64 encoded string"));
        }
        let bytes =
            base64::decode(&data).map_err(|_| self.error("Invalid base64 encoded string"))?;

        self.expect(",", "Expected ','")?;
        if !self.accept_field("$type") {
            return Err(self.error("Expected second field name: \"$type\", in \"$binary\" object"));
        }
        self.expect(":", "Expected ':'")?;
        let subtype = self.quoted_string()?;
        let subtype = hexutil::from_hex_array::<1>(&subtype).ok_or_else(|| {
            self.error(
                "Argument of $type in $bindata object must be a hex string representation of a \
                 single byte",
            )
        })?;

        Ok(Bson::Binary(Binary {
            subtype: subtype[0].into(),
            bytes,
        }))
    }

    fn date_object(&mut self) -> Result<Bson> {
        self.expect(":", "Expected ':'")?;
        if self.peek("\"") || self.peek("'") {
            let text = self.quoted_string()?;
            let date =
                DateTime::parse_iso_str(&text).map_err(|_| self.error("Invalid date format"))?;
            return Ok(Bson::DateTime(date));
        }
        Ok(Bson::DateTime(DateTime::from_millis(self.millis()?)))
    }

    fn timestamp_object(&mut self) -> Result<Bson> {
        self.expect(":", "Expecting ':'")?;
        self.expect("{", "Expecting '{' to start \"$timestamp\" object")?;
        if !self.accept_field("t") {
            return Err(self.error("Expected field name \"t\" in \"$timestamp\" sub object"));
        }
        self.expect(":", "Expecting ':'")?;
        let time = self.timestamp_part("seconds")?;
        self.expect(",", "Expecting ','")?;
        if !self.accept_field("i") {
            return Err(self.error("Expected field name \"i\" in \"$timestamp\" sub object"));
        }
        self.expect(":", "Expecting ':'")?;
        let increment = self.timestamp_part("increment")?;
        self.expect("}", "Expecting '}'")?;
        Ok(Bson::Timestamp(Timestamp { time, increment }))
    }

    fn regex_object(&mut self) -> Result<Bson> {
        self.expect(":", "Expecting ':'")?;
        let pattern = self.quoted_string()?;
        let mut options = String::new();
        if self.accept(",") {
            if !self.accept_field("$options") {
                return Err(self.error("Expected field name: \"$options\" in \"$regex\" object"));
            }
            self.expect(":", "Expecting ':'")?;
            options = self.quoted_string()?;
            self.check_regex_options(&options)?;
        }
        Ok(Bson::RegularExpression(Regex { pattern, options }))
    }

    fn db_ref_object(&mut self) -> Result<Bson> {
        self.expect(":", "DBRef: Expecting ':'")?;
        let namespace = self.quoted_string()?;
        self.expect(",", "DBRef: Expecting ','")?;
        if !self.accept_field("$id") {
            return Err(self.error("DBRef: Expected field name: \"$id\" in \"$ref\" object"));
        }
        self.expect(":", "DBRef: Expecting ':'")?;
        let id = self.value()?;

        let mut db = None;
        if self.accept(",") {
            if !self.accept_field("$db") {
                return Err(self.error(
                    "DBRef: Expected optional field name: \"$db\" in \"DBRef\" object. Remove \
                     comma after $id field to make $db field optional",
                ));
            }
            self.expect(":", "DBRef: Expecting ':' after $db field")?;
            match self.value()? {
                Bson::String(name) => db = Some(name),
                _ => return Err(self.error("DBRef: $db field must be a string")),
            }
        }
        Ok(Bson::DbRef(DbRef {
            namespace,
            id: Box::new(id),
            db,
        }))
    }

    fn undefined_object(&mut self) -> Result<Bson> {
        self.expect(":", "Expecting ':'")?;
        if !self.accept("true") {
            return Err(self.error("Reserved field \"$undefined\" requires value of true"));
        }
        Ok(Bson::Undefined)
    }

    fn code_object(&mut self) -> Result<Bson> {
        self.expect(":", "Expecting ':'")?;
        let code = self.quoted_string()?;
        if !self.accept(",") {
            return Ok(Bson::JavaScriptCode(code));
        }
        if !self.accept_field("$scope") {
            return Err(self.error("Expected field name: \"$scope\" in \"$code\" object"));
        }
        self.expect(":", "Expecting ':'")?;
        if !self.peek("{") {
            return Err(self.error("Expecting '{' to start \"$scope\" object"));
        }
        match self.object()? {
            Bson::Document(scope) => Ok(Bson::JavaScriptCodeWithScope(JavaScriptCodeWithScope {
                code,
                scope,
            })),
            _ => Err(self.error("Argument of \"$scope\" must be a plain object")),
        }
    }

    fn key_bound_object(&mut self, name: &str, value: Bson) -> Result<Bson> {
        self.expect(":", "Expecting ':'")?;
        if !self.accept("1") {
            return Err(self.error(format!("Reserved field \"{name}\" requires value of 1")));
        }
        Ok(value)
    }

    fn array(&mut self) -> Result<Bson> {
        self.expect("[", "Expecting '['")?;
        self.enter()?;
        let mut elements = Vec::new();
        if !self.peek("]") {
            loop {
                elements.push(self.value()?);
                if !self.accept(",") {
                    break;
                }
            }
        }
        self.leave();
        self.expect("]", "Expecting ']' or ','")?;
        Ok(Bson::Array(elements))
    }

    fn constructor(&mut self) -> Result<Bson> {
        if self.accept("Date") {
            self.date()
        } else {
            Err(self.error("\"new\" keyword not followed by Date constructor"))
        }
    }

    fn date(&mut self) -> Result<Bson> {
        self.expect("(", "Expecting '('")?;
        let millis = self.millis()?;
        self.expect(")", "Expecting ')'")?;
        Ok(Bson::DateTime(DateTime::from_millis(millis)))
    }

    fn iso_date(&mut self) -> Result<Bson> {
        self.expect("(", "Expecting '('")?;
        let text = self.quoted_string()?;
        let date = DateTime::parse_iso_str(&text).map_err(|_| self.error("Invalid date format"))?;
        self.expect(")", "Expecting ')'")?;
        Ok(Bson::DateTime(date))
    }

    fn number_long(&mut self) -> Result<Bson> {
        self.expect("(", "Expecting '('")?;
        let value = if self.peek("\"") || self.peek("'") {
            let text = self.quoted_string()?;
            text.trim()
                .parse::<i64>()
                .map_err(|_| self.error("Bad characters in value"))?
        } else {
            self.skip_space();
            let (double_end, _) = self.scan_double()?;
            match self.scan_integer() {
                Some((integer_end, Some(value))) if integer_end >= double_end => {
                    self.pos = double_end;
                    value
                }
                _ => {
                    return Err(self.error(
                        "The number either had characters only meaningful for a double or \
                         could not fit in a 64 bit int",
                    ));
                }
            }
        };
        if self.at_end() {
            return Err(self.error("Trailing number at end of input"));
        }
        self.expect(")", "Expecting ')'")?;
        Ok(Bson::Int64(value))
    }

    fn uuid(&mut self, subtype: BinarySubtype, encoding: UuidEncoding) -> Result<Bson> {
        self.expect("(", "Expecting '('")?;
        let text = self.quoted_string()?;
        let hex = uuid_to_hex(&text, encoding);
        let bytes = hexutil::from_hex(&hex)
            .filter(|_| !hex.is_empty())
            .ok_or_else(|| self.error("Invalid hex string for UUID"))?;
        self.expect(")", "Expecting ')'")?;
        Ok(Bson::Binary(Binary { subtype, bytes }))
    }

    fn timestamp(&mut self) -> Result<Bson> {
        self.expect("(", "Expecting '('")?;
        let time = self.timestamp_part("seconds")?;
        self.expect(",", "Expecting ','")?;
        let increment = self.timestamp_part("increment")?;
        self.expect(")", "Expecting ')'")?;
        Ok(Bson::Timestamp(Timestamp { time, increment }))
    }

    fn object_id(&mut self) -> Result<Bson> {
        self.expect("(", "Expecting '('")?;
        let id = self.quoted_string()?;
        self.expect(")", "Expecting ')'")?;
        self.object_id_from_hex(&id)
    }

    fn object_id_from_hex(&self, id: &str) -> Result<Bson> {
        if id.len() != 24 {
            return Err(self.error(format!("Expecting 24 hex digits: {id}")));
        }
        let bytes = hexutil::from_hex_array::<12>(id)
            .ok_or_else(|| self.error(format!("Expecting hex digits: {id}")))?;
        Ok(Bson::ObjectId(ObjectId::from_bytes(bytes)))
    }

    fn db_ref(&mut self) -> Result<Bson> {
        self.expect("(", "Expecting '('")?;
        let namespace = self.quoted_string()?;
        self.expect(",", "Expecting ','")?;
        let id = self.value()?;
        let db = if self.accept(",") {
            Some(self.quoted_string()?)
        } else {
            None
        };
        self.expect(")", "Expecting ')'")?;
        Ok(Bson::DbRef(DbRef {
            namespace,
            id: Box::new(id),
            db,
        }))
    }

    fn regex(&mut self) -> Result<Bson> {
        self.expect("/", "Expecting '/'")?;
        let pattern = self.chars(b'/')?;
        self.expect("/", "Expecting '/'")?;

        let start = self.pos;
        while self
            .bytes
            .get(self.pos)
            .is_some_and(|b| b.is_ascii_alphabetic())
        {
            self.pos += 1;
        }
        let options = String::from_utf8_lossy(&self.bytes[start..self.pos]).into_owned();
        self.check_regex_options(&options)?;
        Ok(Bson::RegularExpression(Regex { pattern, options }))
    }

    fn check_regex_options(&self, options: &str) -> Result<()> {
        let bad = options
            .chars()
            .find(|c| !c.is_ascii() || !REGEX_OPTIONS.contains(&(*c as u8)));
        match bad {
            Some(c) => Err(self.error(format!("Bad regex option: {c}"))),
            None => Ok(()),
        }
    }

    /// A field name: a quoted string or a bare `[A-Za-z_$][A-Za-z0-9_$]*` identifier.
    fn field(&mut self) -> Result<String> {
        if self.peek("\"") || self.peek("'") {
            return self.quoted_string();
        }
        self.skip_space();
        match self.bytes.get(self.pos) {
            None => return Err(self.error("Field name expected")),
            Some(&b) if !is_field_start(b) => {
                return Err(self.error("First character in field must be [A-Za-z$_]"));
            }
            Some(_) => {}
        }
        let start = self.pos;
        while self.bytes.get(self.pos).copied().is_some_and(is_field_char) {
            self.pos += 1;
        }
        if self.at_end() {
            return Err(self.error("Unexpected end of input"));
        }
        self.into_string(self.bytes[start..self.pos].to_vec())
    }

    fn quoted_string(&mut self) -> Result<String> {
        let quote = if self.accept("\"") {
            b'"'
        } else if self.accept("'") {
            b'\''
        } else {
            return Err(self.error("Expecting quoted string"));
        };
        let s = self.chars(quote)?;
        if quote == b'"' {
            self.expect("\"", "Expecting '\"'")?;
        } else {
            self.expect("'", "Expecting '''")?;
        }
        Ok(s)
    }

    /// The body of a quoted string or regex literal, up to (not including) `terminal`, with
    /// escapes decoded.
    fn chars(&mut self, terminal: u8) -> Result<String> {
        if self.at_end() {
            return Err(self.error("Unexpected end of input"));
        }
        let mut out = Vec::new();
        while let Some(&b) = self.bytes.get(self.pos) {
            if b == terminal {
                return self.into_string(out);
            }
            if b <= 0x1f {
                return Err(self.error("Invalid control character"));
            }
            if b != b'\\' || self.pos + 1 >= self.bytes.len() {
                out.push(b);
                self.pos += 1;
                continue;
            }

            self.pos += 1;
            let escaped = self.bytes[self.pos];
            match escaped {
                b'"' | b'\'' | b'\\' | b'/' => out.push(escaped),
                b'b' => out.push(0x08),
                b'f' => out.push(0x0c),
                b'n' => out.push(b'\n'),
                b'r' => out.push(b'\r'),
                b't' => out.push(b'\t'),
                b'v' => out.push(0x0b),
                b'u' => {
                    let c = self.unicode_escape()?;
                    let mut buf = [0; 4];
                    out.extend_from_slice(c.encode_utf8(&mut buf).as_bytes());
                    // leave the cursor on the last hex digit
                    self.pos += 3;
                }
                b'x' => return Err(self.error("Hex escape not supported")),
                b'0'..=b'7' => return Err(self.error("Octal escape not supported")),
                other => out.push(other),
            }
            self.pos += 1;
        }
        Err(self.error("Unexpected end of input"))
    }

    /// Decodes the four hex digits after `\u`, with the cursor on the `u`.
    fn unicode_escape(&mut self) -> Result<char> {
        self.pos += 1;
        let digits = self
            .bytes
            .get(self.pos..self.pos + 4)
            .filter(|_| self.pos + 4 < self.bytes.len())
            .and_then(|d| std::str::from_utf8(d).ok())
            .filter(|d| hexutil::is_hex_string(d))
            .ok_or_else(|| self.error("Expecting 4 hex digits"))?;
        let code =
            u32::from_str_radix(digits, 16).map_err(|_| self.error("Expecting 4 hex digits"))?;
        char::from_u32(code).ok_or_else(|| self.error("Invalid \\u escape: lone surrogate"))
    }

    fn into_string(&self, bytes: Vec<u8>) -> Result<String> {
        String::from_utf8(bytes).map_err(|_| self.error("Invalid UTF-8"))
    }

    /// A signed 64-bit millisecond count, as read by `Date(...)` and `$date`.
    fn millis(&mut self) -> Result<i64> {
        self.skip_space();
        match self.scan_integer() {
            None => Err(self.error("Date expecting integer milliseconds")),
            Some((_, None)) => Err(self.error("Date milliseconds overflow")),
            Some((end, Some(millis))) => {
                self.pos = end;
                Ok(millis)
            }
        }
    }

    /// An unsigned 32-bit timestamp component.
    fn timestamp_part(&mut self, what: &str) -> Result<u32> {
        if self.accept("-") {
            return Err(self.error(format!("Negative {what} in \"$timestamp\"")));
        }
        self.skip_space();
        let start = self.pos;
        let mut end = start;
        if self.bytes.get(end) == Some(&b'+') {
            end += 1;
        }
        let digits_start = end;
        while self.bytes.get(end).is_some_and(u8::is_ascii_digit) {
            end += 1;
        }
        if end == digits_start {
            return Err(self.error(format!("Expecting unsigned integer {what} in \"$timestamp\"")));
        }
        let value = std::str::from_utf8(&self.bytes[digits_start..end])
            .ok()
            .and_then(|digits| digits.parse::<u32>().ok())
            .ok_or_else(|| self.error(format!("Timestamp {what} overflow")))?;
        self.pos = end;
        Ok(value)
    }

    /// Scans `[+-]?digits` from the cursor. Returns the end offset and the value, which is `None`
    /// on overflow, or `None` overall if there are no digits.
    fn scan_integer(&self) -> Option<(usize, Option<i64>)> {
        let start = self.pos;
        let mut end = start;
        if matches!(self.bytes.get(end), Some(b'+' | b'-')) {
            end += 1;
        }
        let digits_start = end;
        while self.bytes.get(end).is_some_and(u8::is_ascii_digit) {
            end += 1;
        }
        if end == digits_start {
            return None;
        }
        let value = std::str::from_utf8(&self.bytes[start..end])
            .ok()
            .and_then(|s| s.parse::<i64>().ok());
        Some((end, value))
    }

    /// Scans a decimal floating point literal from the cursor:
    /// `[+-]?(digits[.digits?]|.digits)([eE][+-]?digits)?`.
    fn scan_double(&self) -> Result<(usize, f64)> {
        let bytes = self.bytes;
        let digits_from = |mut i: usize| {
            while bytes.get(i).is_some_and(u8::is_ascii_digit) {
                i += 1;
            }
            i
        };

        let start = self.pos;
        let mut end = start;
        if matches!(bytes.get(end), Some(b'+' | b'-')) {
            end += 1;
        }
        let int_end = digits_from(end);
        let mut mantissa_digits = int_end - end;
        end = int_end;
        if bytes.get(end) == Some(&b'.') {
            let frac_end = digits_from(end + 1);
            mantissa_digits += frac_end - (end + 1);
            if mantissa_digits > 0 {
                end = frac_end;
            }
        }
        if mantissa_digits == 0 {
            return Err(self.error("Bad characters in value"));
        }
        if matches!(bytes.get(end), Some(b'e' | b'E')) {
            let mut exp = end + 1;
            if matches!(bytes.get(exp), Some(b'+' | b'-')) {
                exp += 1;
            }
            let exp_end = digits_from(exp);
            if exp_end > exp {
                end = exp_end;
            }
        }

        let value = std::str::from_utf8(&bytes[start..end])
            .ok()
            .and_then(|s| s.parse::<f64>().ok())
            .ok_or_else(|| self.error("Bad characters in value"))?;
        if value.is_infinite() {
            return Err(self.error("Value cannot fit in double"));
        }
        Ok((end, value))
    }

    /// A bare number. Integers that fit in 32 bits become `Int32`, larger ones `Int64`, and
    /// anything with a fraction or exponent, or too large for 64 bits, becomes a `Double`.
    fn number(&mut self) -> Result<Bson> {
        self.skip_space();
        let (double_end, double) = self.scan_double()?;
        let value = match self.scan_integer() {
            Some((integer_end, Some(integer))) if integer_end >= double_end => {
                match i32::try_from(integer) {
                    Ok(small) => Bson::Int32(small),
                    Err(_) => Bson::Int64(integer),
                }
            }
            _ => Bson::Double(double),
        };
        self.pos = double_end;
        if self.at_end() {
            return Err(self.error("Trailing number at end of input"));
        }
        Ok(value)
    }
}

/// Parses a single extended JSON document from `text`, consuming all of it.
///
/// Whitespace may surround the document; anything else after the closing brace is an error. An
/// empty string parses as an empty document.
///
/// ```
/// use mongo_extjson::{from_json, Bson};
///
/// let doc = from_json(r#"{ "_id" : ObjectId("507f1f77bcf86cd799439011"), n : NumberLong(5) }"#)?;
/// assert_eq!(doc.get("n"), Some(&Bson::Int64(5)));
/// # Ok::<(), mongo_extjson::error::Error>(())
/// ```
pub fn from_json(text: &str) -> Result<Document> {
    let (doc, consumed) = from_json_prefix(text)?;
    let mut parser = Parser::new(text, consumed);
    parser.skip_space();
    if !parser.at_end() {
        let err = parser.error("Unexpected characters after end of document");
        log::debug!("extended JSON parse failed: {err}");
        return Err(err);
    }
    Ok(doc)
}

/// Parses the extended JSON document at the start of `text` and returns it together with the
/// number of bytes it occupied. Whatever follows the closing brace is left unread.
pub fn from_json_prefix(text: &str) -> Result<(Document, usize)> {
    if text.is_empty() {
        return Ok((Document::new(), 0));
    }
    parse_root_at(text, 0)
}

/// Parses every extended JSON document in `text`, laid out one after another with optional
/// whitespace between them. Error offsets are relative to the start of `text`.
///
/// ```
/// let docs = mongo_extjson::from_json_many("{ a : 1 }\n{ b : 2 }\n")?;
/// assert_eq!(docs.len(), 2);
/// # Ok::<(), mongo_extjson::error::Error>(())
/// ```
pub fn from_json_many(text: &str) -> Result<Vec<Document>> {
    let mut docs = Vec::new();
    let mut offset = 0;
    loop {
        let mut parser = Parser::new(text, offset);
        parser.skip_space();
        if parser.at_end() {
            return Ok(docs);
        }
        let (doc, end) = parse_root_at(text, parser.offset())?;
        docs.push(doc);
        offset = end;
    }
}

fn parse_root_at(text: &str, start: usize) -> Result<(Document, usize)> {
    let mut parser = Parser::new(text, start);
    match parser.root() {
        Ok(doc) => Ok((doc, parser.offset())),
        Err(err) => {
            log::debug!("extended JSON parse failed: {err}");
            Err(err)
        }
    }
}
