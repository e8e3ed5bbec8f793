//! Rendering of documents and values as shell-flavored extended JSON.

use std::fmt::{self, Display, Formatter, Write};

use crate::{
    Binary,
    Bson,
    DateTime,
    Document,
    bson::{DbRef, Regex, Timestamp},
    extjson::JsonStringFormat,
    uuid::{UuidEncoding, format_uuid},
};

const INDENT: &str = "    ";

/// Renders `doc` as extended JSON in the given dialect.
///
/// A `pretty` level of 0 renders the document on one line, as in `{ "a" : 1, "b" : "x" }`. A
/// level of 1 or more puts every field on its own line, indented by four spaces per level, with
/// nested documents and arrays one level deeper. Legacy UUIDs (binary subtype 3) are read in
/// `uuid_encoding` byte order.
///
/// ```
/// use mongo_extjson::{doc, extjson::{to_json_string, JsonStringFormat}, uuid::UuidEncoding};
///
/// let doc = doc! { "a": 1, "b": "x" };
/// assert_eq!(
///     to_json_string(&doc, JsonStringFormat::TenGen, 1, UuidEncoding::Default),
///     "{\n    \"a\" : 1,\n    \"b\" : \"x\"\n}"
/// );
/// ```
pub fn to_json_string(
    doc: &Document,
    format: JsonStringFormat,
    pretty: usize,
    uuid_encoding: UuidEncoding,
) -> String {
    Rendered {
        item: Item::Document(doc),
        format,
        pretty,
        uuid_encoding,
    }
    .to_string()
}

/// Renders a single value as extended JSON, as it would appear as a field value inside
/// [`to_json_string`] output.
pub fn value_to_json_string(
    value: &Bson,
    format: JsonStringFormat,
    pretty: usize,
    uuid_encoding: UuidEncoding,
) -> String {
    Rendered {
        item: Item::Value(value),
        format,
        pretty,
        uuid_encoding,
    }
    .to_string()
}

/// Writes `s` escaped for use inside a double-quoted JSON string.
///
/// Quotes, backslashes and control characters are escaped. With `escape_slash`, `/` is written as
/// `\/` too. Everything else, non-ASCII text included, is copied unchanged.
fn write_escaped(out: &mut impl Write, s: &str, escape_slash: bool) -> fmt::Result {
    for c in s.chars() {
        match c {
            '"' => out.write_str("\\\"")?,
            '\\' => out.write_str("\\\\")?,
            '/' if escape_slash => out.write_str("\\/")?,
            '\u{08}' => out.write_str("\\b")?,
            '\u{0c}' => out.write_str("\\f")?,
            '\n' => out.write_str("\\n")?,
            '\r' => out.write_str("\\r")?,
            '\t' => out.write_str("\\t")?,
            c if c <= '\u{1f}' => write!(out, "\\u{:04x}", c as u32)?,
            c => out.write_char(c)?,
        }
    }
    Ok(())
}

/// Formats a double with up to 16 significant digits, in the manner of `printf("%.16g")`.
///
/// Integral values keep a `.0` suffix so that they read back as doubles rather than integers.
pub(crate) fn format_double(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        let s = if value > 0.0 { "Infinity" } else { "-Infinity" };
        return s.to_string();
    }

    const PRECISION: i32 = 16;
    let sci = format!("{:.*e}", (PRECISION - 1) as usize, value);
    let (mantissa, exponent) = match sci.split_once('e') {
        Some((m, e)) => (m, e.parse::<i32>().unwrap_or(0)),
        None => (sci.as_str(), 0),
    };

    let mut out = if exponent < -4 || exponent >= PRECISION {
        let sign = if exponent < 0 { '-' } else { '+' };
        format!(
            "{}e{}{:02}",
            trim_fraction(mantissa),
            sign,
            exponent.unsigned_abs()
        )
    } else {
        let decimals = (PRECISION - 1 - exponent) as usize;
        trim_fraction(&format!("{value:.decimals$}")).to_string()
    };

    if out.bytes().all(|b| b.is_ascii_digit() || b == b'-') {
        out.push_str(".0");
    }
    out
}

/// Strips trailing zeros after a decimal point, and the point itself if nothing follows it.
fn trim_fraction(s: &str) -> &str {
    if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.')
    } else {
        s
    }
}

enum Item<'a> {
    Document(&'a Document),
    Value(&'a Bson),
}

/// A document or value together with the options it is rendered with.
struct Rendered<'a> {
    item: Item<'a>,
    format: JsonStringFormat,
    pretty: usize,
    uuid_encoding: UuidEncoding,
}

impl Display for Rendered<'_> {
    fn fmt(&self, fmt: &mut Formatter<'_>) -> fmt::Result {
        let mut writer = Writer {
            out: fmt,
            format: self.format,
            uuid_encoding: self.uuid_encoding,
        };
        match self.item {
            Item::Document(doc) => writer.document(doc, self.pretty),
            Item::Value(value) => writer.value(value, self.pretty),
        }
    }
}

struct Writer<'a, 'f> {
    out: &'a mut Formatter<'f>,
    format: JsonStringFormat,
    uuid_encoding: UuidEncoding,
}

impl Writer<'_, '_> {
    fn tengen(&self) -> bool {
        self.format == JsonStringFormat::TenGen
    }

    fn newline(&mut self, level: usize) -> fmt::Result {
        self.out.write_char('\n')?;
        for _ in 0..level {
            self.out.write_str(INDENT)?;
        }
        Ok(())
    }

    fn string(&mut self, s: &str) -> fmt::Result {
        self.out.write_char('"')?;
        write_escaped(&mut *self.out, s, false)?;
        self.out.write_char('"')
    }

    /// Writes `len` items between `open` and `close`, laid out for the given `pretty` level.
    fn container(
        &mut self,
        open: char,
        close: char,
        len: usize,
        pretty: usize,
        mut item: impl FnMut(&mut Self, usize, usize) -> fmt::Result,
    ) -> fmt::Result {
        if len == 0 {
            self.out.write_char(open)?;
            return self.out.write_char(close);
        }

        let nested = if pretty > 0 { pretty + 1 } else { 0 };
        self.out.write_char(open)?;
        for index in 0..len {
            if index > 0 {
                self.out.write_char(',')?;
            }
            if pretty > 0 {
                self.newline(pretty)?;
            } else {
                self.out.write_char(' ')?;
            }
            item(self, index, nested)?;
        }
        if pretty > 0 {
            self.newline(pretty - 1)?;
        } else {
            self.out.write_char(' ')?;
        }
        self.out.write_char(close)
    }

    fn document(&mut self, doc: &Document, pretty: usize) -> fmt::Result {
        let mut fields = doc.iter();
        self.container('{', '}', doc.len(), pretty, |w, _, nested| {
            match fields.next() {
                Some((key, value)) => {
                    w.string(key)?;
                    w.out.write_str(" : ")?;
                    w.value(value, nested)
                }
                None => Ok(()),
            }
        })
    }

    fn array(&mut self, values: &[Bson], pretty: usize) -> fmt::Result {
        self.container('[', ']', values.len(), pretty, |w, index, nested| {
            w.value(&values[index], nested)
        })
    }

    fn value(&mut self, value: &Bson, pretty: usize) -> fmt::Result {
        match value {
            Bson::Double(v) => self.out.write_str(&format_double(*v)),
            Bson::String(s) | Bson::Symbol(s) => self.string(s),
            Bson::Array(values) => self.array(values, pretty),
            Bson::Document(doc) => self.document(doc, pretty),
            Bson::Boolean(b) => self.out.write_str(if *b { "true" } else { "false" }),
            Bson::Null => self.out.write_str("null"),
            Bson::Undefined => self.out.write_str("undefined"),
            Bson::RegularExpression(regex) => self.regex(regex),
            Bson::JavaScriptCode(code) => {
                self.out.write_str("{ \"$code\" : ")?;
                self.string(code)?;
                self.out.write_str(" }")
            }
            Bson::JavaScriptCodeWithScope(code_with_scope) => {
                self.out.write_str("{ \"$code\" : ")?;
                self.string(&code_with_scope.code)?;
                self.out.write_str(", \"$scope\" : ")?;
                self.document(&code_with_scope.scope, 0)?;
                self.out.write_str(" }")
            }
            Bson::Int32(v) => write!(self.out, "{v}"),
            Bson::Int64(v) if self.tengen() => write!(self.out, "NumberLong({v})"),
            Bson::Int64(v) => write!(self.out, "{v}"),
            Bson::Timestamp(ts) => self.timestamp(*ts),
            Bson::Binary(binary) => self.binary(binary),
            Bson::ObjectId(oid) if self.tengen() => write!(self.out, "ObjectId(\"{oid}\")"),
            Bson::ObjectId(oid) => write!(self.out, "{{ \"$oid\" : \"{oid}\" }}"),
            Bson::DateTime(date) => self.datetime(*date),
            Bson::MaxKey => self.out.write_str("{ \"$maxKey\" : 1 }"),
            Bson::MinKey => self.out.write_str("{ \"$minKey\" : 1 }"),
            Bson::DbRef(db_ref) => self.db_ref(db_ref),
        }
    }

    fn regex(&mut self, regex: &Regex) -> fmt::Result {
        if self.tengen() {
            self.out.write_char('/')?;
            write_escaped(&mut *self.out, &regex.pattern, true)?;
            self.out.write_char('/')?;
            for flag in regex.options.chars().filter(|c| matches!(c, 'g' | 'i' | 'm')) {
                self.out.write_char(flag)?;
            }
            Ok(())
        } else {
            self.out.write_str("{ \"$regex\" : ")?;
            self.string(&regex.pattern)?;
            self.out.write_str(", \"$options\" : ")?;
            self.string(&regex.options)?;
            self.out.write_str(" }")
        }
    }

    fn timestamp(&mut self, ts: Timestamp) -> fmt::Result {
        let Timestamp { time, increment } = ts;
        if self.tengen() {
            write!(self.out, "Timestamp({time}, {increment})")
        } else {
            write!(
                self.out,
                "{{ \"$timestamp\" : {{ \"t\" : {time}, \"i\" : {increment} }} }}"
            )
        }
    }

    fn binary(&mut self, binary: &Binary) -> fmt::Result {
        if binary.is_uuid_literal() {
            if let Ok(uuid) = format_uuid(binary, self.uuid_encoding) {
                return self.out.write_str(&uuid);
            }
        }
        write!(
            self.out,
            "{{ \"$binary\" : \"{}\", \"$type\" : \"{:02x}\" }}",
            binary.to_base64(),
            u8::from(binary.subtype)
        )
    }

    fn datetime(&mut self, date: DateTime) -> fmt::Result {
        let millis = date.timestamp_millis();
        match (date.to_iso_string(), self.tengen()) {
            (Some(iso), true) => write!(self.out, "ISODate(\"{iso}\")"),
            (Some(iso), false) => write!(self.out, "{{ \"$date\" : \"{iso}\" }}"),
            (None, true) => write!(self.out, "Date({millis})"),
            (None, false) => write!(self.out, "{{ \"$date\" : {millis} }}"),
        }
    }

    fn db_ref(&mut self, db_ref: &DbRef) -> fmt::Result {
        let (open, id, db) = if self.tengen() {
            ("DBRef(", ", ", ", ")
        } else {
            ("{ \"$ref\" : ", ", \"$id\" : ", ", \"$db\" : ")
        };
        self.out.write_str(open)?;
        self.string(&db_ref.namespace)?;
        self.out.write_str(id)?;
        self.value(&db_ref.id, 0)?;
        if let Some(name) = &db_ref.db {
            self.out.write_str(db)?;
            self.string(name)?;
        }
        self.out.write_str(if self.tengen() { ")" } else { " }" })
    }
}
