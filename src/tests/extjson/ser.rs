use pretty_assertions::assert_eq;

use crate::{
    Binary,
    Bson,
    DateTime,
    DbRef,
    JavaScriptCodeWithScope,
    JsonOptions,
    JsonStringFormat,
    Regex,
    Timestamp,
    extjson::value_to_json_string,
    from_json,
    oid::ObjectId,
    spec::BinarySubtype,
    to_json_string,
    uuid::UuidEncoding,
};

const OID: &str = "507f1f77bcf86cd799439011";
const CANONICAL_UUID: [u8; 16] = [
    0x00, 0x11, 0x22, 0x33, 0x44, 0x55, 0x66, 0x77, 0x88, 0x99, 0xaa, 0xbb, 0xcc, 0xdd, 0xee, 0xff,
];

fn tengen(value: impl Into<Bson>) -> String {
    value_to_json_string(&value.into(), JsonStringFormat::TenGen, 0, UuidEncoding::Default)
}

fn strict(value: impl Into<Bson>) -> String {
    value_to_json_string(&value.into(), JsonStringFormat::Strict, 0, UuidEncoding::Default)
}

fn oid() -> ObjectId {
    ObjectId::parse_str(OID).unwrap()
}

#[test]
fn compact_layout() {
    let doc = doc! { "a": 1, "b": "x", "c": [1, 2], "d": {}, "e": [] };
    assert_eq!(
        to_json_string(&doc, JsonStringFormat::TenGen, 0, UuidEncoding::Default),
        r#"{ "a" : 1, "b" : "x", "c" : [ 1, 2 ], "d" : {}, "e" : [] }"#
    );
    assert_eq!(
        to_json_string(&doc! {}, JsonStringFormat::Strict, 0, UuidEncoding::Default),
        "{}"
    );
}

#[test]
fn pretty_layout() {
    let doc = doc! { "a": 1, "b": { "c": [1, 2] }, "d": {} };
    let expected = r#"{
    "a" : 1,
    "b" : {
        "c" : [
            1,
            2
        ]
    },
    "d" : {}
}"#;
    assert_eq!(
        to_json_string(&doc, JsonStringFormat::TenGen, 1, UuidEncoding::Default),
        expected
    );

    // deeper starting levels indent everything further
    assert_eq!(
        to_json_string(&doc! { "a": 1 }, JsonStringFormat::Strict, 2, UuidEncoding::Default),
        "{\n        \"a\" : 1\n    }"
    );
    assert_eq!(
        to_json_string(&doc! {}, JsonStringFormat::Strict, 3, UuidEncoding::Default),
        "{}"
    );
}

#[test]
fn pretty_wrappers_stay_on_one_line() {
    let doc = doc! {
        "_id": oid(),
        "ts": Timestamp { time: 1, increment: 2 },
        "code": JavaScriptCodeWithScope { code: "f".to_owned(), scope: doc! { "x": 1, "y": 2 } },
    };
    let expected = format!(
        r#"{{
    "_id" : {{ "$oid" : "{OID}" }},
    "ts" : {{ "$timestamp" : {{ "t" : 1, "i" : 2 }} }},
    "code" : {{ "$code" : "f", "$scope" : {{ "x" : 1, "y" : 2 }} }}
}}"#
    );
    assert_eq!(
        to_json_string(&doc, JsonStringFormat::Strict, 1, UuidEncoding::Default),
        expected
    );
}

#[test]
fn scalars() {
    for format in [JsonStringFormat::TenGen, JsonStringFormat::Strict] {
        let render = |value: Bson| value_to_json_string(&value, format, 0, UuidEncoding::Default);
        assert_eq!(render(Bson::Null), "null");
        assert_eq!(render(Bson::Undefined), "undefined");
        assert_eq!(render(Bson::Boolean(true)), "true");
        assert_eq!(render(Bson::Boolean(false)), "false");
        assert_eq!(render(Bson::Int32(-12)), "-12");
        assert_eq!(render(Bson::MinKey), r#"{ "$minKey" : 1 }"#);
        assert_eq!(render(Bson::MaxKey), r#"{ "$maxKey" : 1 }"#);
        assert_eq!(render(Bson::Symbol("sym".to_owned())), r#""sym""#);
    }
}

#[test]
fn int64() {
    assert_eq!(tengen(5i64), "NumberLong(5)");
    assert_eq!(tengen(i64::MIN), "NumberLong(-9223372036854775808)");
    assert_eq!(strict(5i64), "5");
    assert_eq!(strict(-7_000_000_000i64), "-7000000000");
}

#[test]
fn doubles() {
    let cases = [
        (0.0, "0.0"),
        (-0.0, "-0.0"),
        (1.0, "1.0"),
        (-2.0, "-2.0"),
        (0.1, "0.1"),
        (123.456, "123.456"),
        (1.0 / 3.0, "0.3333333333333333"),
        (0.0001, "0.0001"),
        (0.00001, "1e-05"),
        (1.5e-7, "1.5e-07"),
        (9_007_199_254_740_992.0, "9007199254740992.0"),
        (1e16, "1e+16"),
        (1e20, "1e+20"),
        (f64::NAN, "NaN"),
        (f64::INFINITY, "Infinity"),
        (f64::NEG_INFINITY, "-Infinity"),
    ];
    for (value, expected) in cases {
        assert_eq!(tengen(value), expected, "{value:?}");
        assert_eq!(strict(value), expected, "{value:?}");
    }
}

#[test]
fn strings_are_escaped() {
    assert_eq!(
        strict("a\"b\\c/d\u{1}\u{1f}\u{8}\u{c}\n\r\té中"),
        r#""a\"b\\c/d\u0001\u001f\b\f\n\r\té中""#
    );
    assert_eq!(
        tengen(doc! { "quo\"te": 1 }),
        r#"{ "quo\"te" : 1 }"#
    );
}

#[test]
fn object_ids() {
    assert_eq!(tengen(oid()), format!(r#"ObjectId("{OID}")"#));
    assert_eq!(strict(oid()), format!(r#"{{ "$oid" : "{OID}" }}"#));
}

#[test]
fn dates() {
    let date = DateTime::from_millis(1_355_896_877_171);
    assert_eq!(tengen(date), r#"ISODate("2012-12-19T06:01:17.171Z")"#);
    assert_eq!(strict(date), r#"{ "$date" : "2012-12-19T06:01:17.171Z" }"#);

    let before_epoch = DateTime::from_millis(-1);
    assert_eq!(tengen(before_epoch), r#"ISODate("1969-12-31T23:59:59.999Z")"#);

    assert_eq!(tengen(DateTime::MAX), "Date(9223372036854775807)");
    assert_eq!(strict(DateTime::MAX), r#"{ "$date" : 9223372036854775807 }"#);
    assert_eq!(tengen(DateTime::MIN), "Date(-9223372036854775808)");
}

#[test]
fn regexes() {
    let regex = Regex::new(r"a/b\d", "imsx");
    assert_eq!(tengen(regex.clone()), r"/a\/b\\d/im");
    assert_eq!(
        strict(regex),
        r#"{ "$regex" : "a/b\\d", "$options" : "imsx" }"#
    );
    assert_eq!(tengen(Regex::new("a\nb", "g")), r"/a\nb/g");
    assert_eq!(tengen(Regex::new("", "")), "//");
    assert_eq!(tengen(Regex::new(r"a\", "")), r"/a\\/");
    assert_eq!(tengen(Regex::new(r"a\/b", "")), r"/a\\\/b/");
}

#[test]
fn regex_patterns_read_back() {
    let patterns = [
        r"a\",
        r"a\/b",
        "a\nb",
        r"^\d+\.\d*$",
        "\"quoted\" 'single'",
        "\u{1}\u{7f}é",
    ];
    for pattern in patterns {
        let doc = doc! { "r": Regex::new(pattern, "i") };
        let text = to_json_string(&doc, JsonStringFormat::TenGen, 0, UuidEncoding::Default);
        assert_eq!(from_json(&text).unwrap(), doc, "{text}");
    }
}

#[test]
fn timestamps() {
    let ts = Timestamp {
        time: u32::MAX,
        increment: 7,
    };
    assert_eq!(tengen(ts), "Timestamp(4294967295, 7)");
    assert_eq!(
        strict(ts),
        r#"{ "$timestamp" : { "t" : 4294967295, "i" : 7 } }"#
    );
}

#[test]
fn binaries() {
    let hello = Binary {
        subtype: BinarySubtype::Generic,
        bytes: b"hello".to_vec(),
    };
    let expected = r#"{ "$binary" : "aGVsbG8=", "$type" : "00" }"#;
    assert_eq!(tengen(hello.clone()), expected);
    assert_eq!(strict(hello), expected);

    let user = Binary {
        subtype: BinarySubtype::UserDefined(0x80),
        bytes: Vec::new(),
    };
    assert_eq!(strict(user), r#"{ "$binary" : "", "$type" : "80" }"#);

    // UUID subtypes without a 16-byte payload fall back to $binary
    let short = Binary {
        subtype: BinarySubtype::Uuid,
        bytes: CANONICAL_UUID[..15].to_vec(),
    };
    assert_eq!(
        tengen(short),
        r#"{ "$binary" : "ABEiM0RVZneImaq7zN3u", "$type" : "04" }"#
    );
}

#[test]
fn uuids() {
    let standard = Bson::Binary(Binary {
        subtype: BinarySubtype::Uuid,
        bytes: CANONICAL_UUID.to_vec(),
    });
    let legacy = Bson::Binary(Binary {
        subtype: BinarySubtype::UuidOld,
        bytes: CANONICAL_UUID.to_vec(),
    });

    let cases = [
        (UuidEncoding::Default, r#"LUUID("00112233-4455-6677-8899-aabbccddeeff")"#),
        (UuidEncoding::JavaLegacy, r#"JUUID("77665544-3322-1100-ffee-ddccbbaa9988")"#),
        (UuidEncoding::CSharpLegacy, r#"NUUID("33221100-5544-7766-8899-aabbccddeeff")"#),
        (UuidEncoding::PythonLegacy, r#"PYUUID("00112233-4455-6677-8899-aabbccddeeff")"#),
    ];
    for (encoding, expected) in cases {
        for format in [JsonStringFormat::TenGen, JsonStringFormat::Strict] {
            assert_eq!(
                value_to_json_string(&standard, format, 0, encoding),
                r#"UUID("00112233-4455-6677-8899-aabbccddeeff")"#
            );
            assert_eq!(value_to_json_string(&legacy, format, 0, encoding), expected);
        }
    }
}

#[test]
fn code() {
    assert_eq!(
        tengen(Bson::JavaScriptCode("return \"x\";".to_owned())),
        r#"{ "$code" : "return \"x\";" }"#
    );
    let with_scope = JavaScriptCodeWithScope {
        code: "return x;".to_owned(),
        scope: doc! { "x": 1i64 },
    };
    assert_eq!(
        tengen(with_scope.clone()),
        r#"{ "$code" : "return x;", "$scope" : { "x" : NumberLong(1) } }"#
    );
    assert_eq!(
        strict(with_scope),
        r#"{ "$code" : "return x;", "$scope" : { "x" : 1 } }"#
    );
}

#[test]
fn db_refs() {
    let by_oid = DbRef::new("users", oid());
    assert_eq!(
        tengen(by_oid.clone()),
        format!(r#"DBRef("users", ObjectId("{OID}"))"#)
    );
    assert_eq!(
        strict(by_oid),
        format!(r#"{{ "$ref" : "users", "$id" : {{ "$oid" : "{OID}" }} }}"#)
    );

    let with_db = DbRef::new("users", doc! { "a": 1 }).with_db("app");
    assert_eq!(
        tengen(with_db.clone()),
        r#"DBRef("users", { "a" : 1 }, "app")"#
    );
    assert_eq!(
        strict(with_db),
        r#"{ "$ref" : "users", "$id" : { "a" : 1 }, "$db" : "app" }"#
    );
}

#[test]
fn nested_values_follow_the_dialect() {
    let doc = doc! {
        "n": 5i64,
        "list": [oid(), { "when": DateTime::from_millis(0) }],
    };
    assert_eq!(
        to_json_string(&doc, JsonStringFormat::TenGen, 0, UuidEncoding::Default),
        format!(
            r#"{{ "n" : NumberLong(5), "list" : [ ObjectId("{OID}"), {{ "when" : ISODate("1970-01-01T00:00:00.000Z") }} ] }}"#
        )
    );
    assert_eq!(
        to_json_string(&doc, JsonStringFormat::Strict, 0, UuidEncoding::Default),
        format!(
            r#"{{ "n" : 5, "list" : [ {{ "$oid" : "{OID}" }}, {{ "when" : {{ "$date" : "1970-01-01T00:00:00.000Z" }} }} ] }}"#
        )
    );
}

#[test]
fn options() {
    let options = JsonOptions::default();
    assert_eq!(options.format, JsonStringFormat::Strict);
    assert_eq!(options.pretty, 0);
    assert_eq!(options.uuid_encoding, UuidEncoding::Default);

    let doc = doc! {
        "id": Binary { subtype: BinarySubtype::UuidOld, bytes: CANONICAL_UUID.to_vec() },
        "n": 1i64,
    };
    let options = options
        .format(JsonStringFormat::TenGen)
        .pretty(1)
        .uuid_encoding(UuidEncoding::JavaLegacy);
    assert_eq!(
        options.to_json_string(&doc),
        "{\n    \"id\" : JUUID(\"77665544-3322-1100-ffee-ddccbbaa9988\"),\n    \"n\" : NumberLong(1)\n}"
    );
    assert_eq!(options.value_to_json_string(&bson!([])), "[]");
    assert_eq!(
        options.value_to_json_string(&bson!([1])),
        "[\n    1\n]"
    );
}

#[test]
fn display_uses_compact_tengen() {
    let doc = doc! { "a": 1i64, "b": [true, null] };
    assert_eq!(doc.to_string(), r#"{ "a" : NumberLong(1), "b" : [ true, null ] }"#);
    assert_eq!(Bson::from(oid()).to_string(), format!(r#"ObjectId("{OID}")"#));
}

#[cfg(feature = "serde")]
#[test]
fn options_serde() {
    let options = JsonOptions::default()
        .format(JsonStringFormat::TenGen)
        .uuid_encoding(UuidEncoding::CSharpLegacy);
    let json = serde_json::to_value(options).unwrap();
    assert_eq!(
        json,
        serde_json::json!({ "format": "TenGen", "pretty": 0, "uuidEncoding": "CSharpLegacy" })
    );

    let partial: JsonOptions = serde_json::from_str(r#"{ "pretty": 2 }"#).unwrap();
    assert_eq!(partial, JsonOptions::default().pretty(2));
}
