use pretty_assertions::assert_eq;
use proptest::prelude::*;

use crate::{
    Binary,
    Bson,
    DateTime,
    DbRef,
    Document,
    JavaScriptCodeWithScope,
    JsonStringFormat,
    Regex,
    Timestamp,
    from_json,
    oid::ObjectId,
    spec::BinarySubtype,
    to_json_string,
    uuid::UuidEncoding,
};

fn arbitrary_encoding() -> impl Strategy<Value = UuidEncoding> {
    prop::sample::select(UuidEncoding::ALL.to_vec())
}

/// Field names that never collide with the `$`-prefixed wrapper names.
fn arbitrary_key() -> impl Strategy<Value = String> {
    any::<String>().prop_filter("wrapper names are reserved", |key| !key.starts_with('$'))
}

fn arbitrary_datetime() -> impl Strategy<Value = DateTime> {
    prop_oneof![
        // 1900 through 9999, which renders as ISODate
        (-2_208_988_800_000i64..253_402_300_800_000).prop_map(DateTime::from_millis),
        any::<i64>().prop_map(DateTime::from_millis),
    ]
}

fn arbitrary_binary() -> impl Strategy<Value = Binary> {
    prop_oneof![
        (any::<u8>(), prop::collection::vec(any::<u8>(), 0..32)).prop_map(|(subtype, bytes)| {
            Binary {
                subtype: BinarySubtype::from(subtype),
                bytes,
            }
        }),
        (
            prop::sample::select(vec![BinarySubtype::Uuid, BinarySubtype::UuidOld]),
            any::<[u8; 16]>()
        )
            .prop_map(|(subtype, bytes)| Binary {
                subtype,
                bytes: bytes.to_vec(),
            }),
    ]
}

fn arbitrary_regex() -> impl Strategy<Value = Regex> {
    (
        prop_oneof![any::<String>(), r"[\\/a-z]{0,12}"],
        prop::sample::subsequence(vec!['g', 'i', 'm'], 0..=3),
    )
        .prop_map(|(pattern, options)| Regex::new(pattern, options.into_iter().collect::<String>()))
}

fn arbitrary_scalar() -> impl Strategy<Value = Bson> {
    prop_oneof![
        Just(Bson::Null),
        Just(Bson::Undefined),
        Just(Bson::MinKey),
        Just(Bson::MaxKey),
        any::<bool>().prop_map(Bson::Boolean),
        any::<i32>().prop_map(Bson::Int32),
        any::<i64>().prop_map(Bson::Int64),
        prop_oneof![
            (-1_000_000i32..1_000_000).prop_map(|n| f64::from(n) / 8.0),
            Just(f64::INFINITY),
            Just(f64::NEG_INFINITY),
        ]
        .prop_map(Bson::Double),
    ]
}

fn arbitrary_typed() -> impl Strategy<Value = Bson> {
    prop_oneof![
        any::<String>().prop_map(Bson::String),
        any::<String>().prop_map(Bson::JavaScriptCode),
        any::<[u8; 12]>().prop_map(|bytes| Bson::ObjectId(ObjectId::from_bytes(bytes))),
        arbitrary_datetime().prop_map(Bson::DateTime),
        any::<(u32, u32)>()
            .prop_map(|(time, increment)| Bson::Timestamp(Timestamp { time, increment })),
        arbitrary_binary().prop_map(Bson::Binary),
        arbitrary_regex().prop_map(Bson::RegularExpression),
    ]
}

fn document_of(value: impl Strategy<Value = Bson>) -> impl Strategy<Value = Document> {
    prop::collection::vec((arbitrary_key(), value), 0..6).prop_map(|fields| {
        let mut doc = Document::new();
        for (key, value) in fields {
            doc.append(key, value);
        }
        doc
    })
}

fn arbitrary_bson() -> impl Strategy<Value = Bson> {
    let leaf = prop_oneof![arbitrary_scalar(), arbitrary_typed()];

    leaf.prop_recursive(4, 64, 6, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..6).prop_map(Bson::Array),
            document_of(inner.clone()).prop_map(Bson::Document),
            (any::<String>(), document_of(inner.clone())).prop_map(|(code, scope)| {
                Bson::JavaScriptCodeWithScope(JavaScriptCodeWithScope { code, scope })
            }),
            (
                any::<String>(),
                inner,
                prop::option::of(any::<String>())
            )
                .prop_map(|(namespace, id, db)| {
                    Bson::DbRef(DbRef {
                        namespace,
                        id: Box::new(id),
                        db,
                    })
                }),
        ]
    })
}

proptest! {
    #[test]
    fn tengen_round_trip(
        doc in document_of(arbitrary_bson()),
        pretty in 0usize..3,
        encoding in arbitrary_encoding(),
    ) {
        let text = to_json_string(&doc, JsonStringFormat::TenGen, pretty, encoding);
        let parsed = from_json(&text);
        prop_assert!(
            parsed.is_ok(),
            "{:?} failed to parse: {}",
            text,
            parsed.as_ref().unwrap_err()
        );
        prop_assert_eq!(parsed.unwrap(), doc);
    }

    #[test]
    fn parser_never_panics(text in any::<String>()) {
        let _ = from_json(&text);
    }
}

#[test]
fn strict_round_trip() {
    let doc = doc! {
        "_id": ObjectId::parse_str("507f1f77bcf86cd799439011").unwrap(),
        "n": 1,
        "big": 7_000_000_000i64,
        "ratio": 0.25,
        "inf": f64::NEG_INFINITY,
        "name": "a/b \"quoted\"\n",
        "when": DateTime::from_millis(1_355_896_877_171),
        "far": DateTime::MAX,
        "re": Regex::new(r"^a/b\d+$", "ims"),
        "ts": Timestamp { time: 1, increment: 2 },
        "bin": Binary { subtype: BinarySubtype::Md5, bytes: vec![1, 2, 3] },
        "uuid": Binary { subtype: BinarySubtype::UuidOld, bytes: (0..16).collect() },
        "code": Bson::JavaScriptCode("return 1;".to_owned()),
        "scoped": JavaScriptCodeWithScope { code: "x".to_owned(), scope: doc! { "x": [1, {}] } },
        "ref": DbRef::new("users", 5).with_db("app"),
        "bounds": [Bson::MinKey, Bson::MaxKey],
        "nothing": [null, undefined],
    };

    for encoding in UuidEncoding::ALL {
        for pretty in 0..3 {
            let text = to_json_string(&doc, JsonStringFormat::Strict, pretty, encoding);
            assert_eq!(from_json(&text).unwrap(), doc, "{text}");
        }
    }
}
