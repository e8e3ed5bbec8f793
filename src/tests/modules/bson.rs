use crate::{
    Binary,
    Bson,
    DbRef,
    Document,
    JavaScriptCodeWithScope,
    Regex,
    Timestamp,
    oid::ObjectId,
    spec::{BinarySubtype, ElementType},
};
use pretty_assertions::assert_eq;

#[test]
fn bson_default() {
    let bson1 = Bson::default();
    assert_eq!(bson1, Bson::Null);
}

#[test]
fn document_default() {
    let doc1 = Document::default();
    assert_eq!(doc1.keys().count(), 0);
    assert_eq!(doc1, Document::new());
}

#[test]
fn from_impls() {
    assert_eq!(Bson::from(1.5f32), Bson::Double(1.5));
    assert_eq!(Bson::from(2.25f64), Bson::Double(2.25));
    assert_eq!(Bson::from("data"), Bson::String(String::from("data")));
    assert_eq!(
        Bson::from(String::from("data")),
        Bson::String(String::from("data"))
    );
    assert_eq!(Bson::from(doc! {}), Bson::Document(Document::new()));
    assert_eq!(Bson::from(false), Bson::Boolean(false));
    assert_eq!(
        Bson::from(Regex {
            pattern: String::from("\\s+$"),
            options: String::from("i")
        }),
        Bson::RegularExpression(Regex {
            pattern: String::from("\\s+$"),
            options: String::from("i")
        })
    );
    assert_eq!(
        Bson::from(JavaScriptCodeWithScope {
            code: String::from("alert(\"hi\");"),
            scope: doc! {}
        }),
        Bson::JavaScriptCodeWithScope(JavaScriptCodeWithScope {
            code: String::from("alert(\"hi\");"),
            scope: doc! {}
        })
    );
    assert_eq!(
        Bson::from(Binary {
            subtype: BinarySubtype::Generic,
            bytes: vec![1, 2, 3]
        }),
        Bson::Binary(Binary {
            subtype: BinarySubtype::Generic,
            bytes: vec![1, 2, 3]
        })
    );
    assert_eq!(Bson::from(-48i32), Bson::Int32(-48));
    assert_eq!(Bson::from(-96i64), Bson::Int64(-96));
    assert_eq!(Bson::from(152u32), Bson::Int32(152));
    assert_eq!(Bson::from(u32::MAX), Bson::Int64(4_294_967_295));

    let oid = ObjectId::new();
    assert_eq!(
        Bson::from(b"abcdefghijkl"),
        Bson::ObjectId(ObjectId::from_bytes(*b"abcdefghijkl"))
    );
    assert_eq!(Bson::from(oid), Bson::ObjectId(oid));
    assert_eq!(
        Bson::from(vec![1, 2, 3]),
        Bson::Array(vec![Bson::Int32(1), Bson::Int32(2), Bson::Int32(3)])
    );
    assert_eq!(Bson::from(None::<i32>), Bson::Null);
    assert_eq!(Bson::from(Some(7)), Bson::Int32(7));

    // References
    assert_eq!(Bson::from(&24i32), Bson::Int32(24));
    assert_eq!(Bson::from(&oid), Bson::ObjectId(oid));
    assert_eq!(
        Bson::from(&doc! {"a": "b"}),
        Bson::Document(doc! {"a": "b"})
    );

    let db_ref = DbRef::new("users", oid).with_db("app");
    assert_eq!(
        Bson::from(db_ref),
        Bson::DbRef(DbRef {
            namespace: "users".to_owned(),
            id: Box::new(Bson::ObjectId(oid)),
            db: Some("app".to_owned()),
        })
    );
}

#[test]
fn timestamp_ordering() {
    let ts1 = Timestamp {
        time: 0,
        increment: 1,
    };
    let ts2 = Timestamp {
        time: 0,
        increment: 2,
    };
    let ts3 = Timestamp {
        time: 1,
        increment: 0,
    };
    assert!(ts1 < ts2);
    assert!(ts1 < ts3);
    assert!(ts2 < ts3);
}

#[test]
fn element_types() {
    assert_eq!(Bson::Double(1.0).element_type(), ElementType::Double);
    assert_eq!(Bson::Undefined.element_type(), ElementType::Undefined);
    assert_eq!(
        Bson::DbRef(DbRef::new("c", 1)).element_type(),
        ElementType::DbRef
    );
    assert_eq!(Bson::MinKey.element_type(), ElementType::MinKey);
    assert_eq!(Bson::Symbol("s".into()).element_type(), ElementType::Symbol);
}

#[test]
fn accessors() {
    let value = Bson::Int64(9);
    assert_eq!(value.as_i64(), Some(9));
    assert_eq!(value.as_i32(), None);
    assert_eq!(value.as_f64(), None);

    let mut value = Bson::String("abc".into());
    value.as_str_mut().unwrap().make_ascii_uppercase();
    assert_eq!(value.as_str(), Some("ABC"));

    assert_eq!(Bson::Null.as_null(), Some(()));
    assert_eq!(Bson::Undefined.as_null(), None);
    assert_eq!(Bson::Symbol("sym".into()).as_symbol(), Some("sym"));

    let regex = Bson::RegularExpression(Regex::new("^x", "m"));
    assert_eq!(regex.as_regex().map(|r| r.options.as_str()), Some("m"));
}

#[test]
fn array_from_indexed() {
    let dense = doc! { "0": "a", "1": "b" };
    assert_eq!(
        Bson::array_from_indexed(dense),
        Some(Bson::Array(vec![Bson::from("a"), Bson::from("b")]))
    );

    let unordered = doc! { "1": "b", "0": "a" };
    assert_eq!(
        Bson::array_from_indexed(unordered),
        Some(Bson::Array(vec![Bson::from("a"), Bson::from("b")]))
    );

    let sparse = doc! { "1": true, "3": false };
    assert_eq!(
        Bson::array_from_indexed(sparse),
        Some(Bson::Array(vec![
            Bson::Undefined,
            Bson::Boolean(true),
            Bson::Undefined,
            Bson::Boolean(false),
        ]))
    );

    assert_eq!(Bson::array_from_indexed(doc! {}), Some(Bson::Array(vec![])));
    assert_eq!(Bson::array_from_indexed(doc! { "x": 1 }), None);
    assert_eq!(Bson::array_from_indexed(doc! { "-1": 1 }), None);
}

#[test]
fn display() {
    assert_eq!(Bson::Int32(5).to_string(), "5");
    assert_eq!(Bson::Int64(5).to_string(), "NumberLong(5)");
    assert_eq!(Bson::Double(5.0).to_string(), "5.0");
    assert_eq!(Bson::String("a\"b".into()).to_string(), r#""a\"b""#);
    assert_eq!(
        Bson::Timestamp(Timestamp {
            time: 1,
            increment: 2
        })
        .to_string(),
        "Timestamp(1, 2)"
    );
    assert_eq!(Bson::Undefined.to_string(), "undefined");
    assert_eq!(Timestamp { time: 3, increment: 4 }.to_string(), "Timestamp(3, 4)");
    assert_eq!(Regex::new("a+", "i").to_string(), "/a+/i");
}
