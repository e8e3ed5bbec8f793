use mongo_extjson::{
    Bson,
    DateTime,
    DbRef,
    JsonStringFormat,
    Timestamp,
    from_json,
    oid::ObjectId,
    spec::BinarySubtype,
    to_json_string,
    uuid::UuidEncoding,
};

const SHELL_OUTPUT: &str = r#"{
    "_id" : ObjectId("5099803df3f4948bd2f98391"),
    "name" : "Ada",
    "visits" : NumberLong(4000000000),
    "score" : 97.5,
    "joined" : ISODate("2012-11-06T20:49:01.123Z"),
    "session" : UUID("f8a5b0c2-1e3d-4d6b-9c2a-7e5f3a1b0d4c"),
    "optime" : Timestamp(1352234941, 1),
    "owner" : DBRef("users", ObjectId("5099803df3f4948bd2f98392")),
    "pattern" : /^ad/i,
    "flags" : [
        true,
        false,
        null,
        undefined
    ]
}"#;

#[test]
fn shell_output_round_trips() {
    let doc = from_json(SHELL_OUTPUT).unwrap();
    assert_eq!(doc.len(), 10);
    assert_eq!(doc.get_i64("visits").unwrap(), 4_000_000_000);
    assert_eq!(doc.get_f64("score").unwrap(), 97.5);
    assert_eq!(
        doc.get_datetime("joined").unwrap(),
        &DateTime::parse_rfc3339_str("2012-11-06T20:49:01.123Z").unwrap()
    );
    assert_eq!(doc.get_binary("session").unwrap().subtype, BinarySubtype::Uuid);
    assert_eq!(
        doc.get_timestamp("optime").unwrap(),
        Timestamp {
            time: 1_352_234_941,
            increment: 1
        }
    );
    assert_eq!(
        doc.get("owner"),
        Some(&Bson::DbRef(DbRef::new(
            "users",
            ObjectId::parse_str("5099803df3f4948bd2f98392").unwrap()
        )))
    );

    assert_eq!(
        to_json_string(&doc, JsonStringFormat::TenGen, 1, UuidEncoding::Default),
        SHELL_OUTPUT
    );
}

#[test]
fn convert_between_dialects() {
    let doc = from_json(SHELL_OUTPUT).unwrap();
    let strict = to_json_string(&doc, JsonStringFormat::Strict, 0, UuidEncoding::Default);
    assert!(strict.contains(r#""_id" : { "$oid" : "5099803df3f4948bd2f98391" }"#));
    assert!(strict.contains(r#""visits" : 4000000000"#));
    assert!(strict.contains(r#""joined" : { "$date" : "2012-11-06T20:49:01.123Z" }"#));
    assert!(strict.contains(r#""optime" : { "$timestamp" : { "t" : 1352234941, "i" : 1 } }"#));
    assert!(strict.contains(r#""pattern" : { "$regex" : "^ad", "$options" : "i" }"#));

    assert_eq!(from_json(&strict).unwrap(), doc);
}
