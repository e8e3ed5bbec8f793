use crate::{Binary, spec::BinarySubtype};

#[test]
fn binary_from_base64() {
    let input = crate::base64::encode("hello");
    let produced = Binary::from_base64(input, None).unwrap();
    let expected = Binary {
        bytes: "hello".as_bytes().to_vec(),
        subtype: BinarySubtype::Generic,
    };
    assert_eq!(produced, expected);

    let produced = Binary::from_base64("", BinarySubtype::Uuid).unwrap();
    let expected = Binary {
        bytes: "".as_bytes().to_vec(),
        subtype: BinarySubtype::Uuid,
    };
    assert_eq!(produced, expected);
}

#[test]
fn binary_from_bad_base64() {
    let err = Binary::from_base64("a$b=", None).unwrap_err();
    assert!(matches!(err.kind, crate::error::ErrorKind::Binary { .. }));
}

#[test]
fn binary_display() {
    let binary = Binary {
        subtype: BinarySubtype::Md5,
        bytes: b"thingies".to_vec(),
    };
    assert_eq!(binary.to_base64(), "dGhpbmdpZXM=");
    assert_eq!(binary.to_string(), "Binary(0x5, dGhpbmdpZXM=)");
}

#[test]
fn uuid_literal_detection() {
    let uuid = Binary {
        subtype: BinarySubtype::Uuid,
        bytes: vec![0; 16],
    };
    assert!(uuid.is_uuid_literal());

    let legacy = Binary {
        subtype: BinarySubtype::UuidOld,
        bytes: vec![0; 16],
    };
    assert!(legacy.is_uuid_literal());

    let short = Binary {
        subtype: BinarySubtype::Uuid,
        bytes: vec![0; 15],
    };
    assert!(!short.is_uuid_literal());

    let generic = Binary {
        subtype: BinarySubtype::Generic,
        bytes: vec![0; 16],
    };
    assert!(!generic.is_uuid_literal());
}
