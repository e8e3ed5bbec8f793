use crate::hexutil::{from_hex, from_hex_array, is_hex_string, to_hex_lower};

#[test]
fn hex_strings() {
    assert!(is_hex_string(""));
    assert!(is_hex_string("0123456789abcdefABCDEF"));
    assert!(!is_hex_string("0g"));
    assert!(!is_hex_string(" 00"));
    assert!(!is_hex_string("-1"));
}

#[test]
fn to_hex() {
    assert_eq!(to_hex_lower([0u8; 0]), "");
    assert_eq!(to_hex_lower([0x00, 0x0f, 0xa0, 0xff]), "000fa0ff");
    assert_eq!(to_hex_lower(b"abc"), "616263");
}

#[test]
fn from_hex_pairs() {
    assert_eq!(from_hex(""), Some(vec![]));
    assert_eq!(from_hex("000fA0ff"), Some(vec![0x00, 0x0f, 0xa0, 0xff]));
    assert_eq!(from_hex("abc"), None);
    assert_eq!(from_hex("zz"), None);
}

#[test]
fn fixed_width() {
    assert_eq!(from_hex_array::<2>("beef"), Some([0xbe, 0xef]));
    assert_eq!(from_hex_array::<2>("bee"), None);
    assert_eq!(from_hex_array::<2>("beef00"), None);
    assert_eq!(from_hex_array::<1>("0x"), None);
}

proptest::proptest! {
    #[test]
    fn hex_round_trip(bytes in proptest::collection::vec(proptest::num::u8::ANY, 0..64)) {
        let hex = to_hex_lower(&bytes);
        proptest::prop_assert_eq!(hex.len(), bytes.len() * 2);
        proptest::prop_assert!(is_hex_string(&hex));
        proptest::prop_assert_eq!(from_hex(&hex), Some(bytes));
    }
}
