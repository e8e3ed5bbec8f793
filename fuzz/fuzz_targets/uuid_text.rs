#![no_main]
use libfuzzer_sys::fuzz_target;
use mongo_extjson::uuid::{hex_to_uuid, uuid_to_hex, UuidEncoding};

fuzz_target!(|input: &str| {
    for encoding in UuidEncoding::ALL {
        let hex = uuid_to_hex(input, encoding);
        if !hex.is_empty() {
            assert_eq!(hex.len(), 32);
            let text = hex_to_uuid(&hex, encoding);
            assert_eq!(uuid_to_hex(&text, encoding), hex);
        }
    }
});
