#![no_main]
use libfuzzer_sys::fuzz_target;
use mongo_extjson::{from_json, to_json_string, uuid::UuidEncoding, JsonStringFormat};

fuzz_target!(|input: &str| {
    if let Ok(doc) = from_json(input) {
        for format in [JsonStringFormat::TenGen, JsonStringFormat::Strict] {
            for encoding in UuidEncoding::ALL {
                for pretty in 0..2 {
                    let out = to_json_string(&doc, format, pretty, encoding);
                    if let Err(err) = from_json(&out) {
                        panic!("serializer output {out:?} failed to parse: {err}");
                    }
                }
            }
        }
    }
});
