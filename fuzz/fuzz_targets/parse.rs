#![no_main]
use libfuzzer_sys::fuzz_target;
use mongo_extjson::{from_json, from_json_many};

fuzz_target!(|input: &str| {
    if let Err(err) = from_json(input) {
        let offset = err.offset().expect("parse failures carry an offset");
        assert!(offset <= input.len(), "offset {offset} past end of input");
        let _ = err.line_column(input);
    }
    let _ = from_json_many(input);
});
