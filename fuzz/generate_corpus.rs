use std::{fs, path::Path};

fn main() -> std::io::Result<()> {
    let corpus_dir = Path::new("fuzz/corpus");
    fs::create_dir_all(corpus_dir)?;

    // Seed each fuzz target with edge cases
    generate_parse_cases(corpus_dir)?;
    generate_reserialize_cases(corpus_dir)?;
    generate_uuid_cases(corpus_dir)?;
    Ok(())
}

fn write_cases(dir: &Path, cases: &[(&str, &str)]) -> std::io::Result<()> {
    fs::create_dir_all(dir)?;
    for (name, text) in cases {
        fs::write(dir.join(name), text)?;
    }
    Ok(())
}

fn generate_parse_cases(dir: &Path) -> std::io::Result<()> {
    let deep = format!("{{ a : {}{} }}", "[".repeat(300), "]".repeat(300));
    write_cases(
        &dir.join("parse"),
        &[
            ("empty", ""),
            ("empty_doc", "{}"),
            ("unterminated", "{ a : \"abc"),
            ("escapes", r#"{ s : "é\ud83d\n\x41\101" }"#),
            ("numbers", "{ a : -0, b : 1e400, c : 9223372036854775808, d : .5, e : 1. }"),
            ("reserved_root", r#"{ "$oid" : "507f1f77bcf86cd799439011" }"#),
            ("too_deep", deep.as_str()),
            ("trailing", "{ } {"),
            ("many", "{ a : 1 }\n{ b : 2 }\n{"),
        ],
    )
}

fn generate_reserialize_cases(dir: &Path) -> std::io::Result<()> {
    write_cases(
        &dir.join("reserialize"),
        &[
            (
                "constructors",
                r#"{ _id : ObjectId("507f1f77bcf86cd799439011"), n : NumberLong("5"), d : new Date(-1), i : ISODate("2012-12-19 06:01:17"), t : Timestamp(1, 2), r : DBRef("c", 1, "db"), re : /a\/b/gims }"#,
            ),
            (
                "wrappers",
                r#"{ b : { "$binary" : "aGVsbG8=", "$type" : "80" }, d : { "$date" : 253402300800000 }, c : { "$code" : "f", "$scope" : { x : 1 } }, k : [ { "$minKey" : 1 }, { "$maxKey" : 1 }, { "$undefined" : true } ] }"#,
            ),
            (
                "uuids",
                r#"{ a : UUID("00112233-4455-6677-8899-aabbccddeeff"), b : JUUID("00112233445566778899aabbccddeeff"), c : CSUUID("{00112233-4455-6677-8899-AABBCCDDEEFF}"), d : PYUUID("00112233445566778899aabbccddeeff") }"#,
            ),
            ("doubles", "{ a : NaN, b : -Infinity, c : 1.5e-7, d : 0.1, e : 1e16 }"),
        ],
    )
}

fn generate_uuid_cases(dir: &Path) -> std::io::Result<()> {
    write_cases(
        &dir.join("uuid_text"),
        &[
            ("dashed", "00112233-4455-6677-8899-aabbccddeeff"),
            ("braced", "{00112233-4455-6677-8899-AABBCCDDEEFF}"),
            ("short", "too-short"),
            ("non_hex", "0011223344556677889zaabbccddeeff"),
        ],
    )
}
