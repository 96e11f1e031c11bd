// Tests for the TOML-backed field schema

use super::*;
use crate::error::BenchError;
use std::io::Write;
use tempfile::NamedTempFile;

const TWO_FIELD_TOML: &str = r#"
terminator = "done"

[[field]]
name = "bytes"
pattern = '^sent (\d+) bytes$'
kind = "integer"

[[field]]
name = "done"
description = "end of run"
pattern = '^finished in ([\d.]+) ms$'
kind = "float"
"#;

/// The embedded schema declares the eight sender fields in log order
#[test]
fn test_default_send_log_schema() {
    let schema = FieldSchema::default_send_log().expect("embedded schema must load");

    let names: Vec<&str> = schema.field_names().collect();
    assert_eq!(
        names,
        vec![
            "file_size",
            "loading_file_time",
            "encryption_time",
            "enc_file_size",
            "sending_file_time",
            "hash_calc_time",
            "hash_send_time",
            "total_time",
        ]
    );
    assert_eq!(schema.terminator(), "total_time");

    assert_eq!(schema.field("file_size").unwrap().kind, ValueKind::Integer);
    assert_eq!(schema.field("enc_file_size").unwrap().kind, ValueKind::Integer);
    assert_eq!(schema.field("total_time").unwrap().kind, ValueKind::Float);
    assert!(schema.field("missing").is_none());
}

/// Each default pattern recognises the line the sender writes for it
#[test]
fn test_default_patterns_match_sender_lines() {
    let schema = FieldSchema::default_send_log().unwrap();
    let samples = [
        ("file_size", "SendFile(): Size of file: 1024 bytes"),
        ("loading_file_time", "SendFile():    Loading file - 0.041 ms"),
        ("encryption_time", "EncryptAndSend():    Encryption - 0.112 ms"),
        ("enc_file_size", "EncryptAndSend(): Size of encrypted data: 1040 bytes"),
        ("sending_file_time", "EncryptAndSend():    Sending file - 0.020 ms"),
        ("hash_calc_time", "CalculateHashAndSend(): Hash calculation - 0.007 ms"),
        ("hash_send_time", "CalculateHashAndSend():    Sending hash - 0.010 ms"),
        ("total_time", "SendFile(): Complete sending operation    - 0.254 ms"),
    ];

    for (name, line) in samples {
        let regex = schema.field(name).unwrap().compile().unwrap();
        assert!(regex.is_match(line), "{} should match {:?}", name, line);
    }
}

#[test]
fn test_from_toml_file() {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "{}", TWO_FIELD_TOML).unwrap();
    file.flush().unwrap();

    let schema = FieldSchema::from_toml(file.path()).unwrap();
    assert_eq!(schema.fields().len(), 2);
    assert_eq!(schema.terminator(), "done");
    assert_eq!(
        schema.field("done").unwrap().description.as_deref(),
        Some("end of run")
    );
}

#[test]
fn test_from_toml_missing_file() {
    let result = FieldSchema::from_toml("/nonexistent/fields.toml");
    assert!(matches!(result, Err(BenchError::Io { .. })));
}

#[test]
fn test_invalid_toml_syntax() {
    let result = FieldSchema::from_toml_str("terminator = [unclosed");
    assert!(matches!(result, Err(BenchError::SchemaParse(_))));
}

#[test]
fn test_rejects_duplicate_field_names() {
    let fields = vec![
        FieldSpec::new("t", r"^a (\d+)$", ValueKind::Integer),
        FieldSpec::new("t", r"^b (\d+)$", ValueKind::Integer),
    ];
    let err = FieldSchema::new(fields, "t").unwrap_err();
    assert!(err.to_string().contains("duplicate field 't'"));
}

#[test]
fn test_rejects_unknown_terminator() {
    let fields = vec![FieldSpec::new("t", r"^a (\d+)$", ValueKind::Integer)];
    let err = FieldSchema::new(fields, "total_time").unwrap_err();
    assert!(matches!(err, BenchError::InvalidSchema(_)));
    assert!(err.to_string().contains("total_time"));
}

#[test]
fn test_rejects_empty_schema() {
    let result = FieldSchema::from_toml_str("terminator = \"total_time\"\n");
    assert!(matches!(result, Err(BenchError::InvalidSchema(_))));
}

#[test]
fn test_rejects_uncompilable_pattern() {
    let fields = vec![FieldSpec::new("t", r"^a (\d+$", ValueKind::Integer)];
    let result = FieldSchema::new(fields, "t");
    assert!(matches!(result, Err(BenchError::InvalidPattern { .. })));
}

#[test]
fn test_with_terminator_override() {
    let schema = FieldSchema::default_send_log()
        .unwrap()
        .with_terminator("hash_send_time")
        .unwrap();
    assert_eq!(schema.terminator(), "hash_send_time");
    assert_eq!(schema.fields().len(), 8);

    let bad = FieldSchema::default_send_log()
        .unwrap()
        .with_terminator("nope");
    assert!(bad.is_err());
}
