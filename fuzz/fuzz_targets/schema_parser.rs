#![no_main]

use libfuzzer_sys::fuzz_target;
use sendbench::FieldSchema;

fuzz_target!(|data: &[u8]| {
    if let Ok(input) = std::str::from_utf8(data) {
        // Arbitrary TOML must be rejected cleanly, never panic
        let _ = FieldSchema::from_toml_str(input);
    }
});
