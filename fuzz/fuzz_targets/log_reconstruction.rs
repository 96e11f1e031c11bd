#![no_main]

use libfuzzer_sys::fuzz_target;
use sendbench::{reconstruct, FieldSchema};

fuzz_target!(|data: &[u8]| {
    let Ok(schema) = FieldSchema::default_send_log() else {
        return;
    };
    // Malformed values may error; nothing may panic, and every row is terminated
    if let Ok((dataset, stats)) = reconstruct(data, &schema) {
        assert_eq!(dataset.row_count(), stats.records_sealed);
        for row in 0..dataset.row_count() {
            assert!(dataset.get(row, schema.terminator()).is_some());
        }
    }
});
