//! Log reconstruction throughput benchmark
//!
//! Measures line extraction and full reconstruction over synthetic sender
//! logs of increasing length.
//!
//! ```bash
//! cargo bench --bench log_reconstruction
//! ```

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use sendbench::{reconstruct, FieldExtractor, FieldSchema};

/// Build a sender log with `blocks` complete transfers and some noise
fn synthetic_log(blocks: usize) -> String {
    let mut log = String::with_capacity(blocks * 480);
    log.push_str("ConnectToServer(): Connected to 127.0.0.1:8080\n");
    for i in 1..=blocks {
        let size = i * 1024;
        log.push_str(&format!("SendFile(): Size of file: {} bytes\n", size));
        log.push_str("SendFile():    Loading file - 0.041000 ms\n");
        log.push_str("EncryptAndSend():    Encryption - 0.112000 ms\n");
        log.push_str(&format!(
            "EncryptAndSend(): Size of encrypted data: {} bytes\n",
            size + 16
        ));
        log.push_str("EncryptAndSend():    Sending file - 0.020000 ms\n");
        log.push_str("CalculateHashAndSend(): Hash calculation - 0.007000 ms\n");
        log.push_str("CalculateHashAndSend():    Sending hash - 0.010000 ms\n");
        log.push_str(&format!("[SUCCESS] SendFile(): File 'perftest_{}KB.txt' sent\n", i));
        log.push_str("SendFile(): Complete sending operation    - 0.254000 ms\n");
    }
    log
}

fn bench_extract_line(c: &mut Criterion) {
    let schema = FieldSchema::default_send_log().unwrap();
    let extractor = FieldExtractor::new(&schema).unwrap();

    c.bench_function("extract_matching_line", |b| {
        b.iter(|| extractor.extract(black_box("EncryptAndSend():    Encryption - 0.112000 ms")));
    });

    c.bench_function("extract_noise_line", |b| {
        b.iter(|| extractor.extract(black_box("[SUCCESS] SendFile(): File 'perftest_1KB.txt' sent")));
    });
}

fn bench_reconstruct(c: &mut Criterion) {
    let schema = FieldSchema::default_send_log().unwrap();
    let mut group = c.benchmark_group("reconstruct");

    for blocks in [15usize, 150, 1500] {
        let log = synthetic_log(blocks);
        group.throughput(Throughput::Bytes(log.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(blocks), &log, |b, log| {
            b.iter(|| reconstruct(black_box(log.as_bytes()), &schema).unwrap());
        });
    }

    group.finish();
}

criterion_group!(benches, bench_extract_line, bench_reconstruct);
criterion_main!(benches);
