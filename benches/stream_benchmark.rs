//! Performance benchmarks for the streaming result reader.
//!
//! Measures record throughput at different chunk sizes, including chunks
//! that split lines and multi-byte characters.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use tilda::stream::StreamingResultReader;

fn synthetic_body(records: usize) -> Vec<u8> {
    let mut body = String::new();
    for i in 0..records {
        body.push_str(&format!(
            "data: {{\"progress\": {}, \"step\": \"Running detection on frame {}/{}...\"}}\n",
            i % 100,
            i + 1,
            records
        ));
    }
    body.push_str("data: {\"summary\": \"Video analysis complete. Détection done 🚗\", \"metadata\": {\"filename\": \"drive.mp4\"}}\n");
    body.into_bytes()
}

fn bench_reader(c: &mut Criterion) {
    let body = synthetic_body(1_000);

    let mut group = c.benchmark_group("stream_reader");
    for chunk_size in [16usize, 256, 4096] {
        group.bench_with_input(
            BenchmarkId::new("1k_records", chunk_size),
            &chunk_size,
            |b, &chunk_size| {
                b.iter(|| {
                    let mut seen = 0u64;
                    let mut reader =
                        StreamingResultReader::new(|p, _| seen = seen.wrapping_add(p as u64));
                    for chunk in body.chunks(chunk_size) {
                        reader.feed(chunk);
                    }
                    let result = reader.finish();
                    black_box((result.ok(), seen));
                })
            },
        );
    }
    group.finish();
}

criterion_group!(benches, bench_reader);
criterion_main!(benches);
