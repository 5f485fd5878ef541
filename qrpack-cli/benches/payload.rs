// ABOUTME: Benchmark for payload encoding and decoding
// ABOUTME: Measures data URI building, JSON assembly, and Base64 round trips

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use qrpack_sdk::{codec, data_uri, Payload};
use std::hint::black_box;

fn sample_payload(image_size: usize, image_count: usize) -> Payload {
    let image: Vec<u8> = (0..image_size).map(|i| (i % 251) as u8).collect();
    let images = (0..image_count)
        .map(|_| data_uri::build("image/png", &image))
        .collect();
    Payload::assemble("Hello! This QR code contains both text and images.", images)
}

fn bench_encode(c: &mut Criterion) {
    let mut group = c.benchmark_group("encode");
    for size in [256usize, 2 * 1024, 16 * 1024] {
        let payload = sample_payload(size, 2);
        group.bench_with_input(BenchmarkId::from_parameter(size), &payload, |b, payload| {
            b.iter(|| black_box(payload).to_encoded().unwrap())
        });
    }
    group.finish();
}

fn bench_decode(c: &mut Criterion) {
    let mut group = c.benchmark_group("decode");
    for size in [256usize, 2 * 1024, 16 * 1024] {
        let encoded = sample_payload(size, 2).to_encoded().unwrap();
        group.bench_with_input(BenchmarkId::from_parameter(size), &encoded, |b, encoded| {
            b.iter(|| {
                let payload = Payload::from_encoded(black_box(encoded)).unwrap();
                for uri in payload.images() {
                    black_box(data_uri::parse(uri).unwrap());
                }
            })
        });
    }
    group.finish();
}

fn bench_codec(c: &mut Criterion) {
    let bytes: Vec<u8> = (0..64 * 1024).map(|i| (i % 256) as u8).collect();
    let encoded = codec::encode(&bytes);

    c.bench_function("codec_encode_64k", |b| b.iter(|| codec::encode(black_box(&bytes))));
    c.bench_function("codec_decode_64k", |b| {
        b.iter(|| codec::decode(black_box(&encoded)).unwrap())
    });
}

criterion_group!(benches, bench_encode, bench_decode, bench_codec);
criterion_main!(benches);
