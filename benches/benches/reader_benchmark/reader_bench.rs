//! Бенчмарки чтения кадров ARIS из памяти

use std::{hint::black_box, io::Cursor};

use aris_core::{layout::FRAME_HEADER_LAYOUT, testing::RecordingBuilder, ArisReader, ReaderOptions};
use aris_types::PingMode;
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

/// (ping mode, samples per beam): 48, 96 и 128 лучей
const GEOMETRIES: [(u32, u32); 3] = [(1, 512), (3, 1024), (9, 2048)];

fn benchmark_open(c: &mut Criterion) {
    let mut group = c.benchmark_group("aris_open");

    for (mode, spb) in GEOMETRIES {
        let raw = RecordingBuilder::new(mode, spb).frames(8).build();

        group.bench_with_input(BenchmarkId::new("ping_mode", mode), &raw, |b, raw| {
            b.iter(|| {
                let reader = ArisReader::new(Cursor::new(raw.as_slice())).unwrap();
                black_box(reader.frame_count());
            });
        });
    }

    group.finish();
}

fn benchmark_get_frame(c: &mut Criterion) {
    let mut group = c.benchmark_group("aris_get_frame");

    for (mode, spb) in GEOMETRIES {
        let raw = RecordingBuilder::new(mode, spb).frames(16).build();
        let beams = PingMode::lookup(mode).beams().unwrap_or(0);
        let mut reader = ArisReader::new(Cursor::new(raw)).unwrap();

        group.throughput(Throughput::Bytes(beams as u64 * spb as u64));
        group.bench_function(BenchmarkId::new("beams", beams), |b| {
            let mut i = 0u32;
            b.iter(|| {
                let frame = reader.get_frame(i % 16).unwrap();
                i = i.wrapping_add(7);
                black_box(frame.samples.len());
            });
        });
    }

    group.finish();
}

fn benchmark_verified_scan(c: &mut Criterion) {
    let raw = RecordingBuilder::new(6, 1024).frames(32).build();

    c.bench_function("aris_scan_verified_32_frames", |b| {
        b.iter(|| {
            let mut reader =
                ArisReader::with_options(Cursor::new(raw.as_slice()), ReaderOptions::verified())
                    .unwrap();
            let n = reader.frames().filter(|f| f.is_ok()).count();
            black_box(n);
        });
    });
}

fn benchmark_decode_all_fields(c: &mut Criterion) {
    let raw = RecordingBuilder::new(1, 16).frame_header(0);

    c.bench_function("frame_header_decode_all", |b| {
        b.iter(|| black_box(FRAME_HEADER_LAYOUT.decode_all(black_box(&raw[..])).len()));
    });
}

criterion_group!(
    benches,
    benchmark_open,
    benchmark_get_frame,
    benchmark_verified_scan,
    benchmark_decode_all_fields
);
criterion_main!(benches);
