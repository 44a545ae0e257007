use criterion::{black_box, criterion_group, criterion_main, Criterion};

use rtu_udp_sim::{crc16, FrameEngine, RegisterStore};

fn bench_crc(c: &mut Criterion) {
    let frame: Vec<u8> = (0..=255u8).collect();
    c.bench_function("crc16_256_bytes", |b| b.iter(|| crc16(black_box(&frame))));
}

fn bench_engine(c: &mut Criterion) {
    let mut engine = FrameEngine::new(RegisterStore::with_drive_defaults());

    let read = [0x01, 0x03, 0x01, 0x1A, 0x00, 0x7D];
    c.bench_function("process_read_125", |b| {
        b.iter(|| engine.process(black_box(&read)))
    });

    let write = [0x01, 0x06, 0x01, 0x1A, 0x00, 0x64];
    c.bench_function("process_write_single", |b| {
        b.iter(|| engine.process(black_box(&write)))
    });

    let junk = [0x01, 0x99, 0x00, 0x00];
    c.bench_function("process_dropped", |b| {
        b.iter(|| engine.process(black_box(&junk)))
    });
}

criterion_group!(benches, bench_crc, bench_engine);
criterion_main!(benches);
