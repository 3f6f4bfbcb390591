// PPU benchmarks
// Measures dot-stepping throughput with rendering on and off

use criterion::{criterion_group, criterion_main, Criterion};
use renes::Ppu;
use std::hint::black_box;

fn bench_ppu_frame(c: &mut Criterion) {
    let mut group = c.benchmark_group("ppu_frame");
    group.sample_size(20);

    group.bench_function("blanked_frame", |b| {
        let mut ppu = Ppu::new();

        b.iter(|| {
            while !black_box(&mut ppu).tick() {}
        });
    });

    group.bench_function("rendering_frame", |b| {
        let mut ppu = Ppu::new();
        ppu.write_register(1, 0x1E); // show background + sprites, no clip

        b.iter(|| {
            while !black_box(&mut ppu).tick() {}
        });
    });

    group.finish();
}

fn bench_ppu_register_io(c: &mut Criterion) {
    let mut group = c.benchmark_group("ppu_register_io");

    group.bench_function("ppudata_write", |b| {
        let mut ppu = Ppu::new();
        ppu.write_register(6, 0x20);
        ppu.write_register(6, 0x00);

        b.iter(|| {
            black_box(&mut ppu).write_register(7, 0x55);
        });
    });

    group.bench_function("status_read", |b| {
        let mut ppu = Ppu::new();

        b.iter(|| {
            black_box(&mut ppu).read_register(2);
        });
    });

    group.finish();
}

criterion_group!(benches, bench_ppu_frame, bench_ppu_register_io);
criterion_main!(benches);
