use criterion::{black_box, criterion_group, criterion_main, Criterion};
use timer_overhead::measurement::{rdtsc, SystemWallClock, WallClock};
use timer_overhead::scenario::busy_loop;
use timer_overhead::{CpuFrequency, TimeConverter};

fn bench_primitives(c: &mut Criterion) {
    let mut group = c.benchmark_group("primitives");
    group.bench_function("rdtsc", |b| b.iter(|| black_box(rdtsc())));
    group.bench_function("gettimeofday", |b| {
        let clock = SystemWallClock;
        b.iter(|| black_box(clock.now()))
    });
    group.bench_function("busy_loop_100", |b| {
        b.iter(|| black_box(busy_loop(black_box(7), 100)))
    });
    group.bench_function("cycles_to_ns", |b| {
        let converter = TimeConverter::new(CpuFrequency::from_ghz(2.4).unwrap());
        b.iter(|| black_box(converter.cycles_to_ns(black_box(123_456))))
    });
    group.finish();
}

criterion_group!(benches, bench_primitives);
criterion_main!(benches);
