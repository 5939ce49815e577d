use criterion::{black_box, criterion_group, criterion_main, Criterion};
use fuel_log::reconcile::{reconcile, FillBounds, ReconcileSettings, Redistribution};
use fuel_log::sample::sample_volumes;
use fuel_log::{generate, GenerationParameters, PcgSource, MIN_FILL};

fn bench_generate(c: &mut Criterion) {
    let mut group = c.benchmark_group("generate");
    let params = GenerationParameters::default_scenario();

    group.bench_function("default_scenario", |b| {
        b.iter(|| {
            let mut rng = PcgSource::new(12345);
            generate(black_box(&params), &mut rng)
        });
    });

    group.finish();
}

fn bench_reconcile(c: &mut Criterion) {
    let mut group = c.benchmark_group("reconcile");
    let bounds = FillBounds::new(MIN_FILL, 26.0);
    let sampled = sample_volumes(104, bounds, &mut PcgSource::new(12345));

    group.bench_function("uniform", |b| {
        let settings = ReconcileSettings::default();
        b.iter(|| reconcile(black_box(sampled.clone()), 2450.0, bounds, &settings));
    });

    group.bench_function("unpinned", |b| {
        let settings = ReconcileSettings {
            redistribution: Redistribution::Unpinned,
            ..Default::default()
        };
        b.iter(|| reconcile(black_box(sampled.clone()), 2450.0, bounds, &settings));
    });

    // 30 purchases can never reach 2450, so every iteration runs
    let short = sample_volumes(30, bounds, &mut PcgSource::new(12345));
    group.bench_function("unreachable", |b| {
        let settings = ReconcileSettings::default();
        b.iter(|| reconcile(black_box(short.clone()), 2450.0, bounds, &settings));
    });

    group.finish();
}

criterion_group!(benches, bench_generate, bench_reconcile);
criterion_main!(benches);
