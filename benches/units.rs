use std::env;
use std::time::{Duration, Instant};

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};

use fftcmp::config::{self, ENV_POWERS};
use fftcmp::{BenchmarkUnit, Catalog, TransformKind};

fn bench_sizes() -> Vec<usize> {
    match env::var(ENV_POWERS) {
        Ok(raw) if !raw.trim().is_empty() => {
            config::parse_powers(&raw).unwrap_or_else(|e| panic!("{}: {}", ENV_POWERS, e))
        }
        _ => config::DEFAULT_SIZES.to_vec(),
    }
}

fn bench_kind(c: &mut Criterion, catalog: &Catalog, kind: TransformKind, size: usize) {
    let mut group = c.benchmark_group(format!("{}_{}", kind, size));
    for mut unit in catalog.build(size, kind) {
        if let Err(e) = unit.prepare() {
            eprintln!("skipping {} {} n={}: {}", unit.name(), kind, size, e);
            unit.release();
            continue;
        }
        let name = unit.name().to_string();
        group.bench_function(BenchmarkId::new(name, size), |b| {
            b.iter_custom(|iters| {
                let start = Instant::now();
                for _ in 0..iters {
                    unit.execute_once().unwrap();
                }
                start.elapsed()
            });
        });
        unit.release();
    }
    group.finish();
}

fn main_bench(c: &mut Criterion) {
    let catalog = Catalog::builtin();
    for size in bench_sizes() {
        for kind in TransformKind::ALL {
            bench_kind(c, &catalog, kind, size);
        }
    }
}

criterion_group! {
    name = benches;
    config = Criterion::default().measurement_time(Duration::from_secs(2));
    targets = main_bench
}
criterion_main!(benches);
