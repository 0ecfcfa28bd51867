use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use gradepace::economy::{EconomyTable, EnergyColumn};
use gradepace::solver::{effort, forward, vert_speed, EffortSolverConfig, GridSearchConfig, HillDirection};

/// Solver benchmarks
///
/// Every solver call should stay well under a millisecond; the grid search is
/// the most expensive at 100 candidate grades.

fn bench_table_lookup(c: &mut Criterion) {
    let table = EconomyTable::reference();
    let mut group = c.benchmark_group("Economy Table");

    group.bench_function("lookup", |b| {
        b.iter(|| table.lookup(black_box(3.333), EnergyColumn::CostPerDistance))
    });
    group.bench_function("inverse_lookup", |b| {
        b.iter(|| table.inverse_lookup(black_box(14.2)))
    });

    group.finish();
}

fn bench_forward(c: &mut Criterion) {
    let table = EconomyTable::reference();
    let mut group = c.benchmark_group("Forward Solver");

    for &grade in &[-0.2, -0.05, 0.0, 0.05, 0.2] {
        group.bench_with_input(BenchmarkId::new("solve", grade), &grade, |b, &grade| {
            b.iter(|| forward::solve(table, black_box(3.0), black_box(grade)))
        });
    }

    group.finish();
}

fn bench_effort(c: &mut Criterion) {
    let table = EconomyTable::reference();
    let config = EffortSolverConfig::default();
    let mut group = c.benchmark_group("Effort Solver");

    for &grade in &[-0.1, 0.05, 0.2] {
        group.bench_with_input(BenchmarkId::new("solve", grade), &grade, |b, &grade| {
            b.iter(|| effort::solve(table, black_box(3.0), black_box(grade), &config))
        });
    }

    group.finish();
}

fn bench_vert_speed(c: &mut Criterion) {
    let table = EconomyTable::reference();
    let config = GridSearchConfig::default();
    let mut group = c.benchmark_group("Vertical Speed Solver");
    group.throughput(Throughput::Elements(config.candidate_count() as u64));

    group.bench_function("uphill", |b| {
        b.iter(|| vert_speed::solve(table, black_box(3.0), black_box(0.0847), HillDirection::Uphill, &config))
    });
    group.bench_function("downhill", |b| {
        b.iter(|| vert_speed::solve(table, black_box(3.0), black_box(0.6), HillDirection::Downhill, &config))
    });

    group.finish();
}

criterion_group!(benches, bench_table_lookup, bench_forward, bench_effort, bench_vert_speed);
criterion_main!(benches);
