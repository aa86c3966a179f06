//! Criterion benchmarks for u-csp.
//!
//! Uses generated date-scheduling models to measure propagation and search
//! cost independent of any calendar semantics.

use chrono::NaiveDate;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use u_csp::csp::{CspModel, CspRunner, Operator, SolverConfig};

fn day(offset: u64) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 1)
        .unwrap()
        .checked_add_days(chrono::Days::new(offset))
        .unwrap()
}

// ===========================================================================
// Generators
// ===========================================================================

/// `x0 < x1 < ... < x{n-1}` over `days` days: feasible iff `n <= days`.
fn precedence_chain(n: usize, days: u64) -> CspModel {
    let mut model = CspModel::new(n, day(0), day(days - 1));
    for i in 1..n {
        model.add_binary(i - 1, Operator::Before, i);
    }
    model
}

/// `n` pairwise-different events over `days` days.
fn all_different(n: usize, days: u64) -> CspModel {
    let mut model = CspModel::new(n, day(0), day(days - 1));
    for i in 0..n {
        for j in (i + 1)..n {
            model.add_binary(i, Operator::NotEqual, j);
        }
    }
    model
}

/// Random unary and binary constraints, seeded.
fn random_model(n: usize, days: u64, density: f64, seed: u64) -> CspModel {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut model = CspModel::new(n, day(0), day(days - 1));
    let binary_ops = [Operator::NotEqual, Operator::Before, Operator::OnOrBefore];
    for i in 0..n {
        for j in (i + 1)..n {
            if rng.random_bool(density) {
                let op = binary_ops[rng.random_range(0..binary_ops.len())];
                model.add_binary(i, op, j);
            }
        }
        if rng.random_bool(0.2) {
            model.add_unary(i, Operator::OnOrAfter, day(rng.random_range(0..days / 4)));
        }
    }
    model
}

// ===========================================================================
// Benchmarks
// ===========================================================================

fn bench_propagate(c: &mut Criterion) {
    let mut group = c.benchmark_group("propagate");
    group.sample_size(20);

    for &n in &[10usize, 30, 60] {
        let model = random_model(n, 90, 0.2, 42);
        let config = SolverConfig::default();
        group.bench_with_input(BenchmarkId::from_parameter(n), &(model, config), |b, (m, c)| {
            b.iter(|| {
                let store = CspRunner::propagate(black_box(m), black_box(c));
                black_box(store)
            })
        });
    }
    group.finish();
}

fn bench_chain(c: &mut Criterion) {
    let mut group = c.benchmark_group("chain");
    group.sample_size(20);

    for &n in &[10usize, 50, 100] {
        let model = precedence_chain(n, n as u64 + 30);
        for (name, config) in [
            ("propagated", SolverConfig::default()),
            ("search_only", SolverConfig::default().search_only()),
        ] {
            group.bench_with_input(BenchmarkId::new(name, n), &(&model, config), |b, (m, c)| {
                b.iter(|| {
                    let result = CspRunner::run(black_box(m), black_box(c));
                    black_box(result)
                })
            });
        }
    }
    group.finish();
}

fn bench_pigeonhole(c: &mut Criterion) {
    let mut group = c.benchmark_group("pigeonhole_infeasible");
    group.sample_size(10);

    for &days in &[4u64, 5, 6] {
        let model = all_different(days as usize + 1, days);
        let config = SolverConfig::default();
        group.bench_with_input(BenchmarkId::from_parameter(days), &(model, config), |b, (m, c)| {
            b.iter(|| {
                let result = CspRunner::run(black_box(m), black_box(c));
                black_box(result)
            })
        });
    }
    group.finish();
}

criterion_group!(benches, bench_propagate, bench_chain, bench_pigeonhole);
criterion_main!(benches);
