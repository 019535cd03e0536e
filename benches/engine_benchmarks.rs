//! Benchmarks for the AHP engine hot paths: priority derivation and the
//! full critical-point sensitivity sweep at the maximum supported size.

use criterion::{criterion_group, criterion_main, Criterion};

use ahp_engine::aggregate;
use ahp_engine::matrix::ComparisonMatrix;
use ahp_engine::priority;
use ahp_engine::sensitivity;

/// A complete order-10 matrix with deterministic, mildly varied judgments.
fn full_matrix() -> ComparisonMatrix {
    let mut matrix = ComparisonMatrix::new(10);
    for i in 0..10 {
        for j in (i + 1)..10 {
            let value = 1.0 + ((i * 3 + j) % 5) as f64;
            matrix.set(i, j, value).expect("valid judgment");
        }
    }
    matrix
}

fn bench_priority_analysis(c: &mut Criterion) {
    let matrix = full_matrix();
    c.bench_function("priority_analyze_order_10", |b| {
        b.iter(|| priority::analyze(std::hint::black_box(&matrix)));
    });
}

fn bench_critical_point_sweep(c: &mut Criterion) {
    let matrix = full_matrix();
    let analysis = priority::analyze(&matrix);
    let criteria = analysis.priorities.clone();
    let by_criterion: Vec<Vec<f64>> = (0..10)
        .map(|offset| {
            let mut rotated = criteria.clone();
            rotated.rotate_left(offset);
            rotated
        })
        .collect();

    let names: Vec<String> = (0..10).map(|i| format!("Alternative {i}")).collect();
    let globals = aggregate::global_priorities(&criteria, &by_criterion);
    let ranking = aggregate::rank(&names, &globals);

    c.bench_function("critical_points_10x10", |b| {
        b.iter(|| {
            sensitivity::critical_points(
                std::hint::black_box(&criteria),
                std::hint::black_box(&by_criterion),
                &ranking,
            )
        });
    });
}

criterion_group!(benches, bench_priority_analysis, bench_critical_point_sweep);
criterion_main!(benches);
