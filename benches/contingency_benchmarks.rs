use contingency::statistics::compute;
use contingency::survival::{ln_gamma, upper_tail};
use contingency::utils::default_labels;
use contingency::{ChiSquareTest, ContingencyTable};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

fn square_table(size: usize) -> Vec<Vec<u64>> {
    (0..size)
        .map(|i| (0..size).map(|j| ((i * 7 + j * 13) % 50 + 1) as u64).collect())
        .collect()
}

pub fn survival_benchmarks(c: &mut Criterion) {
    c.bench_function("ln_gamma", |b| b.iter(|| ln_gamma(black_box(12.5))));
    // Series branch and continued fraction branch.
    c.bench_function("upper_tail series", |b| b.iter(|| upper_tail(black_box(3.0), black_box(9))));
    c.bench_function("upper_tail continued fraction", |b| {
        b.iter(|| upper_tail(black_box(40.0), black_box(9)))
    });
    c.bench_function("upper_tail large df", |b| b.iter(|| upper_tail(black_box(1010.0), black_box(1000))));
}

pub fn statistics_benchmarks(c: &mut Criterion) {
    let small = vec![vec![10, 5], vec![10, 20]];
    c.bench_function("compute 2x2 yates", |b| {
        b.iter(|| {
            compute(
                black_box(&small),
                default_labels("Row", 2),
                default_labels("Col", 2),
                0.05,
                true,
            )
        })
    });

    let observed = square_table(50);
    let table = ContingencyTable::from_counts(&observed).unwrap();
    let test = ChiSquareTest::default();
    c.bench_function("compute 50x50", |b| b.iter(|| test.compute(black_box(&table))));
}

criterion_group!(benches, survival_benchmarks, statistics_benchmarks);
criterion_main!(benches);
