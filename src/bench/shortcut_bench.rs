use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use rand::SeedableRng;
use rand::rngs::StdRng;
use shortcut::matrix::naive::shortcut_naive;
use shortcut::{EarlyExit, ParallelConfig, SquareMatrix, shortcut_parallel_with};

const SIZES: [usize; 3] = [64, 128, 256];

fn random_matrix(n: usize) -> SquareMatrix {
    SquareMatrix::random_with_rng(n, &mut StdRng::seed_from_u64(n as u64)).unwrap()
}

fn bench_baseline(c: &mut Criterion) {
    let mut group = c.benchmark_group("shortcut_baseline");
    for n in SIZES {
        let d = random_matrix(n);
        let mut r = vec![0.0; n * n];
        group.throughput(Throughput::Elements((n * n * n) as u64));
        group.bench_with_input(BenchmarkId::from_parameter(n), &d, |b, d| {
            b.iter(|| shortcut_naive(black_box(&mut r), black_box(d.as_slice()), n))
        });
    }
    group.finish();
}

fn bench_parallel(c: &mut Criterion) {
    let mut group = c.benchmark_group("shortcut_parallel");
    for n in SIZES {
        let d = random_matrix(n);
        group.throughput(Throughput::Elements((n * n * n) as u64));
        for (label, early_exit) in [("full_scan", EarlyExit::Disabled), ("early_exit", EarlyExit::Trusted)] {
            let config = ParallelConfig::default().with_early_exit(early_exit);
            group.bench_with_input(BenchmarkId::new(label, n), &d, |b, d| {
                b.iter(|| shortcut_parallel_with(black_box(d), &config).unwrap())
            });
        }
    }
    group.finish();
}

criterion_group!(benches, bench_baseline, bench_parallel);
criterion_main!(benches);
