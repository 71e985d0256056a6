//! Benchmarks for the SparseSet slot arena

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use trellis_core::alloc::sparse_set::{IndexSlot, SparseSet};

#[derive(Clone, Copy, Debug, Default)]
struct NodeData {
    position: (f32, f32),
    size: (f32, f32),
    flags: u32,
}

fn bench_sparse_set_insert(c: &mut Criterion) {
    let mut group = c.benchmark_group("sparse_set_insert");

    for size in [10, 100, 1000] {
        group.throughput(Throughput::Elements(size as u64));

        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, &size| {
            b.iter(|| {
                let mut set = SparseSet::new();
                for _ in 0..size {
                    set.push(black_box(NodeData::default()));
                }
                set
            });
        });
    }

    group.finish();
}

fn bench_sparse_set_churn(c: &mut Criterion) {
    let mut group = c.benchmark_group("sparse_set_churn");

    for size in [100, 1000] {
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, &size| {
            b.iter(|| {
                let mut set = SparseSet::new();
                let slots: Vec<IndexSlot> =
                    (0..size).map(|_| set.push(NodeData::default())).collect();
                for slot in slots.iter().step_by(2) {
                    set.remove(*slot);
                }
                for _ in 0..size / 2 {
                    set.push(black_box(NodeData::default()));
                }
                black_box(set.len())
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_sparse_set_insert, bench_sparse_set_churn);
criterion_main!(benches);
