//! Benchmarks for single-cell and batched polygonization

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use stillness_core::GridCell;
use stillness_marching::{polygonise, polygonise_cells};

/// Cells covering every corner configuration against iso level 0.5
fn configuration_cells() -> Vec<GridCell> {
    (0..=255u8)
        .map(|config| {
            let mut densities = [1.0; 8];
            for (corner, density) in densities.iter_mut().enumerate() {
                if config & (1 << corner) != 0 {
                    *density = 0.0;
                }
            }
            GridCell::cube(1.0).with_densities(densities)
        })
        .collect()
}

fn bench_single_cell(c: &mut Criterion) {
    let mut group = c.benchmark_group("single_cell");

    let empty = GridCell::cube(1.0);
    group.bench_function("no_crossing", |b| {
        b.iter(|| polygonise(black_box(&empty), black_box(0.5)))
    });

    // Configuration 61 produces the maximum of five triangles
    let busy = GridCell::cube(1.0).with_densities([0.0, 1.0, 0.0, 0.0, 0.0, 0.0, 1.0, 1.0]);
    group.bench_function("five_triangles", |b| {
        b.iter(|| polygonise(black_box(&busy), black_box(0.5)))
    });

    group.finish();
}

fn bench_batches(c: &mut Criterion) {
    let base = configuration_cells();
    let mut group = c.benchmark_group("batch");

    for &repeat in &[1usize, 16, 64] {
        let cells: Vec<GridCell> = base.iter().cycle().take(base.len() * repeat).copied().collect();
        group.throughput(Throughput::Elements(cells.len() as u64));

        group.bench_with_input(BenchmarkId::new("sequential", cells.len()), &cells, |b, cells| {
            b.iter(|| {
                cells
                    .iter()
                    .map(|cell| polygonise(cell, 0.5).len())
                    .sum::<usize>()
            })
        });

        group.bench_with_input(BenchmarkId::new("parallel", cells.len()), &cells, |b, cells| {
            b.iter(|| polygonise_cells(black_box(cells), 0.5))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_single_cell, bench_batches);
criterion_main!(benches);
