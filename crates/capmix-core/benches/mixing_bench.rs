use capmix_core::caps::Cap;
use capmix_core::core_types::ColorKey;
use capmix_core::geometry::{default_neighbor_radius, TableSpec};
use capmix_core::neighbors::NeighborGraph;
use capmix_core::optimizer::{Annealer, Schedule};
use capmix_core::scorer::MixScorer;
use criterion::{criterion_group, criterion_main, Criterion};
use std::hint::black_box;
use std::sync::Arc;

const PALETTE: [[u8; 3]; 6] = [
    [0, 128, 0],
    [255, 255, 0],
    [255, 0, 0],
    [0, 0, 255],
    [255, 165, 0],
    [128, 0, 128],
];

fn bench_setup() -> (Arc<NeighborGraph>, Vec<Cap>) {
    let spec = TableSpec::new(600.0, 2000.0, 30.0).unwrap();
    let sites = spec.hex_sites();
    let graph = Arc::new(NeighborGraph::build(&sites, default_neighbor_radius(30.0)).unwrap());
    let caps = (0..sites.len())
        .map(|i| Cap {
            color: PALETTE[i % PALETTE.len()],
            type_id: (i % PALETTE.len()) as u32,
            label: String::new(),
        })
        .collect();
    (graph, caps)
}

fn bench_swap_delta(c: &mut Criterion) {
    let (graph, caps) = bench_setup();
    let mut scorer = MixScorer::new(Arc::clone(&graph));
    let mut colors: Vec<ColorKey> = caps.iter().map(Cap::key).collect();
    let current = scorer.total_cost(&colors);
    let mut rng = fastrand::Rng::with_seed(1);
    let sites = graph.len();

    c.bench_function("swap_delta", |b| {
        b.iter(|| {
            let a = rng.usize(0..sites);
            let mut j = rng.usize(0..sites - 1);
            if j >= a {
                j += 1;
            }
            let cost = scorer.swap_delta(&mut colors, a, j, current);
            colors.swap(a, j); // roll back so `current` stays valid
            black_box(cost)
        })
    });
}

fn bench_anneal_steps(c: &mut Criterion) {
    let (graph, caps) = bench_setup();

    c.bench_function("anneal_1k_steps", |b| {
        b.iter_batched(
            || {
                Annealer::new(
                    MixScorer::new(Arc::clone(&graph)),
                    &caps,
                    Schedule::default(),
                    Some(7),
                )
                .unwrap()
            },
            |mut annealer| {
                for _ in 0..1_000 {
                    black_box(annealer.step().unwrap());
                }
                annealer
            },
            criterion::BatchSize::LargeInput,
        )
    });
}

criterion_group!(benches, bench_swap_delta, bench_anneal_steps);
criterion_main!(benches);
