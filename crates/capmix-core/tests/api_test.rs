use capmix_core::api::MixJob;
use capmix_core::caps::{Cap, CapPool};
use capmix_core::core_types::{color_key, ColorKey};
use capmix_core::error::CapmixError;
use capmix_core::geometry::{default_neighbor_radius, Site, TableSpec};
use capmix_core::neighbors::NeighborGraph;
use capmix_core::optimizer::runner::{MixOptions, NullSink};
use capmix_core::scorer::MixScorer;
use capmix_protocol::table::layout_fingerprint;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

const PALETTE: [[u8; 3]; 5] = [
    [0, 128, 0],
    [255, 255, 0],
    [255, 0, 0],
    [0, 0, 255],
    [255, 165, 0],
];

fn test_pool(count: usize) -> CapPool {
    let caps: Vec<Cap> = (0..count)
        .map(|i| Cap {
            color: PALETTE[i % PALETTE.len()],
            type_id: (i % PALETTE.len()) as u32,
            label: format!("cap{i}"),
        })
        .collect();
    CapPool::new(caps).unwrap()
}

fn small_job(seed: u64, attempts: usize) -> MixJob {
    MixJob::builder()
        .table(TableSpec::new(200.0, 200.0, 30.0).unwrap())
        .pool(test_pool(100))
        .options(MixOptions {
            iterations: 2_000,
            attempts,
            ..MixOptions::default()
        })
        .seed(Some(seed))
        .build()
}

#[test]
fn job_places_one_cap_per_site() {
    let cancel = AtomicBool::new(false);
    let outcome = small_job(42, 1).run(&NullSink, &cancel).unwrap();

    assert_eq!(outcome.assignment.len(), outcome.sites.len());
    let placements = outcome.placements();
    assert_eq!(placements.len(), outcome.sites.len());
    assert!(placements.iter().all(|p| p.diameter == 30.0));
    assert_eq!(outcome.seed, 42);
}

#[test]
fn reported_cost_matches_a_fresh_recompute() {
    let cancel = AtomicBool::new(false);
    let outcome = small_job(42, 1).run(&NullSink, &cancel).unwrap();

    let placements = outcome.placements();
    let sites: Vec<Site> = placements.iter().map(|p| Site { x: p.x, y: p.y }).collect();
    let graph = NeighborGraph::build(&sites, default_neighbor_radius(30.0)).unwrap();
    let mut scorer = MixScorer::new(Arc::new(graph));
    let colors: Vec<ColorKey> = placements.iter().map(|p| color_key(p.color)).collect();

    assert_eq!(scorer.total_cost(&colors), outcome.cost);
}

#[test]
fn same_seed_reproduces_the_same_table() {
    let cancel = AtomicBool::new(false);
    let first = small_job(7, 1).run(&NullSink, &cancel).unwrap();
    let second = small_job(7, 1).run(&NullSink, &cancel).unwrap();

    assert_eq!(first.cost, second.cost);
    assert_eq!(
        layout_fingerprint(&first.placements()),
        layout_fingerprint(&second.placements())
    );
}

#[test]
fn document_carries_a_matching_fingerprint() {
    let cancel = AtomicBool::new(false);
    let outcome = small_job(1, 1).run(&NullSink, &cancel).unwrap();
    let doc = outcome.document();

    assert_eq!(doc.cost, outcome.cost);
    assert_eq!(doc.fingerprint, layout_fingerprint(&doc.placements));
    assert!(doc.table_id.is_none());
}

#[test]
fn restart_jobs_also_produce_full_tables() {
    let cancel = AtomicBool::new(false);
    let outcome = small_job(9, 3).run(&NullSink, &cancel).unwrap();
    assert_eq!(outcome.placements().len(), outcome.sites.len());
    assert_eq!(outcome.steps, 2_000);
}

#[test]
fn job_fails_fast_when_the_pool_is_too_small() {
    let cancel = AtomicBool::new(false);
    let job = MixJob::builder()
        .table(TableSpec::new(200.0, 200.0, 30.0).unwrap())
        .pool(test_pool(10))
        .seed(Some(1))
        .build();

    let err = job.run(&NullSink, &cancel).unwrap_err();
    assert!(matches!(err, CapmixError::PoolTooSmall { .. }), "{err}");
}
