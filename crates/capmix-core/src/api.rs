// ===== capmix/crates/capmix-core/src/api.rs =====
use crate::caps::{Cap, CapPool};
use crate::core_types::Assignment;
use crate::error::CapResult;
use crate::geometry::{default_neighbor_radius, Site, TableSpec};
use crate::neighbors::NeighborGraph;
use crate::optimizer::runner::{initial_cost, MixOptions, Optimizer, ProgressSink};
use crate::optimizer::Annealer;
use crate::scorer::MixScorer;
use capmix_protocol::table::{layout_fingerprint, Placement, TableDocument};
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use tracing::info;
use typed_builder::TypedBuilder;

/// One end-to-end mixing job: table dimensions and cap pool in, optimized
/// placements out.
#[derive(TypedBuilder)]
pub struct MixJob {
    table: TableSpec,
    pool: CapPool,
    #[builder(default)]
    options: MixOptions,
    #[builder(default)]
    seed: Option<u64>,
    #[builder(default)]
    radius: Option<f32>,
}

#[derive(Debug)]
pub struct MixOutcome {
    pub sites: Vec<Site>,
    /// Participating caps in the shuffled order the assignment indexes.
    pub caps: Vec<Cap>,
    pub assignment: Assignment,
    pub initial_cost: u64,
    pub cost: u64,
    pub steps: u64,
    pub seed: u64,
    pub cap_diameter: f32,
}

impl MixJob {
    /// Runs the full pipeline: hex sites, neighbor graph, seeded shuffle,
    /// annealing. A missing seed is drawn once and recorded in the outcome
    /// so any run can be reproduced afterwards.
    pub fn run<S: ProgressSink>(self, sink: &S, cancel: &AtomicBool) -> CapResult<MixOutcome> {
        let MixJob {
            table,
            pool,
            options,
            seed,
            radius,
        } = self;

        let sites = table.hex_sites();
        let radius = radius.unwrap_or_else(|| default_neighbor_radius(table.cap_diameter));
        let seed = seed.unwrap_or_else(|| fastrand::u64(..));

        let graph = Arc::new(NeighborGraph::build(&sites, radius)?);
        info!(
            sites = sites.len(),
            radius,
            mean_degree = graph.mean_degree(),
            "neighbor graph ready"
        );

        let optimizer = Optimizer::new(options);

        let (result, caps, start_cost) = if options.attempts > 1 {
            let (result, caps) = optimizer.run_restarts(Arc::clone(&graph), &pool, seed, cancel)?;
            let start_cost = initial_cost(Arc::clone(&graph), &caps);
            (result, caps, start_cost)
        } else {
            let caps = pool.shuffled(seed);
            let scorer = MixScorer::new(Arc::clone(&graph));
            let mut annealer = Annealer::new(scorer, &caps, options.schedule, Some(seed))?;
            let start_cost = annealer.cost();
            let result = optimizer.run(&mut annealer, sink, cancel)?;
            (result, caps, start_cost)
        };

        info!(
            initial_cost = start_cost,
            final_cost = result.cost,
            steps = result.steps,
            "mixing finished"
        );

        Ok(MixOutcome {
            sites,
            caps,
            assignment: result.assignment,
            initial_cost: start_cost,
            cost: result.cost,
            steps: result.steps,
            seed,
            cap_diameter: table.cap_diameter,
        })
    }
}

impl MixOutcome {
    /// Wire placements in site order: each site's coordinates with the cap
    /// that ended up on it.
    pub fn placements(&self) -> Vec<Placement> {
        self.sites
            .iter()
            .zip(&self.assignment)
            .enumerate()
            .map(|(id, (site, &cap_idx))| {
                let cap = &self.caps[cap_idx as usize];
                Placement {
                    id: id as u32,
                    x: site.x,
                    y: site.y,
                    diameter: self.cap_diameter,
                    color: cap.color,
                    type_id: cap.type_id,
                }
            })
            .collect()
    }

    pub fn document(&self) -> TableDocument {
        let placements = self.placements();
        let fingerprint = layout_fingerprint(&placements);
        TableDocument {
            table_id: None,
            generated_at: None,
            cost: self.cost,
            fingerprint,
            placements,
        }
    }
}
