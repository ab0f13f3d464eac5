// ===== capmix/crates/capmix-core/src/scorer.rs =====
use crate::core_types::ColorKey;
use crate::neighbors::NeighborGraph;
use fnv::FnvHashMap;
use std::sync::Arc;

/// Neighborhood mismatch cost over a shared, read-only neighbor graph.
///
/// The scratch buffers (color counter, affected-set list, epoch marks) are
/// reused across calls, so the hot path allocates nothing after warmup.
#[derive(Debug)]
pub struct MixScorer {
    graph: Arc<NeighborGraph>,
    counts: FnvHashMap<ColorKey, u32>,
    affected: Vec<u32>,
    marked: Vec<u32>,
    epoch: u32,
}

impl MixScorer {
    pub fn new(graph: Arc<NeighborGraph>) -> Self {
        let sites = graph.len();
        Self {
            graph,
            counts: FnvHashMap::default(),
            affected: Vec::with_capacity(32),
            marked: vec![0; sites],
            epoch: 0,
        }
    }

    pub fn graph(&self) -> &NeighborGraph {
        &self.graph
    }

    /// Cost contributed by one site: neighbor count minus the multiplicity
    /// of the most repeated color among those neighbors. Zero neighbors
    /// cost zero.
    pub fn local_cost(&mut self, site: usize, colors: &[ColorKey]) -> u32 {
        local_cost_at(&self.graph, &mut self.counts, site, colors)
    }

    /// Sum of local costs over all sites. Initialization and verification
    /// only; the step loop goes through `swap_delta`.
    pub fn total_cost(&mut self, colors: &[ColorKey]) -> u64 {
        let mut total = 0u64;
        for site in 0..self.graph.len() {
            total += local_cost_at(&self.graph, &mut self.counts, site, colors) as u64;
        }
        total
    }

    /// Total cost of the assignment with `a` and `b` swapped, evaluated on
    /// the affected set only: neighbors(a) U neighbors(b) U {a, b}. Local
    /// cost outside that set cannot change, so the result equals a full
    /// recomputation on the swapped assignment.
    ///
    /// Swaps `colors[a]`/`colors[b]` in place; the caller reverts the swap
    /// when the candidate is rejected.
    pub fn swap_delta(
        &mut self,
        colors: &mut [ColorKey],
        a: usize,
        b: usize,
        current_cost: u64,
    ) -> u64 {
        self.mark_affected(a, b);

        let Self {
            graph,
            counts,
            affected,
            ..
        } = self;

        let mut before = 0i64;
        for &site in affected.iter() {
            before += local_cost_at(graph, counts, site as usize, colors) as i64;
        }

        colors.swap(a, b);

        let mut after = 0i64;
        for &site in affected.iter() {
            after += local_cost_at(graph, counts, site as usize, colors) as i64;
        }

        (current_cost as i64 + (after - before)) as u64
    }

    /// Collects the affected set, deduplicated with epoch stamps.
    fn mark_affected(&mut self, a: usize, b: usize) {
        if self.epoch == u32::MAX {
            self.marked.fill(0);
            self.epoch = 0;
        }
        self.epoch += 1;

        self.affected.clear();
        let Self {
            graph,
            affected,
            marked,
            epoch,
            ..
        } = self;

        let mut push = |site: u32| {
            if marked[site as usize] != *epoch {
                marked[site as usize] = *epoch;
                affected.push(site);
            }
        };

        push(a as u32);
        push(b as u32);
        for &n in graph.neighbors(a) {
            push(n);
        }
        for &n in graph.neighbors(b) {
            push(n);
        }
    }
}

#[inline(always)]
fn local_cost_at(
    graph: &NeighborGraph,
    counts: &mut FnvHashMap<ColorKey, u32>,
    site: usize,
    colors: &[ColorKey],
) -> u32 {
    let neighbors = graph.neighbors(site);
    if neighbors.is_empty() {
        return 0;
    }

    counts.clear();
    let mut top = 0u32;
    for &n in neighbors {
        let c = counts.entry(colors[n as usize]).or_insert(0);
        *c += 1;
        if *c > top {
            top = *c;
        }
    }
    neighbors.len() as u32 - top
}
