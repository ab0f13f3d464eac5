use super::{Annealer, Schedule, Step};
use crate::caps::{Cap, CapPool};
use crate::config::Config;
use crate::consts::{DEFAULT_ITERATIONS, DEFAULT_REPORT_INTERVAL};
use crate::core_types::{ColorKey, MixResult};
use crate::error::{CapResult, CapmixError};
use crate::neighbors::NeighborGraph;
use crate::scorer::MixScorer;
use rayon::prelude::*;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{debug, info};

/// Knobs for one optimization run.
#[derive(Debug, Clone, Copy)]
pub struct MixOptions {
    pub iterations: u64,
    pub report_interval: u64,
    pub schedule: Schedule,
    /// Independent seeded restarts; the cheapest final layout wins.
    /// Restart attempts report nothing per step.
    pub attempts: usize,
}

impl Default for MixOptions {
    fn default() -> Self {
        Self {
            iterations: DEFAULT_ITERATIONS,
            report_interval: DEFAULT_REPORT_INTERVAL,
            schedule: Schedule::default(),
            attempts: 1,
        }
    }
}

impl From<&Config> for MixOptions {
    fn from(cfg: &Config) -> Self {
        Self {
            iterations: cfg.search.iterations,
            report_interval: cfg.search.report_interval,
            schedule: Schedule {
                initial_temperature: cfg.search.temperature,
                cooling_rate: cfg.search.cooling_rate,
            },
            attempts: cfg.search.attempts,
        }
    }
}

/// Receives updates during optimization.
/// `on_report`'s return value indicates whether the search should continue
/// (true) or abort (false).
pub trait ProgressSink: Send + Sync {
    /// Called inline after every accepted swap; the run does not proceed
    /// until it returns.
    fn on_swap(&self, _step: &Step) {}

    /// Called every `report_interval` steps.
    fn on_report(&self, _step: u64, _cost: u64, _temperature: f64) -> bool {
        true
    }
}

/// For callers that only want the final result.
pub struct NullSink;

impl ProgressSink for NullSink {}

/// Logs periodic reports through `tracing`.
pub struct TraceSink;

impl ProgressSink for TraceSink {
    fn on_report(&self, step: u64, cost: u64, temperature: f64) -> bool {
        info!(step, cost, temperature, "annealing progress");
        true
    }
}

pub struct Optimizer {
    options: MixOptions,
}

impl Optimizer {
    pub fn new(options: MixOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &MixOptions {
        &self.options
    }

    /// Drives the annealer for the configured number of iterations. Steps
    /// and notifications are strictly sequential. The cancel flag is
    /// checked once per iteration; the partial result is returned either
    /// way, and the annealer is stopped afterwards.
    pub fn run<S: ProgressSink>(
        &self,
        annealer: &mut Annealer,
        sink: &S,
        cancel: &AtomicBool,
    ) -> CapResult<MixResult> {
        let report_interval = self.options.report_interval.max(1);

        for _ in 0..self.options.iterations {
            if cancel.load(Ordering::Relaxed) {
                debug!(steps = annealer.steps(), "run cancelled");
                break;
            }

            let step = annealer.step()?;

            if step.swapped.is_some() {
                sink.on_swap(&step);
            }
            if step.index % report_interval == 0
                && !sink.on_report(step.index, step.cost, step.temperature)
            {
                break;
            }
        }

        annealer.stop();
        debug!(
            state = %annealer.state(),
            cost = annealer.cost(),
            steps = annealer.steps(),
            "run complete"
        );
        Ok(MixResult {
            cost: annealer.cost(),
            steps: annealer.steps(),
            assignment: annealer.assignment().to_vec(),
        })
    }

    /// Best of `attempts` independent restarts, run in parallel. Each
    /// attempt reshuffles the pool and anneals with its own RNG stream;
    /// the neighbor graph is shared read-only.
    pub fn run_restarts(
        &self,
        graph: Arc<NeighborGraph>,
        pool: &CapPool,
        seed: u64,
        cancel: &AtomicBool,
    ) -> CapResult<(MixResult, Vec<Cap>)> {
        let attempts = self.options.attempts.max(1);

        let runs: Vec<(MixResult, Vec<Cap>)> = (0..attempts as u64)
            .into_par_iter()
            .map(|attempt| {
                let attempt_seed = seed.wrapping_add(attempt);
                let caps = pool.shuffled(attempt_seed);
                let scorer = MixScorer::new(Arc::clone(&graph));
                let mut annealer =
                    Annealer::new(scorer, &caps, self.options.schedule, Some(attempt_seed))?;
                let result = self.run(&mut annealer, &NullSink, cancel)?;
                debug!(attempt, cost = result.cost, "restart finished");
                Ok((result, caps))
            })
            .collect::<CapResult<Vec<_>>>()?;

        runs.into_iter()
            .min_by_key(|(result, _)| result.cost)
            .ok_or_else(|| CapmixError::Config("attempts must be at least 1".to_string()))
    }
}

/// Initial cost of the caller-ordered cap prefix on this graph.
pub fn initial_cost(graph: Arc<NeighborGraph>, caps: &[Cap]) -> u64 {
    let mut scorer = MixScorer::new(Arc::clone(&graph));
    let colors: Vec<ColorKey> = caps[..graph.len()].iter().map(Cap::key).collect();
    scorer.total_cost(&colors)
}
