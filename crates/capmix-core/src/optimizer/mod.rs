// ===== capmix/crates/capmix-core/src/optimizer/mod.rs =====
pub mod runner;

use crate::caps::Cap;
use crate::consts::{DEFAULT_COOLING_RATE, DEFAULT_TEMPERATURE};
use crate::core_types::{key_rgb, Assignment, ColorKey};
use crate::error::{CapResult, CapmixError};
use crate::scorer::MixScorer;
use capmix_protocol::color::Rgb;
use serde::{Deserialize, Serialize};
use strum_macros::Display;

/// Annealing control parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Schedule {
    pub initial_temperature: f64,
    pub cooling_rate: f64,
}

impl Default for Schedule {
    fn default() -> Self {
        Self {
            initial_temperature: DEFAULT_TEMPERATURE,
            cooling_rate: DEFAULT_COOLING_RATE,
        }
    }
}

impl Schedule {
    pub fn validate(&self) -> CapResult<()> {
        if self.initial_temperature <= 0.0 {
            return Err(CapmixError::InvalidTemperature(self.initial_temperature));
        }
        if self.cooling_rate <= 0.0 || self.cooling_rate >= 1.0 {
            return Err(CapmixError::InvalidCoolingRate(self.cooling_rate));
        }
        Ok(())
    }
}

/// Lifecycle of one annealing run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "lowercase")]
pub enum RunState {
    Idle,
    Running,
    Stopped,
}

/// A committed swap: the two changed sites and the colors now on them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Swap {
    pub sites: [usize; 2],
    pub colors: [Rgb; 2],
}

/// Outcome of a single step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Step {
    pub index: u64,
    pub cost: u64,
    pub temperature: f64,
    pub swapped: Option<Swap>,
}

/// Owns the mutable state of one run: assignment, cost, temperature and the
/// RNG stream. A step either fully commits or leaves no trace, so cost and
/// assignment can never disagree at a step boundary.
#[derive(Debug)]
pub struct Annealer {
    scorer: MixScorer,
    assignment: Assignment,
    colors: Vec<ColorKey>,
    cost: u64,
    temperature: f64,
    cooling_rate: f64,
    steps: u64,
    state: RunState,
    rng: fastrand::Rng,
}

impl Annealer {
    /// Builds the initial state over the first `graph.len()` caps of `caps`
    /// in the caller's order (callers shuffle beforehand). Excess caps are
    /// ignored; too few caps fail fast.
    pub fn new(
        mut scorer: MixScorer,
        caps: &[Cap],
        schedule: Schedule,
        seed: Option<u64>,
    ) -> CapResult<Self> {
        schedule.validate()?;

        let sites = scorer.graph().len();
        if sites < 2 {
            return Err(CapmixError::TooFewSites(sites));
        }
        if caps.len() < sites {
            return Err(CapmixError::PoolTooSmall {
                required: sites,
                available: caps.len(),
            });
        }

        let assignment: Assignment = (0..sites as u32).collect();
        let colors: Vec<ColorKey> = caps[..sites].iter().map(Cap::key).collect();
        let cost = scorer.total_cost(&colors);

        let rng = match seed {
            Some(s) => fastrand::Rng::with_seed(s),
            None => fastrand::Rng::new(),
        };

        Ok(Self {
            scorer,
            assignment,
            colors,
            cost,
            temperature: schedule.initial_temperature,
            cooling_rate: schedule.cooling_rate,
            steps: 0,
            state: RunState::Idle,
            rng,
        })
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    pub fn cost(&self) -> u64 {
        self.cost
    }

    pub fn temperature(&self) -> f64 {
        self.temperature
    }

    pub fn steps(&self) -> u64 {
        self.steps
    }

    pub fn assignment(&self) -> &[u32] {
        &self.assignment
    }

    pub fn colors(&self) -> &[ColorKey] {
        &self.colors
    }

    /// One Metropolis step. Proposes a uniformly random distinct pair,
    /// evaluates the swap on the affected set, accepts or rejects, then
    /// advances the cooling schedule (cooling is independent of the
    /// acceptance outcome).
    pub fn step(&mut self) -> CapResult<Step> {
        if self.state == RunState::Stopped {
            return Err(CapmixError::Stopped);
        }
        self.state = RunState::Running;

        let sites = self.assignment.len();
        let a = self.rng.usize(0..sites);
        let mut b = self.rng.usize(0..sites - 1);
        if b >= a {
            b += 1;
        }

        let candidate = self.scorer.swap_delta(&mut self.colors, a, b, self.cost);
        let delta = candidate as i64 - self.cost as i64;

        let accept = if delta <= 0 {
            // Zero-delta swaps are committed outright.
            true
        } else if self.temperature <= 0.0 {
            false
        } else {
            self.rng.f64() < (-(delta as f64) / self.temperature).exp()
        };

        let swapped = if accept {
            self.assignment.swap(a, b);
            self.cost = candidate;
            Some(Swap {
                sites: [a, b],
                colors: [key_rgb(self.colors[a]), key_rgb(self.colors[b])],
            })
        } else {
            // Roll the candidate back; colors were swapped in place.
            self.colors.swap(a, b);
            None
        };

        self.temperature *= 1.0 - self.cooling_rate;
        self.steps += 1;

        Ok(Step {
            index: self.steps,
            cost: self.cost,
            temperature: self.temperature,
            swapped,
        })
    }

    /// Terminal; a stopped annealer accepts no further steps.
    pub fn stop(&mut self) {
        self.state = RunState::Stopped;
    }

    /// Full recomputation of the current cost. Must agree with the
    /// incrementally maintained value at every step boundary.
    pub fn verify_cost(&mut self) -> u64 {
        let Self { scorer, colors, .. } = self;
        scorer.total_cost(colors)
    }
}
