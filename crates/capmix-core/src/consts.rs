// ===== capmix/crates/capmix-core/src/consts.rs =====
/// Vertical pitch between staggered hex rows, as a fraction of the cap
/// diameter (sqrt(3)/2).
pub const HEX_ROW_PITCH: f32 = 0.866_025_4;

/// Neighbor radius as a multiple of the cap diameter. In a hex packing the
/// six surrounding caps sit at exactly one diameter, the next ring at
/// sqrt(3) diameters, so 1.1 captures exactly the adjacent ring.
pub const NEIGHBOR_RADIUS_FACTOR: f32 = 1.1;

/// Default annealing step budget for one table.
pub const DEFAULT_ITERATIONS: u64 = 100_000;

/// Default starting temperature.
pub const DEFAULT_TEMPERATURE: f64 = 1.0;

/// Default geometric cooling rate, applied every step.
pub const DEFAULT_COOLING_RATE: f64 = 5e-5;

/// Steps between progress reports.
pub const DEFAULT_REPORT_INTERVAL: u64 = 1_000;
