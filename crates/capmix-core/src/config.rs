use crate::consts::{
    DEFAULT_COOLING_RATE, DEFAULT_ITERATIONS, DEFAULT_REPORT_INTERVAL, DEFAULT_TEMPERATURE,
};
use crate::error::CapResult;
use crate::geometry::{default_neighbor_radius, TableSpec};
use clap::Args;

#[derive(Args, Debug, Clone, Default)]
pub struct Config {
    #[command(flatten)]
    pub table: TableParams,
    #[command(flatten)]
    pub search: SearchParams,
}

#[derive(Args, Debug, Clone)]
pub struct TableParams {
    /// Table width in millimeters.
    #[arg(long, default_value_t = 600.0)]
    pub table_width: f32,

    /// Table height in millimeters.
    #[arg(long, default_value_t = 2000.0)]
    pub table_height: f32,

    /// Cap diameter in millimeters.
    #[arg(long, default_value_t = 30.0)]
    pub cap_diameter: f32,
}

#[derive(Args, Debug, Clone)]
pub struct SearchParams {
    #[arg(long, default_value_t = DEFAULT_ITERATIONS)]
    pub iterations: u64,

    #[arg(long, default_value_t = DEFAULT_TEMPERATURE)]
    pub temperature: f64,

    #[arg(long, default_value_t = DEFAULT_COOLING_RATE)]
    pub cooling_rate: f64,

    #[arg(long, default_value_t = DEFAULT_REPORT_INTERVAL)]
    pub report_interval: u64,

    /// Independent restarts; the best final layout wins.
    #[arg(long, default_value_t = 1)]
    pub attempts: usize,

    /// Neighbor radius override; defaults to 1.1 x cap diameter.
    #[arg(long)]
    pub radius: Option<f32>,
}

impl Default for TableParams {
    fn default() -> Self {
        Self {
            table_width: 600.0,
            table_height: 2000.0,
            cap_diameter: 30.0,
        }
    }
}

impl Default for SearchParams {
    fn default() -> Self {
        Self {
            iterations: DEFAULT_ITERATIONS,
            temperature: DEFAULT_TEMPERATURE,
            cooling_rate: DEFAULT_COOLING_RATE,
            report_interval: DEFAULT_REPORT_INTERVAL,
            attempts: 1,
            radius: None,
        }
    }
}

impl TableParams {
    pub fn spec(&self) -> CapResult<TableSpec> {
        TableSpec::new(self.table_width, self.table_height, self.cap_diameter)
    }
}

impl SearchParams {
    pub fn neighbor_radius(&self, cap_diameter: f32) -> f32 {
        self.radius
            .unwrap_or_else(|| default_neighbor_radius(cap_diameter))
    }
}
