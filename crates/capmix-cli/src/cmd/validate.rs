use crate::reports;
use capmix_core::core_types::{color_key, ColorKey};
use capmix_core::error::{CapResult, CapmixError};
use capmix_core::geometry::{default_neighbor_radius, Site};
use capmix_core::neighbors::NeighborGraph;
use capmix_core::scorer::MixScorer;
use capmix_protocol::table::{layout_fingerprint, TableDocument};
use clap::Args;
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::warn;

#[derive(Args, Debug, Clone)]
pub struct ValidateArgs {
    /// Table document to check.
    #[arg(default_value = "table.json")]
    pub table: PathBuf,

    /// Neighbor radius override; defaults to 1.1 x the placement diameter.
    #[arg(long)]
    pub radius: Option<f32>,
}

pub fn run(args: ValidateArgs) -> CapResult<()> {
    let content = fs::read_to_string(&args.table)?;
    let doc: TableDocument = serde_json::from_str(&content)?;
    if doc.placements.is_empty() {
        return Err(CapmixError::EmptySiteSet);
    }

    let sites: Vec<Site> = doc
        .placements
        .iter()
        .map(|p| Site { x: p.x, y: p.y })
        .collect();
    let diameter = doc.placements[0].diameter;
    let radius = args
        .radius
        .unwrap_or_else(|| default_neighbor_radius(diameter));

    let graph = Arc::new(NeighborGraph::build(&sites, radius)?);
    let mean_degree = graph.mean_degree();
    let mut scorer = MixScorer::new(graph);

    let colors: Vec<ColorKey> = doc
        .placements
        .iter()
        .map(|p| color_key(p.color))
        .collect();
    let recomputed = scorer.total_cost(&colors);

    let fingerprint_ok = layout_fingerprint(&doc.placements) == doc.fingerprint;
    if recomputed != doc.cost {
        warn!(
            recorded = doc.cost,
            recomputed, "cost mismatch (was the table generated with another radius?)"
        );
    }

    reports::print_validation(&doc, recomputed, mean_degree, fingerprint_ok);
    Ok(())
}
