use crate::reports;
use capmix_core::api::MixJob;
use capmix_core::caps::CapPool;
use capmix_core::config::Config;
use capmix_core::error::CapResult;
use capmix_core::optimizer::runner::{MixOptions, TraceSink};
use clap::Args;
use std::fs;
use std::path::PathBuf;
use std::sync::atomic::AtomicBool;

#[derive(Args, Debug, Clone)]
pub struct MixArgs {
    #[command(flatten)]
    pub config: Config,

    /// Cap catalog to draw from.
    #[arg(short, long, default_value = "caps.json")]
    pub caps: PathBuf,

    /// Output table document.
    #[arg(short, long, default_value = "table.json")]
    pub out: PathBuf,

    #[arg(short = 'S', long)]
    pub seed: Option<u64>,
}

pub fn run(args: MixArgs) -> CapResult<()> {
    println!("🧢 Loading cap catalog: {}", args.caps.display());
    let pool = CapPool::load_from_file(&args.caps)?;
    println!("   {} caps available", pool.len());

    let spec = args.config.table.spec()?;
    let radius = args
        .config
        .search
        .neighbor_radius(args.config.table.cap_diameter);

    let job = MixJob::builder()
        .table(spec)
        .pool(pool)
        .options(MixOptions::from(&args.config))
        .seed(args.seed)
        .radius(Some(radius))
        .build();

    let cancel = AtomicBool::new(false);
    let outcome = job.run(&TraceSink, &cancel)?;

    reports::print_summary(&outcome);
    reports::print_color_histogram(&outcome);

    let doc = outcome.document();
    fs::write(&args.out, serde_json::to_string_pretty(&doc)?)?;
    println!("💾 Table written to {}", args.out.display());
    Ok(())
}
