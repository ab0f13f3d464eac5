use capmix_core::caps::CapPool;
use clap::Parser;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

mod routes;
mod state;

use crate::state::AppState;

#[derive(Parser)]
struct Args {
    /// Cap catalog served to every request.
    #[arg(long, short, default_value = "caps.json")]
    caps: PathBuf,

    #[arg(long, default_value_t = 3000)]
    port: u16,

    /// Annealing steps per generated table (request may override).
    #[arg(long, default_value_t = capmix_core::consts::DEFAULT_ITERATIONS)]
    iterations: u64,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();
    let args = Args::parse();

    info!("🧢 capmix server is initializing...");

    let pool = CapPool::load_from_file(&args.caps)?;
    info!(caps = pool.len(), "📂 Cap catalog loaded from {:?}", args.caps);

    let state = Arc::new(AppState::new(pool, args.iterations));

    let app = routes::router()
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], args.port));
    info!("🚀 Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
