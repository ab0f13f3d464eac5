use crate::state::AppState;
use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::extract::State;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::Router;
use capmix_core::api::MixJob;
use capmix_core::geometry::TableSpec;
use capmix_core::optimizer::runner::{MixOptions, ProgressSink};
use chrono::Utc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{info, warn};
use uuid::Uuid;

use capmix_protocol::table::{layout_fingerprint, ServerMessage, TableRequest};

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/health", get(health))
        .route("/ws", get(ws_upgrade))
}

async fn health() -> &'static str {
    "ok"
}

async fn ws_upgrade(ws: WebSocketUpgrade, State(state): State<Arc<AppState>>) -> impl IntoResponse {
    ws.on_upgrade(move |socket| ws_session(socket, state))
}

/// One client session: every text frame is a table request, answered with
/// periodic progress frames and a final `new_table` frame.
async fn ws_session(mut socket: WebSocket, state: Arc<AppState>) {
    while let Some(Ok(frame)) = socket.recv().await {
        let Message::Text(raw) = frame else { continue };

        let request: TableRequest = match serde_json::from_str(&raw) {
            Ok(request) => request,
            Err(e) => {
                warn!("malformed table request: {e}");
                let _ = send(&mut socket, &ServerMessage::Error {
                    message: e.to_string(),
                })
                .await;
                continue;
            }
        };

        if let Err(e) = handle_request(&mut socket, &state, request).await {
            warn!("table generation failed: {e}");
            let _ = send(&mut socket, &ServerMessage::Error {
                message: e.to_string(),
            })
            .await;
        }
    }
    info!("client disconnected");
}

/// Forwards periodic annealing reports into the session channel. A closed
/// channel means the client is gone, which aborts the run.
struct ChannelSink {
    tx: mpsc::UnboundedSender<ServerMessage>,
}

impl ProgressSink for ChannelSink {
    fn on_report(&self, step: u64, cost: u64, temperature: f64) -> bool {
        self.tx
            .send(ServerMessage::Progress {
                step,
                cost,
                temperature,
            })
            .is_ok()
    }
}

async fn handle_request(
    socket: &mut WebSocket,
    state: &Arc<AppState>,
    request: TableRequest,
) -> anyhow::Result<()> {
    info!(
        width = request.table_width,
        height = request.table_height,
        diameter = request.caps_diameter,
        "new table requested"
    );

    let spec = TableSpec::new(
        request.table_width,
        request.table_height,
        request.caps_diameter,
    )?;
    let options = MixOptions {
        iterations: request.iterations.unwrap_or(state.default_iterations),
        ..MixOptions::default()
    };

    let job = MixJob::builder()
        .table(spec)
        .pool(state.pool.clone())
        .options(options)
        .seed(request.seed)
        .build();

    let (tx, mut rx) = mpsc::unbounded_channel();
    let cancel = Arc::new(AtomicBool::new(false));
    let worker_cancel = Arc::clone(&cancel);

    // The optimizer is synchronous; run it off the async executor and
    // stream its reports through the channel.
    let worker = tokio::task::spawn_blocking(move || {
        let sink = ChannelSink { tx };
        job.run(&sink, &worker_cancel)
    });

    while let Some(message) = rx.recv().await {
        if send(socket, &message).await.is_err() {
            cancel.store(true, Ordering::Relaxed);
        }
    }

    let outcome = worker.await??;
    let placements = outcome.placements();
    let reply = ServerMessage::NewTable {
        table_id: Uuid::new_v4().to_string(),
        generated_at: Utc::now().to_rfc3339(),
        cost: outcome.cost,
        fingerprint: layout_fingerprint(&placements),
        data: placements,
    };
    send(socket, &reply).await?;
    info!(cost = outcome.cost, steps = outcome.steps, "table served");
    Ok(())
}

async fn send(socket: &mut WebSocket, message: &ServerMessage) -> anyhow::Result<()> {
    let text = serde_json::to_string(message)?;
    socket.send(Message::Text(text.into())).await?;
    Ok(())
}
