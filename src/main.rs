//! Graph Problems Tracker · Backend
//!
//! - Axum HTTP server with a same-origin GraphQL proxy (`/api/leetcode`)
//! - Curated problem catalog served from ./static and joined against the
//!   tracked user's accepted submissions
//! - Dashboard as server-rendered HTML (`/`) and JSON (`/api/v1/dashboard`)
//!
//! Important env variables:
//!   PORT                  : u16 (default 3000)
//!   LEETCODE_GRAPHQL_URL  : default "https://leetcode.com/graphql"
//!   LEETCODE_USERNAME     : whose solves are overlaid (default "ganeshknsml")
//!   SUBMISSION_LIMIT      : default 1000
//!   CATALOG_SOURCE        : path or URL of problems.json (default ./static/problems.json)
//!   STATIC_DIR            : default ./static
//!   DEFAULT_EXPANDED      : "true" to start with every section expanded
//!   TRACKER_CONFIG_PATH   : optional TOML file with the same settings
//!   LOG_LEVEL             : tracing filter, e.g. "debug" or full directives
//!   LOG_FORMAT            : "pretty" (default) or "json"

mod telemetry;
mod util;
mod slug;
mod domain;
mod config;
mod graphql;
mod catalog;
mod solved;
mod view;
mod state;
mod protocol;
mod render;
mod routes;

use std::{net::SocketAddr, sync::Arc};
use tokio::net::TcpListener;
use tracing::{info, warn};

use crate::config::AppConfig;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
  telemetry::init_tracing();

  let config = AppConfig::from_env();
  let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
  let state = Arc::new(AppState::new(config));

  // Catalog and solved set load independently; either may finish first.
  {
    let state = state.clone();
    tokio::spawn(async move { state.load_catalog().await });
  }
  let seq = state.spawn_refresh();
  info!(target: "graph_tracker_backend", seq, "Initial solved-set refresh started");

  let app = build_router(state);

  let listener = TcpListener::bind(addr).await?;
  info!(target: "graph_tracker_backend", %addr, "HTTP server listening");
  axum::serve(listener, app).with_graceful_shutdown(shutdown_signal()).await?;
  Ok(())
}

async fn shutdown_signal() {
  if let Err(e) = tokio::signal::ctrl_c().await {
    warn!(target: "graph_tracker_backend", error = %e, "Failed to listen for shutdown signal");
    std::future::pending::<()>().await;
  }
  info!(target: "graph_tracker_backend", "Shutting down");
}
