//! Application state: configuration, the GraphQL forwarder, and the current view snapshot.
//!
//! The snapshot is only ever replaced, never mutated in place: `dispatch` runs the
//! reducer under the write lock and swaps in the result. Loaders run as background
//! tasks and report back through `dispatch`, so failures never touch prior state.

use std::sync::{
    atomic::{AtomicU64, Ordering},
    Arc,
};
use tokio::sync::RwLock;
use tracing::{error, info, instrument, warn};

use crate::catalog::{load_catalog, CatalogSource};
use crate::config::AppConfig;
use crate::graphql::GraphqlProxy;
use crate::solved::{fetch_solved, SolvedError};
use crate::view::{reduce, Event, Snapshot};

pub struct AppState {
    pub config: AppConfig,
    pub proxy: GraphqlProxy,
    http: reqwest::Client,
    snapshot: RwLock<Arc<Snapshot>>,
    refresh_seq: AtomicU64,
}

impl AppState {
    pub fn new(config: AppConfig) -> Self {
        let proxy = GraphqlProxy::new(config.graphql_url.clone());
        let snapshot = Arc::new(Snapshot::new(config.default_expanded));
        info!(target: "graph_tracker_backend", endpoint = %config.graphql_url, username = %config.username, limit = config.submission_limit, "State initialized");
        Self {
            config,
            proxy,
            http: reqwest::Client::new(),
            snapshot: RwLock::new(snapshot),
            refresh_seq: AtomicU64::new(0),
        }
    }

    pub async fn snapshot(&self) -> Arc<Snapshot> {
        self.snapshot.read().await.clone()
    }

    /// Apply one event and publish the resulting snapshot.
    #[instrument(level = "debug", skip_all)]
    pub async fn dispatch(&self, event: Event) -> Arc<Snapshot> {
        let mut current = self.snapshot.write().await;
        let next = Arc::new(reduce(&current, event));
        *current = next.clone();
        next
    }

    /// Load the catalog once. Failure leaves it unset, which consumers render as "loading".
    #[instrument(level = "info", skip(self), fields(source = %self.config.catalog_source))]
    pub async fn load_catalog(&self) {
        let source = CatalogSource::parse(&self.config.catalog_source);
        match load_catalog(&self.http, &source).await {
            Ok(catalog) => {
                self.dispatch(Event::CatalogLoaded(catalog)).await;
            }
            Err(e) => {
                error!(target: "catalog", %source, error = %e, "Error fetching problems catalog");
            }
        }
    }

    /// Reserve the next refresh sequence number (starts at 1).
    pub fn next_refresh_seq(&self) -> u64 {
        self.refresh_seq.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Run one solved-set refresh tagged `seq`. Any failure keeps the prior set.
    #[instrument(level = "info", skip(self))]
    pub async fn refresh_solved(&self, seq: u64) {
        match fetch_solved(&self.proxy, &self.config.username, self.config.submission_limit).await {
            Ok(solved) => {
                let snap = self.dispatch(Event::SolvedLoaded { seq, solved }).await;
                if snap.solved_seq != seq {
                    warn!(target: "solved", seq, applied = snap.solved_seq, "Discarded stale solved-set refresh");
                }
            }
            Err(SolvedError::Graphql(errors)) => {
                error!(target: "solved", seq, %errors, "GraphQL errors");
            }
            Err(e) => {
                error!(target: "solved", seq, error = %e, "Error fetching solved problems");
            }
        }
    }

    /// Start a refresh in the background and return its sequence number.
    pub fn spawn_refresh(self: &Arc<Self>) -> u64 {
        let seq = self.next_refresh_seq();
        let state = Arc::clone(self);
        tokio::spawn(async move { state.refresh_solved(seq).await });
        seq
    }
}
