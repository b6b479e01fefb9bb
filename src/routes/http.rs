//! Dashboard endpoints: HTML page + form actions, and the JSON API.
//! Handlers are thin: they dispatch events and render the resulting snapshot.

use std::sync::Arc;
use axum::{
  extract::State,
  http::StatusCode,
  response::{Html, IntoResponse, Redirect, Response},
  Form, Json,
};
use tracing::{info, instrument};

use crate::protocol::*;
use crate::render::render_dashboard;
use crate::state::AppState;
use crate::view::{Event, ExpansionKey, Snapshot};

#[instrument(level = "info")]
pub async fn http_health() -> impl IntoResponse { Json(HealthOut { ok: true }) }

#[instrument(level = "info", skip(state))]
pub async fn http_get_dashboard(State(state): State<Arc<AppState>>) -> impl IntoResponse {
  Json(state.snapshot().await.dashboard())
}

#[instrument(level = "info", skip(state, body), fields(phase = %body.phase, subcategory = ?body.subcategory))]
pub async fn http_post_toggle(
  State(state): State<Arc<AppState>>,
  Json(body): Json<ToggleIn>,
) -> Response {
  let key = body.into_key();
  let snap = state.snapshot().await;
  if !key_exists(&*snap, &key) {
    return (StatusCode::NOT_FOUND, Json(ErrorOut { error: format!("Unknown section: {key:?}") })).into_response();
  }
  let next = state.dispatch(Event::Toggle(key)).await;
  Json(next.dashboard()).into_response()
}

#[instrument(level = "info", skip(state))]
pub async fn http_post_refresh(State(state): State<Arc<AppState>>) -> impl IntoResponse {
  let seq = state.spawn_refresh();
  info!(target: "solved", seq, "Solved-set refresh requested");
  (StatusCode::ACCEPTED, Json(RefreshOut { seq }))
}

#[instrument(level = "info", skip(state))]
pub async fn page_index(State(state): State<Arc<AppState>>) -> Html<String> {
  let view = state.snapshot().await.dashboard();
  Html(render_dashboard(&view, &state.config.username))
}

#[instrument(level = "info", skip(state, form), fields(phase = %form.phase))]
pub async fn page_toggle(State(state): State<Arc<AppState>>, Form(form): Form<ToggleIn>) -> Redirect {
  let key = form.into_key();
  let snap = state.snapshot().await;
  if key_exists(&*snap, &key) {
    state.dispatch(Event::Toggle(key)).await;
  }
  Redirect::to("/")
}

#[instrument(level = "info", skip(state))]
pub async fn page_refresh(State(state): State<Arc<AppState>>) -> Redirect {
  let seq = state.spawn_refresh();
  info!(target: "solved", seq, "Solved-set refresh requested from page");
  Redirect::to("/")
}

/// Toggles are only accepted for sections of the loaded catalog.
fn key_exists(snap: &Snapshot, key: &ExpansionKey) -> bool {
  let Some(catalog) = snap.catalog.as_deref() else { return false };
  match key {
    ExpansionKey::Phase(p) => catalog.phase(p).is_some(),
    ExpansionKey::Subcategory(p, s) => catalog.phase(p).and_then(|phase| phase.subcategory(s)).is_some(),
  }
}
