//! HTTP request/response DTOs (serde ready).
//! The dashboard itself is serialized straight from `view::DashboardView`.

use serde::{Deserialize, Serialize};

/// Toggle request, used by both the JSON API and the HTML form.
/// An absent or empty `subcategory` addresses the whole phase.
#[derive(Debug, Deserialize)]
pub struct ToggleIn {
    pub phase: String,
    #[serde(default)]
    pub subcategory: Option<String>,
}

impl ToggleIn {
    pub fn into_key(self) -> crate::view::ExpansionKey {
        let sub = self.subcategory.filter(|s| !s.is_empty());
        crate::view::ExpansionKey::new(self.phase, sub)
    }
}

#[derive(Serialize)]
pub struct RefreshOut {
    pub seq: u64,
}

#[derive(Serialize)]
pub struct HealthOut {
    pub ok: bool,
}

/// 405 body of the proxy endpoint.
#[derive(Serialize)]
pub struct MessageOut {
    pub message: String,
}

/// Generic error body (proxy failures, bad payloads).
#[derive(Serialize)]
pub struct ErrorOut {
    pub error: String,
}
