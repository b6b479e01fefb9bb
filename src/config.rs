//! Application configuration: optional TOML file, then environment overrides.
//!
//! TOML schema (every key optional):
//!
//! ```toml
//! port = 3000
//! graphql_url = "https://leetcode.com/graphql"
//! username = "ganeshknsml"
//! submission_limit = 1000
//! catalog_source = "./static/problems.json"
//! static_dir = "./static"
//! default_expanded = false
//! ```

use std::str::FromStr;

use serde::Deserialize;
use tracing::{error, info, warn};

pub const DEFAULT_GRAPHQL_URL: &str = "https://leetcode.com/graphql";
pub const DEFAULT_USERNAME: &str = "ganeshknsml";
pub const DEFAULT_SUBMISSION_LIMIT: u32 = 1000;

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct AppConfig {
  pub port: u16,
  pub graphql_url: String,
  pub username: String,
  pub submission_limit: u32,
  /// Filesystem path or http(s) URL of the catalog document.
  pub catalog_source: String,
  pub static_dir: String,
  pub default_expanded: bool,
}

impl Default for AppConfig {
  fn default() -> Self {
    Self {
      port: 3000,
      graphql_url: DEFAULT_GRAPHQL_URL.into(),
      username: DEFAULT_USERNAME.into(),
      submission_limit: DEFAULT_SUBMISSION_LIMIT,
      catalog_source: "./static/problems.json".into(),
      static_dir: "./static".into(),
      default_expanded: false,
    }
  }
}

impl AppConfig {
  /// TRACKER_CONFIG_PATH (if any) first, then individual env vars on top.
  pub fn from_env() -> Self {
    let base = load_toml_from_env().unwrap_or_default();
    base.with_overrides(|key| std::env::var(key).ok())
  }

  /// Apply env-style overrides from an arbitrary lookup; unparsable values are ignored.
  pub fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
    if let Some(v) = parse_var::<u16>(&lookup, "PORT") { self.port = v; }
    if let Some(v) = lookup("LEETCODE_GRAPHQL_URL") { self.graphql_url = v; }
    if let Some(v) = lookup("LEETCODE_USERNAME") { self.username = v; }
    if let Some(v) = parse_var::<u32>(&lookup, "SUBMISSION_LIMIT") { self.submission_limit = v; }
    if let Some(v) = lookup("CATALOG_SOURCE") { self.catalog_source = v; }
    if let Some(v) = lookup("STATIC_DIR") { self.static_dir = v; }
    if let Some(v) = parse_var::<bool>(&lookup, "DEFAULT_EXPANDED") { self.default_expanded = v; }
    self
  }
}

fn parse_var<T: FromStr>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<T> {
  let raw = lookup(key)?;
  match raw.trim().parse::<T>() {
    Ok(v) => Some(v),
    Err(_) => {
      warn!(target: "graph_tracker_backend", %key, value = %raw, "Ignoring unparsable env value");
      None
    }
  }
}

/// Attempt to load `AppConfig` from TRACKER_CONFIG_PATH. On any parsing/IO error, returns None.
pub fn load_toml_from_env() -> Option<AppConfig> {
  let path = std::env::var("TRACKER_CONFIG_PATH").ok()?;
  match std::fs::read_to_string(&path) {
    Ok(s) => match toml::from_str::<AppConfig>(&s) {
      Ok(cfg) => {
        info!(target: "graph_tracker_backend", %path, "Loaded config (TOML)");
        Some(cfg)
      }
      Err(e) => {
        error!(target: "graph_tracker_backend", %path, error = %e, "Failed to parse TOML config");
        None
      }
    },
    Err(e) => {
      error!(target: "graph_tracker_backend", %path, error = %e, "Failed to read TOML config file");
      None
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use std::collections::HashMap;

  #[test]
  fn partial_toml_keeps_defaults() {
    let cfg: AppConfig = toml::from_str("username = \"someone\"\nsubmission_limit = 20\n").unwrap();
    assert_eq!(cfg.username, "someone");
    assert_eq!(cfg.submission_limit, 20);
    assert_eq!(cfg.graphql_url, DEFAULT_GRAPHQL_URL);
    assert_eq!(cfg.port, 3000);
  }

  #[test]
  fn env_overrides_win_and_bad_values_are_ignored() {
    let env: HashMap<&str, &str> = HashMap::from([
      ("PORT", "8080"),
      ("SUBMISSION_LIMIT", "lots"),
      ("DEFAULT_EXPANDED", "true"),
      ("LEETCODE_GRAPHQL_URL", "http://127.0.0.1:9999/graphql"),
    ]);
    let cfg = AppConfig::default().with_overrides(|k| env.get(k).map(|v| v.to_string()));
    assert_eq!(cfg.port, 8080);
    assert_eq!(cfg.submission_limit, DEFAULT_SUBMISSION_LIMIT);
    assert!(cfg.default_expanded);
    assert_eq!(cfg.graphql_url, "http://127.0.0.1:9999/graphql");
  }
}
