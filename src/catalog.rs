//! Catalog loading: `problems.json` is a nested object phase → subcategory → `[{title, url}]`.
//!
//! Parsing goes through `serde_json::Map` (preserve_order) so the curated order
//! of phases and subcategories survives.

use serde_json::{Map, Value};
use thiserror::Error;
use tracing::{info, instrument};

use crate::domain::{Catalog, Phase, Problem, Subcategory};

#[derive(Debug, Error)]
pub enum CatalogError {
  #[error("failed to read catalog file {path}: {source}")]
  Io { path: String, #[source] source: std::io::Error },

  #[error("failed to fetch catalog from {url}: {source}")]
  Http { url: String, #[source] source: reqwest::Error },

  #[error("catalog is not valid JSON: {0}")]
  Json(#[from] serde_json::Error),

  #[error("unexpected catalog shape at {at}: {reason}")]
  Shape { at: String, reason: &'static str },
}

/// Where the catalog document lives.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CatalogSource {
  File(String),
  Url(String),
}

impl CatalogSource {
  pub fn parse(raw: &str) -> Self {
    if raw.starts_with("http://") || raw.starts_with("https://") {
      Self::Url(raw.to_string())
    } else {
      Self::File(raw.to_string())
    }
  }
}

impl std::fmt::Display for CatalogSource {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      Self::File(p) => write!(f, "file:{p}"),
      Self::Url(u) => f.write_str(u),
    }
  }
}

impl Catalog {
  pub fn from_json_str(s: &str) -> Result<Self, CatalogError> {
    let root: Value = serde_json::from_str(s)?;
    let phases = as_object(&root, "$")?
      .iter()
      .map(|(phase_name, subs)| parse_phase(phase_name, subs))
      .collect::<Result<Vec<_>, _>>()?;
    Ok(Self { phases })
  }
}

fn as_object<'a>(v: &'a Value, at: &str) -> Result<&'a Map<String, Value>, CatalogError> {
  v.as_object().ok_or_else(|| CatalogError::Shape { at: at.to_string(), reason: "expected an object" })
}

fn parse_phase(name: &str, v: &Value) -> Result<Phase, CatalogError> {
  let subcategories = as_object(v, name)?
    .iter()
    .map(|(sub_name, problems)| -> Result<Subcategory, CatalogError> {
      let at = format!("{name}/{sub_name}");
      let problems = problems
        .as_array()
        .ok_or_else(|| CatalogError::Shape { at: at.clone(), reason: "expected an array of problems" })?
        .iter()
        .map(|p| {
          serde_json::from_value::<Problem>(p.clone())
            .map_err(|_| CatalogError::Shape { at: at.clone(), reason: "problem needs string `title` and `url`" })
        })
        .collect::<Result<Vec<_>, _>>()?;
      Ok(Subcategory { name: sub_name.clone(), problems })
    })
    .collect::<Result<Vec<_>, _>>()?;
  Ok(Phase { name: name.to_string(), subcategories })
}

/// Read and parse the catalog once. Callers decide what a failure means.
#[instrument(level = "info", skip(http, source), fields(%source))]
pub async fn load_catalog(http: &reqwest::Client, source: &CatalogSource) -> Result<Catalog, CatalogError> {
  let raw = match source {
    CatalogSource::File(path) => tokio::fs::read_to_string(path)
      .await
      .map_err(|e| CatalogError::Io { path: path.clone(), source: e })?,
    CatalogSource::Url(url) => {
      fetch_text(http, url)
        .await
        .map_err(|e| CatalogError::Http { url: url.clone(), source: e })?
    }
  };
  let catalog = Catalog::from_json_str(&raw)?;
  info!(target: "catalog", phases = catalog.phases.len(), problems = catalog.problem_count(), "Catalog parsed");
  Ok(catalog)
}

async fn fetch_text(http: &reqwest::Client, url: &str) -> Result<String, reqwest::Error> {
  http.get(url).send().await?.error_for_status()?.text().await
}

#[cfg(test)]
mod tests {
  use super::*;

  const SAMPLE: &str = r#"{
    "Phase 2": {
      "Traversal": [
        {"title": "Number of Islands", "url": "https://leetcode.com/problems/number-of-islands/"},
        {"title": "Clone Graph", "url": "https://leetcode.com/problems/clone-graph/"}
      ]
    },
    "Phase 1": {
      "Basics": [],
      "Alpha": [{"title": "Find Center of Star Graph", "url": "https://leetcode.com/problems/find-center-of-star-graph"}]
    }
  }"#;

  #[test]
  fn parse_keeps_document_order() {
    let c = Catalog::from_json_str(SAMPLE).unwrap();
    let phases: Vec<_> = c.phases.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(phases, ["Phase 2", "Phase 1"]);
    let subs: Vec<_> = c.phases[1].subcategories.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(subs, ["Basics", "Alpha"]);
    assert_eq!(c.problem_count(), 3);
    assert_eq!(c.phases[0].subcategories[0].problems[1].slug(), "clone-graph");
  }

  #[test]
  fn wrong_shapes_are_rejected() {
    assert!(matches!(Catalog::from_json_str("[]"), Err(CatalogError::Shape { .. })));
    assert!(matches!(Catalog::from_json_str(r#"{"P": {"S": {}}}"#), Err(CatalogError::Shape { .. })));
    assert!(matches!(Catalog::from_json_str(r#"{"P": {"S": [{"title": 1}]}}"#), Err(CatalogError::Shape { .. })));
    assert!(matches!(Catalog::from_json_str("{"), Err(CatalogError::Json(_))));
  }

  #[test]
  fn source_kind_from_string() {
    assert_eq!(CatalogSource::parse("https://x/p.json"), CatalogSource::Url("https://x/p.json".into()));
    assert_eq!(CatalogSource::parse("./static/problems.json"), CatalogSource::File("./static/problems.json".into()));
  }

  #[tokio::test]
  async fn missing_file_is_an_io_error() {
    let source = CatalogSource::File("./definitely/not/here.json".into());
    let res = load_catalog(&reqwest::Client::new(), &source).await;
    assert!(matches!(res, Err(CatalogError::Io { .. })));
  }

  #[tokio::test]
  async fn url_source_is_fetched_and_parsed() {
    let url = crate::graphql::stub::spawn_raw("/problems.json", 200, "application/json", SAMPLE).await;
    let source = CatalogSource::parse(&url);
    assert!(matches!(source, CatalogSource::Url(_)));

    let catalog = load_catalog(&reqwest::Client::new(), &source).await.unwrap();
    assert_eq!(catalog.phases[0].name, "Phase 2");
    assert_eq!(catalog.problem_count(), 3);
  }

  #[tokio::test]
  async fn url_source_not_found_is_an_http_error() {
    let url = crate::graphql::stub::spawn_raw("/problems.json", 404, "text/plain", "not found").await;
    let res = load_catalog(&reqwest::Client::new(), &CatalogSource::Url(url)).await;
    assert!(matches!(res, Err(CatalogError::Http { .. })));
  }

  #[tokio::test]
  async fn bundled_catalog_parses() {
    let source = CatalogSource::File(concat!(env!("CARGO_MANIFEST_DIR"), "/static/problems.json").into());
    let catalog = load_catalog(&reqwest::Client::new(), &source).await.unwrap();
    assert!(!catalog.phases.is_empty());
  }
}
