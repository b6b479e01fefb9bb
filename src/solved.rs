//! Solved-set loader: asks the remote GraphQL API (through the proxy) for the
//! tracked user's recent accepted submissions and turns them into a slug set.

use serde::Deserialize;
use serde_json::{json, Value};
use thiserror::Error;
use tracing::{info, instrument};

use crate::domain::SolvedSet;
use crate::graphql::{GraphqlProxy, GraphqlRequest, ProxyError};

pub const RECENT_AC_QUERY: &str = r#"
  query recentAcSubmissionList($username: String!, $limit: Int!) {
    recentAcSubmissionList(username: $username, limit: $limit) {
      titleSlug
    }
  }
"#;

#[derive(Debug, Error)]
pub enum SolvedError {
  #[error(transparent)]
  Proxy(#[from] ProxyError),

  #[error("GraphQL errors: {0}")]
  Graphql(Value),

  #[error("unexpected response (HTTP {status}): {reason}")]
  Shape { status: u16, reason: String },
}

pub fn recent_ac_request(username: &str, limit: u32) -> GraphqlRequest {
  GraphqlRequest {
    query: RECENT_AC_QUERY.to_string(),
    variables: json!({ "username": username, "limit": limit }),
  }
}

#[derive(Deserialize)]
struct Envelope {
  #[serde(default)]
  data: Option<Data>,
}
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct Data {
  #[serde(default)]
  recent_ac_submission_list: Option<Vec<Submission>>,
}
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct Submission {
  title_slug: String,
}

/// Interpret a relayed GraphQL response. A present, non-null `errors` field wins over any data.
pub fn solved_from_response(status: u16, body: Value) -> Result<SolvedSet, SolvedError> {
  if let Some(errors) = body.get("errors").filter(|e| !e.is_null()) {
    return Err(SolvedError::Graphql(errors.clone()));
  }
  let envelope: Envelope = serde_json::from_value(body)
    .map_err(|e| SolvedError::Shape { status, reason: e.to_string() })?;
  let list = envelope
    .data
    .and_then(|d| d.recent_ac_submission_list)
    .ok_or_else(|| SolvedError::Shape { status, reason: "missing data.recentAcSubmissionList".into() })?;
  Ok(list.into_iter().map(|s| s.title_slug).collect())
}

#[instrument(level = "info", skip(proxy), fields(endpoint = %proxy.endpoint))]
pub async fn fetch_solved(proxy: &GraphqlProxy, username: &str, limit: u32) -> Result<SolvedSet, SolvedError> {
  let forwarded = proxy.forward(&recent_ac_request(username, limit)).await?;
  let solved = solved_from_response(forwarded.status, forwarded.body)?;
  info!(target: "solved", %username, solved = solved.len(), "Accepted submissions fetched");
  Ok(solved)
}
