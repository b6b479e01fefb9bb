//! Same-origin forwarder for the remote GraphQL API.
//!
//! A single best-effort POST per call: no retry, no timeout, no rate limiting.
//! Both the `/api/leetcode` handler and the solved-set loader go through `forward`.

use reqwest::header::{CONTENT_TYPE, USER_AGENT};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, instrument};

#[derive(Debug, Error)]
pub enum ProxyError {
  #[error("request to GraphQL endpoint failed: {0}")]
  Transport(#[source] reqwest::Error),

  #[error("GraphQL endpoint returned a non-JSON body: {0}")]
  Body(#[source] reqwest::Error),
}

/// `{query, variables}` payload, forwarded as-is.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct GraphqlRequest {
  pub query: String,
  #[serde(default = "empty_object")]
  pub variables: Value,
}

fn empty_object() -> Value {
  Value::Object(Default::default())
}

/// Remote answer relayed to the caller. `status` is the raw HTTP status code.
#[derive(Clone, Debug, PartialEq)]
pub struct Forwarded {
  pub status: u16,
  pub body: Value,
}

#[derive(Clone)]
pub struct GraphqlProxy {
  client: reqwest::Client,
  pub endpoint: String,
}

impl GraphqlProxy {
  pub fn new(endpoint: impl Into<String>) -> Self {
    Self { client: reqwest::Client::new(), endpoint: endpoint.into() }
  }

  #[instrument(level = "info", skip(self, req), fields(endpoint = %self.endpoint, query_len = req.query.len()))]
  pub async fn forward(&self, req: &GraphqlRequest) -> Result<Forwarded, ProxyError> {
    let res = self.client.post(&self.endpoint)
      .header(USER_AGENT, "graph-tracker-backend/0.1")
      .header(CONTENT_TYPE, "application/json")
      .json(req)
      .send()
      .await
      .map_err(ProxyError::Transport)?;

    let status = res.status().as_u16();
    let body: Value = res.json().await.map_err(ProxyError::Body)?;
    debug!(target: "proxy", %status, "GraphQL response relayed");
    Ok(Forwarded { status, body })
  }
}
