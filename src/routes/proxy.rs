//! `/api/leetcode`: same-origin forward of a GraphQL `{query, variables}` body.
//!
//! POST only. The remote status and JSON body are relayed as-is; forwarding
//! failures become a generic 500 and the cause is only logged.

use std::sync::Arc;

use axum::{
  body::Bytes,
  extract::State,
  http::{header, Method, StatusCode},
  response::{IntoResponse, Response},
  Json,
};
use tracing::{debug, error, instrument, warn};

use crate::graphql::GraphqlRequest;
use crate::protocol::{ErrorOut, MessageOut};
use crate::state::AppState;
use crate::util::trunc_for_log;

const FORWARD_FAILED: &str = "Error fetching data from LeetCode";

#[instrument(level = "info", skip(state, method, body), fields(%method, body_len = body.len()))]
pub async fn graphql_proxy(State(state): State<Arc<AppState>>, method: Method, body: Bytes) -> Response {
  if method != Method::POST {
    return (
      StatusCode::METHOD_NOT_ALLOWED,
      [(header::ALLOW, "POST")],
      Json(MessageOut { message: "Only POST requests are allowed".into() }),
    )
      .into_response();
  }

  let req: GraphqlRequest = match serde_json::from_slice(&body) {
    Ok(req) => req,
    Err(e) => {
      warn!(target: "proxy", error = %e, "Rejected malformed GraphQL payload");
      return (StatusCode::BAD_REQUEST, Json(ErrorOut { error: format!("Invalid GraphQL payload: {e}") })).into_response();
    }
  };
  debug!(target: "proxy", query = %trunc_for_log(&req.query, 120), "Forwarding GraphQL request");

  match state.proxy.forward(&req).await {
    Ok(forwarded) => {
      let status = StatusCode::from_u16(forwarded.status).unwrap_or(StatusCode::BAD_GATEWAY);
      (status, Json(forwarded.body)).into_response()
    }
    Err(e) => {
      error!(target: "proxy", error = %e, "Error fetching data from LeetCode");
      (StatusCode::INTERNAL_SERVER_ERROR, Json(ErrorOut { error: FORWARD_FAILED.into() })).into_response()
    }
  }
}
