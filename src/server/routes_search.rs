use crate::server::AppContext;
use axum::{
    extract::{Query, State},
    http::{HeaderName, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use reelsearch_common::AggregationError;
use serde::Deserialize;

/// Set to `true` when at least one provider failed or timed out.
pub const PARTIAL_HEADER: HeaderName = HeaderName::from_static("x-reelsearch-partial");

pub fn search_routes() -> Router<AppContext> {
    Router::new().route("/search", get(search))
}

#[derive(Deserialize)]
struct SearchParams {
    #[serde(default)]
    search: String,
}

async fn search(
    State(ctx): State<AppContext>,
    Query(params): Query<SearchParams>,
) -> Result<Response, (StatusCode, Json<serde_json::Value>)> {
    let result = ctx.aggregator.aggregate(&params.search).await.map_err(|e| {
        let status = match e {
            AggregationError::InvalidQuery(_) => StatusCode::BAD_REQUEST,
            AggregationError::ConfigurationMissing(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, Json(serde_json::json!({ "error": e.to_string() })))
    })?;

    let partial = result.is_partial();
    let mut response = Json(result.records).into_response();
    if partial {
        response
            .headers_mut()
            .insert(PARTIAL_HEADER, HeaderValue::from_static("true"));
    }
    Ok(response)
}
