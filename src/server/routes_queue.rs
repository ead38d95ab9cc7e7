use crate::queue::QueuedVideo;
use crate::server::AppContext;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use reelsearch_common::QueueError;
use serde::Deserialize;

pub fn queue_routes() -> Router<AppContext> {
    Router::new().route("/queues/:name", get(list_queue).post(add_to_queue))
}

type ApiError = (StatusCode, Json<serde_json::Value>);

fn queue_error(e: QueueError) -> ApiError {
    let status = match e {
        QueueError::InvalidImdbId(_) => StatusCode::BAD_REQUEST,
        QueueError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (status, Json(serde_json::json!({ "error": e.to_string() })))
}

async fn list_queue(
    State(ctx): State<AppContext>,
    Path(name): Path<String>,
) -> Result<Json<Vec<QueuedVideo>>, ApiError> {
    ctx.queues.list(&name).await.map(Json).map_err(queue_error)
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct AddVideoRequest {
    #[serde(default)]
    imdb_id: String,
}

async fn add_to_queue(
    State(ctx): State<AppContext>,
    Path(name): Path<String>,
    Json(payload): Json<AddVideoRequest>,
) -> Result<(StatusCode, Json<QueuedVideo>), ApiError> {
    let video = ctx
        .queues
        .add(&name, &payload.imdb_id)
        .await
        .map_err(queue_error)?;
    Ok((StatusCode::CREATED, Json(video)))
}
