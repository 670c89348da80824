use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use serde_json::json;

use super::service::{HouseService, TriageError};
use super::status::Status;
use super::store::{HouseStore, StoreError};

/// Router builder exposing the dashboard read path and the triage
/// mutation path.
pub fn house_router<R>(service: Arc<HouseService<R>>) -> Router
where
    R: HouseStore + 'static,
{
    Router::new()
        .route("/api/v1/houses", get(houses_handler::<R>))
        .route(
            "/api/v1/houses/:house_id/status",
            post(set_status_handler::<R>),
        )
        .route("/api/v1/board", get(board_handler::<R>))
        .with_state(service)
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct HousesQuery {
    status: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct StatusChangeRequest {
    status: String,
}

pub(crate) async fn houses_handler<R>(
    State(service): State<Arc<HouseService<R>>>,
    Query(query): Query<HousesQuery>,
) -> Response
where
    R: HouseStore + 'static,
{
    let status = match query.status.as_deref() {
        None => None,
        Some(label) => match Status::from_label(label) {
            Some(status) => Some(status),
            None => return unknown_status(label),
        },
    };

    match service.houses(status).await {
        Ok(houses) => (StatusCode::OK, axum::Json(houses)).into_response(),
        Err(err) => store_failure(err),
    }
}

pub(crate) async fn board_handler<R>(State(service): State<Arc<HouseService<R>>>) -> Response
where
    R: HouseStore + 'static,
{
    match service.board().await {
        Ok(columns) => (StatusCode::OK, axum::Json(columns)).into_response(),
        Err(err) => store_failure(err),
    }
}

pub(crate) async fn set_status_handler<R>(
    State(service): State<Arc<HouseService<R>>>,
    Path(house_id): Path<String>,
    axum::Json(request): axum::Json<StatusChangeRequest>,
) -> Response
where
    R: HouseStore + 'static,
{
    match service.set_status(&house_id, &request.status).await {
        Ok(house) => (StatusCode::OK, axum::Json(house)).into_response(),
        Err(TriageError::UnknownStatus(label)) => unknown_status(&label),
        Err(TriageError::UnknownHouse) => {
            let payload = json!({
                "error": format!("no tracked house with id {house_id}"),
            });
            (StatusCode::NOT_FOUND, axum::Json(payload)).into_response()
        }
        Err(TriageError::Store(err)) => store_failure(err),
    }
}

fn unknown_status(label: &str) -> Response {
    let payload = json!({
        "error": format!("'{label}' is not a registered status"),
    });
    (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(payload)).into_response()
}

fn store_failure(err: StoreError) -> Response {
    let payload = json!({ "error": err.to_string() });
    (StatusCode::BAD_GATEWAY, axum::Json(payload)).into_response()
}
