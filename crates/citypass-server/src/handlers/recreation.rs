//! Recreation endpoints

use std::time::Instant;

use axum::extract::{Path, State};
use axum::response::Response;
use citypass_core::AppError;
use citypass_types::{Recreation, RecreationDraft};
use serde::{Deserialize, Serialize};

use crate::httputil::{self, JsonOrForm};
use crate::AppState;

/// Request body for the city listing. The city filter also arrives as a
/// JSON or form body, not a query parameter.
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CityForm {
    pub recreation_city: String,
}

#[derive(Serialize)]
struct CreateRecreationResponse {
    recreation_id: i64,
}

#[derive(Serialize)]
struct RecreationData {
    recreation: Recreation,
}

#[derive(Serialize)]
struct RecreationsData {
    recreations: Vec<Recreation>,
}

pub async fn create(
    State(state): State<AppState>,
    JsonOrForm(draft): JsonOrForm<RecreationDraft>,
) -> Response {
    let started = Instant::now();

    match state.recreations.create_recreation(draft).await {
        Ok(recreation_id) => httputil::ok(
            started,
            &["Success create recreation"],
            CreateRecreationResponse { recreation_id },
        ),
        Err(err) => httputil::error(started, err),
    }
}

pub async fn get(State(state): State<AppState>, Path(recreation_id): Path<String>) -> Response {
    let started = Instant::now();

    let Ok(recreation_id) = recreation_id.parse::<i64>() else {
        return httputil::error(started, AppError::BadRequest);
    };

    match state.recreations.get_recreation(recreation_id).await {
        Ok(recreation) => httputil::ok(
            started,
            &["Success get recreation"],
            RecreationData { recreation },
        ),
        Err(err) => httputil::error(started, err),
    }
}

pub async fn list(State(state): State<AppState>) -> Response {
    let started = Instant::now();

    match state.recreations.get_all_recreations().await {
        Ok(recreations) => httputil::ok(
            started,
            &["Success get all recreations"],
            RecreationsData { recreations },
        ),
        Err(err) => httputil::error(started, err),
    }
}

/// Listing filtered by city. The collection is returned bare in `data`,
/// without the wrapper object the unfiltered listing uses.
pub async fn by_city(
    State(state): State<AppState>,
    JsonOrForm(form): JsonOrForm<CityForm>,
) -> Response {
    let started = Instant::now();

    match state
        .recreations
        .get_recreations_by_city(&form.recreation_city)
        .await
    {
        Ok(recreations) => {
            httputil::ok(started, &["Success get recreations by city"], recreations)
        }
        Err(err) => httputil::error(started, err),
    }
}

pub async fn delete(State(state): State<AppState>, Path(recreation_id): Path<String>) -> Response {
    let started = Instant::now();

    let Ok(recreation_id) = recreation_id.parse::<i64>() else {
        return httputil::error(started, AppError::BadRequest);
    };

    match state.recreations.delete_recreation(recreation_id).await {
        Ok(()) => httputil::ok(
            started,
            &["Success delete recreation"],
            serde_json::Value::Null,
        ),
        Err(err) => httputil::error(started, err),
    }
}
