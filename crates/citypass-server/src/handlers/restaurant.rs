//! Restaurant endpoints, mirror of the recreation ones.

use std::time::Instant;

use axum::extract::{Path, State};
use axum::response::Response;
use citypass_core::AppError;
use citypass_types::{Restaurant, RestaurantDraft};
use serde::{Deserialize, Serialize};

use crate::httputil::{self, JsonOrForm};
use crate::AppState;

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CityForm {
    pub restaurant_city: String,
}

#[derive(Serialize)]
struct CreateRestaurantResponse {
    restaurant_id: i64,
}

#[derive(Serialize)]
struct RestaurantData {
    restaurant: Restaurant,
}

#[derive(Serialize)]
struct RestaurantsData {
    restaurants: Vec<Restaurant>,
}

pub async fn create(
    State(state): State<AppState>,
    JsonOrForm(draft): JsonOrForm<RestaurantDraft>,
) -> Response {
    let started = Instant::now();

    match state.restaurants.create_restaurant(draft).await {
        Ok(restaurant_id) => httputil::ok(
            started,
            &["Success create restaurant"],
            CreateRestaurantResponse { restaurant_id },
        ),
        Err(err) => httputil::error(started, err),
    }
}

pub async fn get(State(state): State<AppState>, Path(restaurant_id): Path<String>) -> Response {
    let started = Instant::now();

    let Ok(restaurant_id) = restaurant_id.parse::<i64>() else {
        return httputil::error(started, AppError::BadRequest);
    };

    match state.restaurants.get_restaurant(restaurant_id).await {
        Ok(restaurant) => httputil::ok(
            started,
            &["Success get restaurant"],
            RestaurantData { restaurant },
        ),
        Err(err) => httputil::error(started, err),
    }
}

pub async fn list(State(state): State<AppState>) -> Response {
    let started = Instant::now();

    match state.restaurants.get_all_restaurants().await {
        Ok(restaurants) => httputil::ok(
            started,
            &["Success get all restaurants"],
            RestaurantsData { restaurants },
        ),
        Err(err) => httputil::error(started, err),
    }
}

/// Listing filtered by city; the collection is returned bare in `data`.
pub async fn by_city(
    State(state): State<AppState>,
    JsonOrForm(form): JsonOrForm<CityForm>,
) -> Response {
    let started = Instant::now();

    match state
        .restaurants
        .get_restaurants_by_city(&form.restaurant_city)
        .await
    {
        Ok(restaurants) => {
            httputil::ok(started, &["Success get restaurants by city"], restaurants)
        }
        Err(err) => httputil::error(started, err),
    }
}

pub async fn delete(State(state): State<AppState>, Path(restaurant_id): Path<String>) -> Response {
    let started = Instant::now();

    let Ok(restaurant_id) = restaurant_id.parse::<i64>() else {
        return httputil::error(started, AppError::BadRequest);
    };

    match state.restaurants.delete_restaurant(restaurant_id).await {
        Ok(()) => httputil::ok(
            started,
            &["Success delete restaurant"],
            serde_json::Value::Null,
        ),
        Err(err) => httputil::error(started, err),
    }
}
