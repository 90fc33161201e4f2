//! Restaurant lookup endpoint.

use axum::Json;
use axum::extract::{Path, State};

use umami_core::restaurant::RestaurantRepository;
use umami_types::restaurant::Restaurant;

use crate::http::error::AppError;
use crate::state::AppState;

/// GET /api/restaurants/{id}
pub async fn get_restaurant(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Restaurant>, AppError> {
    state
        .restaurants
        .find_by_id(&id)
        .await?
        .map(Json)
        .ok_or_else(AppError::restaurant_not_found)
}
