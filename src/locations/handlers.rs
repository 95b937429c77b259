use axum::{
    extract::State,
    http::StatusCode,
    routing::get,
    Json, Router,
};
use tracing::instrument;

use crate::{
    auth::extractors::AuthUser,
    error::{ApiError, ApiResult},
    locations::{
        dto::{CreateLocationRequest, LocationResponse},
        repo::Location,
        services::create_verified,
    },
    state::AppState,
};

pub fn location_routes() -> Router<AppState> {
    Router::new().route("/locations", get(list_locations).post(create_location))
}

#[instrument(skip(state))]
pub async fn list_locations(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> ApiResult<Json<Vec<LocationResponse>>> {
    let locations = Location::list_by_owner(&state.db, user_id).await?;
    Ok(Json(locations.into_iter().map(Into::into).collect()))
}

#[instrument(skip(state, payload))]
pub async fn create_location(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(payload): Json<CreateLocationRequest>,
) -> ApiResult<(StatusCode, Json<LocationResponse>)> {
    let name = payload.name.trim();
    let address = payload.address.trim();
    if name.is_empty() || address.is_empty() {
        return Err(ApiError::Validation(
            "Both name and address are required.".into(),
        ));
    }

    let location = create_verified(state.maps.as_ref(), &state.db, user_id, name, address).await?;
    Ok((StatusCode::CREATED, Json(location.into())))
}
