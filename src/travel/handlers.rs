use std::collections::BTreeMap;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::json;
use tracing::instrument;

use crate::{
    auth::extractors::AuthUser,
    error::ApiResult,
    maps::{travel_matrix, Endpoint, TravelMode},
    state::AppState,
    travel::{
        dto::{CompareRequest, CompareResponse, TravelTimesQuery},
        services::compare_with_saved,
    },
};

pub fn travel_routes() -> Router<AppState> {
    Router::new()
        .route("/travel/compare", post(compare_travel))
        .route("/travel/times", get(travel_times))
}

#[instrument(skip(state, payload))]
pub async fn compare_travel(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(payload): Json<CompareRequest>,
) -> ApiResult<Json<CompareResponse>> {
    let response = compare_with_saved(&state, user_id, payload).await?;
    Ok(Json(response))
}

/// Duration-only lookup kept from an earlier revision of the API. Answers
/// `{mode: duration text}` or `{"error": ...}` with 400 on missing parameters.
#[instrument(skip_all)]
pub async fn travel_times(
    State(state): State<AppState>,
    AuthUser(_user_id): AuthUser,
    Query(params): Query<TravelTimesQuery>,
) -> Response {
    let origin = params.origin.as_deref().map(str::trim).unwrap_or_default();
    let destination = params
        .destination
        .as_deref()
        .map(str::trim)
        .unwrap_or_default();

    if origin.is_empty() || destination.is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({"error": "Both origin and destination are required."})),
        )
            .into_response();
    }

    let results = match travel_matrix(
        state.maps.as_ref(),
        &Endpoint::Address(origin.to_string()),
        &Endpoint::Address(destination.to_string()),
    )
    .await
    {
        Ok(results) => results,
        Err(e) => {
            return (StatusCode::BAD_REQUEST, Json(json!({"error": e.to_string()})))
                .into_response()
        }
    };

    let durations: BTreeMap<TravelMode, String> = results
        .into_iter()
        .map(|(mode, times)| (mode, times.duration))
        .collect();

    Json(durations).into_response()
}
