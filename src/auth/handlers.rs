use axum::{
    extract::State,
    http::HeaderMap,
    routing::{get, post},
    Json, Router,
};
use tracing::instrument;

use crate::auth::dto::{LoginRequest, LoginResponse, MessageResponse};
use crate::error::ApiError;
use crate::state::AppState;

pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/login", post(login))
        .route("/auth/logout", post(logout))
        .route("/auth/me", get(me))
        .route("/auth/status", get(status))
}

#[instrument(skip(state, payload))]
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    let response = state.auth.login(payload).await?;
    Ok(Json(response))
}

#[instrument(skip(state))]
pub async fn logout(State(state): State<AppState>) -> Json<MessageResponse> {
    Json(state.auth.logout())
}

#[instrument(skip(state, headers))]
pub async fn me(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<MessageResponse>, ApiError> {
    let authorization = headers
        .get(axum::http::header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok());
    let response = state.auth.current_user(authorization)?;
    Ok(Json(response))
}

#[instrument(skip(state))]
pub async fn status(State(state): State<AppState>) -> Json<MessageResponse> {
    Json(state.auth.status())
}
