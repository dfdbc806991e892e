use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use tracing::instrument;

use crate::auth::dto::CreateUserRequest;
use crate::error::ApiError;
use crate::state::AppState;
use crate::users::model::PublicUser;

pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/user", post(create_user))
        .route("/users", get(list_users))
}

#[instrument(skip(state, payload))]
pub async fn create_user(
    State(state): State<AppState>,
    Json(payload): Json<CreateUserRequest>,
) -> Result<(StatusCode, Json<PublicUser>), ApiError> {
    let user = state.auth.register(payload).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

/// Full user listing as public views. The predecessor of this endpoint
/// returned raw rows, hash column included; that leak is not carried over.
#[instrument(skip(state))]
pub async fn list_users(
    State(state): State<AppState>,
) -> Result<Json<Vec<PublicUser>>, ApiError> {
    let users = state.store.list_all().await?;
    Ok(Json(users.into_iter().map(PublicUser::from).collect()))
}
