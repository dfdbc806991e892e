use crate::state::AppState;
use axum::Router;

pub mod handlers;
pub mod model;
pub mod store;

pub fn router() -> Router<AppState> {
    handlers::user_routes()
}
