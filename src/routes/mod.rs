use crate::models::AppState;
use axum::Router;

pub mod invite_routes;
pub mod profile_routes;
pub mod sms_routes;

pub fn router(state: AppState) -> Router {
    Router::new()
        .nest("/api/v1", invite_routes::router())
        .nest("/api", sms_routes::router())
        .merge(profile_routes::router())
        .with_state(state)
}
