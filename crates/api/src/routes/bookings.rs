//! Route definitions for the `/bookings` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::booking;
use crate::state::AppState;

/// Routes mounted at `/bookings`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(booking::list_mine).post(booking::create))
        .route("/{id}", get(booking::get_by_id))
        .route("/{id}/confirm", post(booking::confirm))
        .route("/{id}/cancel", post(booking::cancel))
}
