//! Route definitions for the `/payments` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::payment;
use crate::state::AppState;

/// Routes mounted at `/payments`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(payment::create))
        .route("/{id}", get(payment::get_by_id))
        .route("/booking/{booking_id}", get(payment::list_by_booking))
}
