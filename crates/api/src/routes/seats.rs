//! Route definitions for the `/seats` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::seat;
use crate::state::AppState;

/// Routes mounted at `/seats`. Creation lives under
/// `/auditoriums/{auditorium_id}/seats`.
pub fn router() -> Router<AppState> {
    Router::new().route("/{id}", get(seat::get_by_id).delete(seat::delete))
}
