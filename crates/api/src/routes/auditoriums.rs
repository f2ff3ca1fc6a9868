//! Route definitions for the `/auditoriums` resource and its nested seats.

use axum::routing::get;
use axum::Router;

use crate::handlers::auditorium;
use crate::state::AppState;

/// Routes mounted at `/auditoriums`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(auditorium::list).post(auditorium::create))
        .route(
            "/{id}",
            get(auditorium::get_by_id)
                .put(auditorium::update)
                .delete(auditorium::delete),
        )
        .route(
            "/{auditorium_id}/seats",
            get(auditorium::list_seats).post(auditorium::create_seat),
        )
}
