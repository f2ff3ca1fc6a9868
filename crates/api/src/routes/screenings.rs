//! Route definitions for the `/screenings` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::screening;
use crate::state::AppState;

/// Routes mounted at `/screenings`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(screening::list).post(screening::create))
        .route(
            "/{id}",
            get(screening::get_by_id)
                .put(screening::update)
                .delete(screening::delete),
        )
        .route("/{id}/seats", get(screening::seats))
}
