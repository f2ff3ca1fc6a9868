//! Handlers for the `/seats` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use kinoplex_core::error::CoreError;
use kinoplex_core::types::DbId;
use kinoplex_db::models::seat::Seat;
use kinoplex_db::repositories::{BookingRepo, SeatRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireAdmin;
use crate::state::AppState;

/// GET /api/v1/seats/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<Seat>> {
    let seat = SeatRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Seat", id }))?;
    Ok(Json(seat))
}

/// DELETE /api/v1/seats/{id}
///
/// Soft delete. Refused while the seat is held by a Pending or Confirmed
/// booking; historical (cancelled/expired) bookings do not block it.
pub async fn delete(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if BookingRepo::has_active_for_seat(&state.pool, id).await? {
        return Err(AppError::Core(CoreError::Conflict(
            "Cannot delete seat that is part of active bookings".into(),
        )));
    }

    let deactivated = SeatRepo::deactivate(&state.pool, id).await?;
    if deactivated {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound { entity: "Seat", id }))
    }
}
