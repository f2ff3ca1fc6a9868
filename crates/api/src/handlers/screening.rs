//! Handlers for the `/screenings` resource.
//!
//! The seat-map endpoint derives per-seat availability from the screening's
//! bookings on every request; nothing availability-related is stored.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use kinoplex_core::error::CoreError;
use kinoplex_core::screening as rules;
use kinoplex_core::status::BookingStatus;
use kinoplex_core::types::DbId;
use kinoplex_db::models::screening::{
    CreateScreening, Screening, SeatAvailability, UpdateScreening,
};
use kinoplex_db::repositories::{
    AuditoriumRepo, BookingRepo, MovieRepo, ScreeningRepo, SeatRepo,
};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireAdmin;
use crate::state::AppState;

/// POST /api/v1/screenings
pub async fn create(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Json(input): Json<CreateScreening>,
) -> AppResult<(StatusCode, Json<Screening>)> {
    let movie = MovieRepo::find_by_id(&state.pool, input.movie_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Movie",
            id: input.movie_id,
        }))?;
    if !movie.is_active {
        return Err(AppError::Core(CoreError::Validation(
            "Movie is not active".into(),
        )));
    }

    let auditorium = AuditoriumRepo::find_by_id(&state.pool, input.auditorium_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Auditorium",
            id: input.auditorium_id,
        }))?;
    if !auditorium.is_active {
        return Err(AppError::Core(CoreError::Validation(
            "Auditorium is not active".into(),
        )));
    }

    rules::validate_schedule(input.start_time, input.end_time, Utc::now())?;
    rules::validate_price(input.price)?;

    let screening = ScreeningRepo::create(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(screening)))
}

/// GET /api/v1/screenings
pub async fn list(
    State(state): State<AppState>,
    _user: AuthUser,
) -> AppResult<Json<Vec<Screening>>> {
    let screenings = ScreeningRepo::list(&state.pool).await?;
    Ok(Json(screenings))
}

/// GET /api/v1/screenings/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<Screening>> {
    let screening = ScreeningRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Screening",
            id,
        }))?;
    Ok(Json(screening))
}

/// GET /api/v1/screenings/{id}/seats
///
/// Every active seat of the screening's auditorium, tagged with derived
/// availability. Seats of cancelled or expired bookings show as available
/// again with no explicit release step.
pub async fn seats(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<Vec<SeatAvailability>>> {
    let screening = ScreeningRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Screening",
            id,
        }))?;

    let seats = SeatRepo::list_by_auditorium(&state.pool, screening.auditorium_id).await?;

    let assignments = BookingRepo::seat_assignments(&state.pool, id).await?;
    let decoded = assignments
        .iter()
        .map(|a| Ok((BookingStatus::from_id(a.status_id)?, a.seat_id)))
        .collect::<Result<Vec<_>, CoreError>>()?;
    let booked = rules::booked_seat_ids(decoded);

    let availability = seats
        .into_iter()
        .map(|seat| {
            let is_available = rules::is_seat_available(screening.is_active, &booked, seat.id);
            SeatAvailability { seat, is_available }
        })
        .collect();

    Ok(Json(availability))
}

/// PUT /api/v1/screenings/{id}
///
/// Updates the time window and/or price. The merged window must still be
/// well-formed; the not-in-the-past rule applies only at creation.
pub async fn update(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateScreening>,
) -> AppResult<Json<Screening>> {
    let existing = ScreeningRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Screening",
            id,
        }))?;

    let start = input.start_time.unwrap_or(existing.start_time);
    let end = input.end_time.unwrap_or(existing.end_time);
    if start >= end {
        return Err(AppError::Core(CoreError::Validation(
            "Start time must be before end time".into(),
        )));
    }
    if let Some(price) = input.price {
        rules::validate_price(price)?;
    }

    let screening = ScreeningRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Screening",
            id,
        }))?;
    Ok(Json(screening))
}

/// DELETE /api/v1/screenings/{id}
///
/// Soft delete. Refused while the screening has Pending or Confirmed
/// bookings.
pub async fn delete(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if BookingRepo::has_active_for_screening(&state.pool, id).await? {
        return Err(AppError::Core(CoreError::Conflict(
            "Cannot delete screening with active bookings".into(),
        )));
    }

    let deactivated = ScreeningRepo::deactivate(&state.pool, id).await?;
    if deactivated {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound {
            entity: "Screening",
            id,
        }))
    }
}
