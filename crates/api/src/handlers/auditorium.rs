//! Handlers for the `/auditoriums` resource and its nested seats.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use kinoplex_core::error::CoreError;
use kinoplex_core::types::DbId;
use kinoplex_core::{auditorium as rules, seat as seat_rules};
use kinoplex_db::models::auditorium::{Auditorium, CreateAuditorium, UpdateAuditorium};
use kinoplex_db::models::seat::{CreateSeat, Seat};
use kinoplex_db::repositories::{AuditoriumRepo, ScreeningRepo, SeatRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireAdmin;
use crate::state::AppState;

/// POST /api/v1/auditoriums
pub async fn create(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Json(mut input): Json<CreateAuditorium>,
) -> AppResult<(StatusCode, Json<Auditorium>)> {
    input.name = rules::validate_name(&input.name)?;
    rules::validate_capacity(input.capacity)?;

    let auditorium = AuditoriumRepo::create(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(auditorium)))
}

/// GET /api/v1/auditoriums
pub async fn list(
    State(state): State<AppState>,
    _user: AuthUser,
) -> AppResult<Json<Vec<Auditorium>>> {
    let auditoriums = AuditoriumRepo::list(&state.pool).await?;
    Ok(Json(auditoriums))
}

/// GET /api/v1/auditoriums/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<Auditorium>> {
    let auditorium = AuditoriumRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Auditorium",
            id,
        }))?;
    Ok(Json(auditorium))
}

/// PUT /api/v1/auditoriums/{id}
pub async fn update(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
    Json(mut input): Json<UpdateAuditorium>,
) -> AppResult<Json<Auditorium>> {
    if let Some(name) = &input.name {
        input.name = Some(rules::validate_name(name)?);
    }
    if let Some(capacity) = input.capacity {
        rules::validate_capacity(capacity)?;
    }

    let auditorium = AuditoriumRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Auditorium",
            id,
        }))?;
    Ok(Json(auditorium))
}

/// DELETE /api/v1/auditoriums/{id}
///
/// Soft delete. Refused while any screening in the auditorium is active.
pub async fn delete(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let active_screenings = ScreeningRepo::count_active_by_auditorium(&state.pool, id).await?;
    if active_screenings > 0 {
        return Err(AppError::Core(CoreError::Conflict(
            "Cannot delete auditorium with active screenings".into(),
        )));
    }

    let deactivated = AuditoriumRepo::deactivate(&state.pool, id).await?;
    if deactivated {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound {
            entity: "Auditorium",
            id,
        }))
    }
}

/// GET /api/v1/auditoriums/{auditorium_id}/seats
pub async fn list_seats(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(auditorium_id): Path<DbId>,
) -> AppResult<Json<Vec<Seat>>> {
    AuditoriumRepo::find_by_id(&state.pool, auditorium_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Auditorium",
            id: auditorium_id,
        }))?;

    let seats = SeatRepo::list_by_auditorium(&state.pool, auditorium_id).await?;
    Ok(Json(seats))
}

/// POST /api/v1/auditoriums/{auditorium_id}/seats
///
/// The row label is normalized (trimmed, upper-cased) before the uniqueness
/// check, so "a1" and "A1" are the same seat.
pub async fn create_seat(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(auditorium_id): Path<DbId>,
    Json(mut input): Json<CreateSeat>,
) -> AppResult<(StatusCode, Json<Seat>)> {
    AuditoriumRepo::find_by_id(&state.pool, auditorium_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Auditorium",
            id: auditorium_id,
        }))?;

    input.row_label = seat_rules::validate_row(&input.row_label)?;
    seat_rules::validate_number(input.seat_number)?;

    let existing = SeatRepo::find_by_position(
        &state.pool,
        auditorium_id,
        &input.row_label,
        input.seat_number,
    )
    .await?;
    if existing.is_some() {
        return Err(AppError::Core(CoreError::Conflict(
            "Seat already exists in this auditorium".into(),
        )));
    }

    let seat = SeatRepo::create(&state.pool, auditorium_id, &input).await?;
    Ok((StatusCode::CREATED, Json(seat)))
}
