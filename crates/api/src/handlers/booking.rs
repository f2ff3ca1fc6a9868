//! Handlers for the `/bookings` resource.
//!
//! `create` is the cross-entity orchestrator: screening/seat legality, the
//! seat-conflict scan, price computation, and the insert all run inside one
//! transaction. The `FOR UPDATE` lock on the screening row serializes
//! concurrent creations for the same screening, so two requests cannot both
//! observe "no conflict" and commit overlapping seats. Any early return
//! drops the transaction, which rolls it back.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use kinoplex_core::booking::{self, DEFAULT_EXPIRATION_MINS};
use kinoplex_core::error::CoreError;
use kinoplex_core::screening as availability;
use kinoplex_core::status::BookingStatus;
use kinoplex_core::types::DbId;
use kinoplex_db::models::booking::{Booking, BookingDetail, CreateBooking};
use kinoplex_db::repositories::{BookingRepo, ScreeningRepo, SeatRepo};
use rust_decimal::Decimal;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// Reject access to a booking the subject does not own. Admins may access
/// any booking; a foreign booking is 403, distinct from 404.
fn ensure_owner(user: &AuthUser, booking: &Booking) -> Result<(), AppError> {
    if user.is_admin() || booking.user_id == user.user_id {
        Ok(())
    } else {
        Err(AppError::Core(CoreError::Forbidden(
            "Unauthorized access to booking".into(),
        )))
    }
}

/// POST /api/v1/bookings
pub async fn create(
    State(state): State<AppState>,
    user: AuthUser,
    Json(input): Json<CreateBooking>,
) -> AppResult<(StatusCode, Json<BookingDetail>)> {
    // Field-level validation before any storage work.
    if input.seat_ids.is_empty() {
        return Err(AppError::BadRequest(
            "At least one seat must be selected".into(),
        ));
    }
    let mut unique = input.seat_ids.clone();
    unique.sort_unstable();
    unique.dedup();
    if unique.len() != input.seat_ids.len() {
        return Err(AppError::BadRequest("Duplicate seats are not allowed".into()));
    }

    let mut tx = state.pool.begin().await?;

    // Lock the screening row for the duration of the scan-then-insert.
    let screening = ScreeningRepo::find_by_id_for_update(&mut tx, input.screening_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Screening",
            id: input.screening_id,
        }))?;
    if !screening.is_active {
        return Err(AppError::Core(CoreError::Validation(
            "Screening is not active".into(),
        )));
    }

    // Every requested seat must exist, be active, and belong to the
    // screening's auditorium. All-or-nothing: the first failure aborts.
    let mut seats = Vec::with_capacity(input.seat_ids.len());
    for seat_id in &input.seat_ids {
        let seat = SeatRepo::find_by_id_tx(&mut tx, *seat_id).await?.ok_or(
            AppError::Core(CoreError::NotFound {
                entity: "Seat",
                id: *seat_id,
            }),
        )?;
        if !seat.is_active {
            return Err(AppError::Core(CoreError::Validation(format!(
                "Seat {} is not active",
                seat.display_string()
            ))));
        }
        if seat.auditorium_id != screening.auditorium_id {
            return Err(AppError::Core(CoreError::Validation(format!(
                "Seat {} does not belong to the screening's auditorium",
                seat.display_string()
            ))));
        }
        seats.push(seat);
    }

    // Conflict scan, inside the same transaction as the insert below.
    let assignments = BookingRepo::seat_assignments_tx(&mut tx, screening.id).await?;
    let decoded = assignments
        .iter()
        .map(|a| Ok((BookingStatus::from_id(a.status_id)?, a.seat_id)))
        .collect::<Result<Vec<_>, CoreError>>()?;
    let booked = availability::booked_seat_ids(decoded);

    let conflicting: Vec<String> = seats
        .iter()
        .filter(|seat| !availability::is_seat_available(screening.is_active, &booked, seat.id))
        .map(|seat| seat.display_string())
        .collect();
    if !conflicting.is_empty() {
        return Err(AppError::Core(CoreError::Conflict(format!(
            "The following seats are already booked: {}",
            conflicting.join(", ")
        ))));
    }

    // Flat price: screening price x seat count.
    let total_amount = screening.price * Decimal::from(seats.len() as i64);

    let mut aggregate = booking::Booking::create(
        screening.id,
        user.user_id,
        total_amount,
        DEFAULT_EXPIRATION_MINS,
        Utc::now(),
    )?;
    for seat in &seats {
        aggregate.add_seat(seat.id)?;
    }

    let row = BookingRepo::insert_tx(&mut tx, &aggregate).await?;
    BookingRepo::insert_seats_tx(&mut tx, row.id, aggregate.seat_ids()).await?;

    tx.commit().await?;

    tracing::info!(
        booking_id = row.id,
        user_id = user.user_id,
        screening_id = screening.id,
        seats = seats.len(),
        "Booking created"
    );

    Ok((
        StatusCode::CREATED,
        Json(BookingDetail {
            booking: row,
            seats,
        }),
    ))
}

/// GET /api/v1/bookings
pub async fn list_mine(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<Vec<Booking>>> {
    let bookings = BookingRepo::list_by_user(&state.pool, user.user_id).await?;
    Ok(Json(bookings))
}

/// GET /api/v1/bookings/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<BookingDetail>> {
    let booking = BookingRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Booking",
            id,
        }))?;
    ensure_owner(&user, &booking)?;

    let seats = BookingRepo::seats_of_booking(&state.pool, id).await?;
    Ok(Json(BookingDetail { booking, seats }))
}

/// POST /api/v1/bookings/{id}/confirm
///
/// Deliberately not idempotent: confirming twice fails the second time.
pub async fn confirm(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<Booking>> {
    let row = BookingRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Booking",
            id,
        }))?;
    ensure_owner(&user, &row)?;

    let seat_ids = BookingRepo::seat_ids(&state.pool, id).await?;
    let mut aggregate = row.to_aggregate(seat_ids)?;
    aggregate.confirm(Utc::now())?;

    // Compare-and-swap so a concurrent transition cannot be overwritten.
    let updated =
        BookingRepo::update_status_if(&state.pool, id, BookingStatus::Pending, aggregate.status())
            .await?
            .ok_or(AppError::Core(CoreError::Conflict(
                "Booking was modified concurrently".into(),
            )))?;

    tracing::info!(booking_id = id, user_id = user.user_id, "Booking confirmed");
    Ok(Json(updated))
}

/// POST /api/v1/bookings/{id}/cancel
///
/// Cancelling releases the booking's seats immediately: availability is
/// derived from status, so no unreserve step exists.
pub async fn cancel(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<Booking>> {
    let row = BookingRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Booking",
            id,
        }))?;
    ensure_owner(&user, &row)?;

    let current = row.status()?;
    let seat_ids = BookingRepo::seat_ids(&state.pool, id).await?;
    let mut aggregate = row.to_aggregate(seat_ids)?;
    aggregate.cancel()?;

    let updated = BookingRepo::update_status_if(&state.pool, id, current, aggregate.status())
        .await?
        .ok_or(AppError::Core(CoreError::Conflict(
            "Booking was modified concurrently".into(),
        )))?;

    tracing::info!(booking_id = id, user_id = user.user_id, "Booking cancelled");
    Ok(Json(updated))
}
