//! Handlers for the `/payments` resource.
//!
//! Payment creation interlocks with the booking state machine: the booking
//! is locked, gated through `can_be_paid`, and confirmed in the same
//! transaction that inserts the payment. Checking out an expired booking
//! has the side effect of formally expiring it -- that transition is
//! committed before the failure is reported.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use kinoplex_core::error::CoreError;
use kinoplex_core::payment;
use kinoplex_core::status::BookingStatus;
use kinoplex_core::types::DbId;
use kinoplex_db::models::payment::{CreatePayment, Payment};
use kinoplex_db::repositories::{BookingRepo, PaymentRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// POST /api/v1/payments
pub async fn create(
    State(state): State<AppState>,
    user: AuthUser,
    Json(input): Json<CreatePayment>,
) -> AppResult<(StatusCode, Json<Payment>)> {
    let now = Utc::now();
    let mut tx = state.pool.begin().await?;

    // Lock the booking so the can-be-paid check and the confirm below
    // cannot interleave with a concurrent payment attempt.
    let row = BookingRepo::find_by_id_for_update(&mut tx, input.booking_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Booking",
            id: input.booking_id,
        }))?;
    let seat_ids = BookingRepo::seat_ids_tx(&mut tx, row.id).await?;
    let mut booking = row.to_aggregate(seat_ids)?;

    if !booking.belongs_to_user(user.user_id) {
        return Err(AppError::Core(CoreError::Forbidden(
            "Unauthorized access to booking".into(),
        )));
    }

    // One payment per booking, ever. A booking that was already paid (and
    // thereby confirmed) reports this, not a status error. The
    // uq_payments_booking constraint is the backstop if two creations race
    // past this check.
    if PaymentRepo::find_by_booking_tx(&mut tx, row.id).await?.is_some() {
        return Err(AppError::Core(CoreError::Conflict(
            "Payment already exists for this booking".into(),
        )));
    }

    if !booking.can_be_paid(now) {
        // A pending booking past its deadline is formally expired here, and
        // that transition is persisted even though the payment fails.
        if booking.status() == BookingStatus::Pending && booking.mark_as_expired(now)? {
            BookingRepo::update_status_tx(&mut tx, row.id, booking.status()).await?;
            tx.commit().await?;
            tracing::info!(booking_id = row.id, "Booking expired at checkout");
        }
        return Err(AppError::Core(CoreError::Conflict(format!(
            "Booking cannot be paid. Status: {}",
            booking.status()
        ))));
    }

    // A payment settles the booking's full total. Capture is immediate;
    // there is no external gateway in this system.
    let mut aggregate = payment::Payment::create(
        row.id,
        booking.total_amount(),
        input.method,
        input.transaction_id.clone(),
        input.notes.clone(),
        now,
    )?;
    aggregate.mark_as_paid(input.transaction_id.as_deref())?;

    let payment_row = PaymentRepo::insert_tx(&mut tx, &aggregate).await?;

    // Confirm the booking in the same commit as the payment insert.
    booking.confirm(now)?;
    BookingRepo::update_status_tx(&mut tx, row.id, booking.status()).await?;

    tx.commit().await?;

    tracing::info!(
        payment_id = payment_row.id,
        booking_id = row.id,
        user_id = user.user_id,
        "Payment completed and booking confirmed"
    );

    Ok((StatusCode::CREATED, Json(payment_row)))
}

/// GET /api/v1/payments/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<Payment>> {
    let payment = PaymentRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Payment",
            id,
        }))?;

    ensure_booking_access(&state, &user, payment.booking_id).await?;
    Ok(Json(payment))
}

/// GET /api/v1/payments/booking/{booking_id}
pub async fn list_by_booking(
    State(state): State<AppState>,
    user: AuthUser,
    Path(booking_id): Path<DbId>,
) -> AppResult<Json<Vec<Payment>>> {
    ensure_booking_access(&state, &user, booking_id).await?;

    let payments = PaymentRepo::list_by_booking(&state.pool, booking_id).await?;
    Ok(Json(payments))
}

/// Load the referenced booking and reject non-owning, non-admin subjects.
async fn ensure_booking_access(
    state: &AppState,
    user: &AuthUser,
    booking_id: DbId,
) -> Result<(), AppError> {
    let booking = BookingRepo::find_by_id(&state.pool, booking_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Booking",
            id: booking_id,
        }))?;
    if !user.is_admin() && booking.user_id != user.user_id {
        return Err(AppError::Core(CoreError::Forbidden(
            "Unauthorized access to booking".into(),
        )));
    }
    Ok(())
}
