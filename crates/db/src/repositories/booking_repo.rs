//! Repository for the `bookings` and `booking_seats` tables.
//!
//! Reads come in pool and transaction flavors: the booking-creation and
//! payment orchestrators run their scan-then-write sequences inside one
//! caller-owned transaction, so every query they issue has a `_tx` variant.

use kinoplex_core::booking;
use kinoplex_core::status::BookingStatus;
use kinoplex_core::types::DbId;
use sqlx::{PgPool, Postgres, Transaction};

use crate::models::booking::{Booking, SeatAssignment};
use crate::models::seat::Seat;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, screening_id, user_id, status_id, total_amount, booking_date, \
    expires_at, created_at, updated_at";

/// Seat columns qualified for JOIN queries.
const SEAT_COLUMNS: &str =
    "s.id, s.auditorium_id, s.row_label, s.seat_number, s.is_active, s.created_at, s.updated_at";

/// Provides persistence for bookings and their seat assignments.
pub struct BookingRepo;

impl BookingRepo {
    /// Insert a new booking from the domain aggregate, returning the row.
    pub async fn insert_tx(
        tx: &mut Transaction<'_, Postgres>,
        aggregate: &booking::Booking,
    ) -> Result<Booking, sqlx::Error> {
        let query = format!(
            "INSERT INTO bookings \
                (screening_id, user_id, status_id, total_amount, booking_date, expires_at) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Booking>(&query)
            .bind(aggregate.screening_id())
            .bind(aggregate.user_id())
            .bind(aggregate.status().id())
            .bind(aggregate.total_amount())
            .bind(aggregate.booking_date())
            .bind(aggregate.expires_at())
            .fetch_one(&mut **tx)
            .await
    }

    /// Insert the booking's seat assignments in the given order.
    ///
    /// `uq_booking_seats_booking_seat` rejects duplicates within a booking.
    pub async fn insert_seats_tx(
        tx: &mut Transaction<'_, Postgres>,
        booking_id: DbId,
        seat_ids: &[DbId],
    ) -> Result<(), sqlx::Error> {
        for seat_id in seat_ids {
            sqlx::query("INSERT INTO booking_seats (booking_id, seat_id) VALUES ($1, $2)")
                .bind(booking_id)
                .bind(seat_id)
                .execute(&mut **tx)
                .await?;
        }
        Ok(())
    }

    /// Find a booking by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Booking>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM bookings WHERE id = $1");
        sqlx::query_as::<_, Booking>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a booking inside a caller-owned transaction, taking a row lock.
    ///
    /// Used by the payment orchestrator so the can-be-paid check and the
    /// status transition cannot interleave with a concurrent payment.
    pub async fn find_by_id_for_update(
        tx: &mut Transaction<'_, Postgres>,
        id: DbId,
    ) -> Result<Option<Booking>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM bookings WHERE id = $1 FOR UPDATE");
        sqlx::query_as::<_, Booking>(&query)
            .bind(id)
            .fetch_optional(&mut **tx)
            .await
    }

    /// List a user's bookings, most recent first.
    pub async fn list_by_user(pool: &PgPool, user_id: DbId) -> Result<Vec<Booking>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM bookings WHERE user_id = $1 ORDER BY booking_date DESC");
        sqlx::query_as::<_, Booking>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    /// Seat ids reserved by a booking, in insertion order.
    pub async fn seat_ids(pool: &PgPool, booking_id: DbId) -> Result<Vec<DbId>, sqlx::Error> {
        let rows: Vec<(DbId,)> =
            sqlx::query_as("SELECT seat_id FROM booking_seats WHERE booking_id = $1 ORDER BY id")
                .bind(booking_id)
                .fetch_all(pool)
                .await?;
        Ok(rows.into_iter().map(|(id,)| id).collect())
    }

    /// Transaction variant of [`BookingRepo::seat_ids`].
    pub async fn seat_ids_tx(
        tx: &mut Transaction<'_, Postgres>,
        booking_id: DbId,
    ) -> Result<Vec<DbId>, sqlx::Error> {
        let rows: Vec<(DbId,)> =
            sqlx::query_as("SELECT seat_id FROM booking_seats WHERE booking_id = $1 ORDER BY id")
                .bind(booking_id)
                .fetch_all(&mut **tx)
                .await?;
        Ok(rows.into_iter().map(|(id,)| id).collect())
    }

    /// Full seat rows reserved by a booking, for detail responses.
    pub async fn seats_of_booking(
        pool: &PgPool,
        booking_id: DbId,
    ) -> Result<Vec<Seat>, sqlx::Error> {
        let query = format!(
            "SELECT {SEAT_COLUMNS} FROM booking_seats bs \
             JOIN seats s ON s.id = bs.seat_id \
             WHERE bs.booking_id = $1 \
             ORDER BY bs.id"
        );
        sqlx::query_as::<_, Seat>(&query)
            .bind(booking_id)
            .fetch_all(pool)
            .await
    }

    /// All `(booking status, seat id)` pairs for a screening.
    ///
    /// Unfiltered on status: the domain layer decides which bookings hold
    /// their seats, so cancellation and expiry release seats with no
    /// storage-side bookkeeping.
    pub async fn seat_assignments(
        pool: &PgPool,
        screening_id: DbId,
    ) -> Result<Vec<SeatAssignment>, sqlx::Error> {
        sqlx::query_as::<_, SeatAssignment>(
            "SELECT b.status_id, bs.seat_id FROM booking_seats bs \
             JOIN bookings b ON b.id = bs.booking_id \
             WHERE b.screening_id = $1",
        )
        .bind(screening_id)
        .fetch_all(pool)
        .await
    }

    /// Transaction variant of [`BookingRepo::seat_assignments`], used by the
    /// conflict scan of the booking-creation orchestrator.
    pub async fn seat_assignments_tx(
        tx: &mut Transaction<'_, Postgres>,
        screening_id: DbId,
    ) -> Result<Vec<SeatAssignment>, sqlx::Error> {
        sqlx::query_as::<_, SeatAssignment>(
            "SELECT b.status_id, bs.seat_id FROM booking_seats bs \
             JOIN bookings b ON b.id = bs.booking_id \
             WHERE b.screening_id = $1",
        )
        .bind(screening_id)
        .fetch_all(&mut **tx)
        .await
    }

    /// Compare-and-swap status update, returning the updated row.
    ///
    /// Returns `None` when the booking no longer has `from` status, i.e. a
    /// concurrent transition won.
    pub async fn update_status_if(
        pool: &PgPool,
        id: DbId,
        from: BookingStatus,
        to: BookingStatus,
    ) -> Result<Option<Booking>, sqlx::Error> {
        let query = format!(
            "UPDATE bookings SET status_id = $3 \
             WHERE id = $1 AND status_id = $2 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Booking>(&query)
            .bind(id)
            .bind(from.id())
            .bind(to.id())
            .fetch_optional(pool)
            .await
    }

    /// Unconditional status update inside a caller-owned transaction.
    ///
    /// The caller has already run the domain guards against a `FOR UPDATE`
    /// snapshot of the row.
    pub async fn update_status_tx(
        tx: &mut Transaction<'_, Postgres>,
        id: DbId,
        to: BookingStatus,
    ) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE bookings SET status_id = $2 WHERE id = $1")
            .bind(id)
            .bind(to.id())
            .execute(&mut **tx)
            .await?;
        Ok(())
    }

    /// Whether a screening has any Pending or Confirmed booking
    /// (screening delete guard).
    pub async fn has_active_for_screening(
        pool: &PgPool,
        screening_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let row: (bool,) = sqlx::query_as(
            "SELECT EXISTS ( \
                SELECT 1 FROM bookings \
                WHERE screening_id = $1 AND status_id IN ($2, $3))",
        )
        .bind(screening_id)
        .bind(BookingStatus::Pending.id())
        .bind(BookingStatus::Confirmed.id())
        .fetch_one(pool)
        .await?;
        Ok(row.0)
    }

    /// Whether a seat is part of any Pending or Confirmed booking
    /// (seat delete guard).
    pub async fn has_active_for_seat(pool: &PgPool, seat_id: DbId) -> Result<bool, sqlx::Error> {
        let row: (bool,) = sqlx::query_as(
            "SELECT EXISTS ( \
                SELECT 1 FROM booking_seats bs \
                JOIN bookings b ON b.id = bs.booking_id \
                WHERE bs.seat_id = $1 AND b.status_id IN ($2, $3))",
        )
        .bind(seat_id)
        .bind(BookingStatus::Pending.id())
        .bind(BookingStatus::Confirmed.id())
        .fetch_one(pool)
        .await?;
        Ok(row.0)
    }
}
