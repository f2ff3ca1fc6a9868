//! Repository for the `seats` table.

use kinoplex_core::types::DbId;
use sqlx::{PgPool, Postgres, Transaction};

use crate::models::seat::{CreateSeat, Seat};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str =
    "id, auditorium_id, row_label, seat_number, is_active, created_at, updated_at";

/// Provides CRUD operations for seats.
pub struct SeatRepo;

impl SeatRepo {
    /// Insert a new seat, returning the created row.
    ///
    /// The row label is expected pre-normalized (trimmed, upper-cased).
    /// Duplicate `(auditorium, row, number)` triples are rejected by
    /// `uq_seats_auditorium_row_number`.
    pub async fn create(
        pool: &PgPool,
        auditorium_id: DbId,
        input: &CreateSeat,
    ) -> Result<Seat, sqlx::Error> {
        let query = format!(
            "INSERT INTO seats (auditorium_id, row_label, seat_number) \
             VALUES ($1, $2, $3) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Seat>(&query)
            .bind(auditorium_id)
            .bind(&input.row_label)
            .bind(input.seat_number)
            .fetch_one(pool)
            .await
    }

    /// Find a seat by its internal ID, active or not.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Seat>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM seats WHERE id = $1");
        sqlx::query_as::<_, Seat>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a seat inside a caller-owned transaction.
    pub async fn find_by_id_tx(
        tx: &mut Transaction<'_, Postgres>,
        id: DbId,
    ) -> Result<Option<Seat>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM seats WHERE id = $1");
        sqlx::query_as::<_, Seat>(&query)
            .bind(id)
            .fetch_optional(&mut **tx)
            .await
    }

    /// Find a seat by its `(auditorium, row, number)` identity.
    pub async fn find_by_position(
        pool: &PgPool,
        auditorium_id: DbId,
        row_label: &str,
        seat_number: i32,
    ) -> Result<Option<Seat>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM seats \
             WHERE auditorium_id = $1 AND row_label = $2 AND seat_number = $3"
        );
        sqlx::query_as::<_, Seat>(&query)
            .bind(auditorium_id)
            .bind(row_label)
            .bind(seat_number)
            .fetch_optional(pool)
            .await
    }

    /// List an auditorium's active seats in row/number order.
    pub async fn list_by_auditorium(
        pool: &PgPool,
        auditorium_id: DbId,
    ) -> Result<Vec<Seat>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM seats \
             WHERE auditorium_id = $1 AND is_active = TRUE \
             ORDER BY row_label ASC, seat_number ASC"
        );
        sqlx::query_as::<_, Seat>(&query)
            .bind(auditorium_id)
            .fetch_all(pool)
            .await
    }

    /// Soft-delete a seat. Returns `true` if an active row was deactivated.
    /// The caller must check the active-bookings guard first.
    pub async fn deactivate(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result =
            sqlx::query("UPDATE seats SET is_active = FALSE WHERE id = $1 AND is_active = TRUE")
                .bind(id)
                .execute(pool)
                .await?;
        Ok(result.rows_affected() > 0)
    }
}
