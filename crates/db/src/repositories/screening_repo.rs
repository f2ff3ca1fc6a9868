//! Repository for the `screenings` table.

use kinoplex_core::types::DbId;
use sqlx::{PgPool, Postgres, Transaction};

use crate::models::screening::{CreateScreening, Screening, UpdateScreening};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, movie_id, auditorium_id, start_time, end_time, price, \
    is_active, created_at, updated_at";

/// Provides CRUD operations for screenings.
pub struct ScreeningRepo;

impl ScreeningRepo {
    /// Insert a new screening, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateScreening) -> Result<Screening, sqlx::Error> {
        let query = format!(
            "INSERT INTO screenings (movie_id, auditorium_id, start_time, end_time, price) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Screening>(&query)
            .bind(input.movie_id)
            .bind(input.auditorium_id)
            .bind(input.start_time)
            .bind(input.end_time)
            .bind(input.price)
            .fetch_one(pool)
            .await
    }

    /// Find a screening by its internal ID, active or not.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Screening>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM screenings WHERE id = $1");
        sqlx::query_as::<_, Screening>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a screening inside a caller-owned transaction, taking a row lock.
    ///
    /// The `FOR UPDATE` lock serializes concurrent booking creations for the
    /// same screening: two transactions cannot both pass the seat-conflict
    /// scan and commit overlapping seat sets.
    pub async fn find_by_id_for_update(
        tx: &mut Transaction<'_, Postgres>,
        id: DbId,
    ) -> Result<Option<Screening>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM screenings WHERE id = $1 FOR UPDATE");
        sqlx::query_as::<_, Screening>(&query)
            .bind(id)
            .fetch_optional(&mut **tx)
            .await
    }

    /// List all active screenings ordered by start time.
    pub async fn list(pool: &PgPool) -> Result<Vec<Screening>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM screenings WHERE is_active = TRUE ORDER BY start_time ASC"
        );
        sqlx::query_as::<_, Screening>(&query).fetch_all(pool).await
    }

    /// Update a screening's window or price. Only non-`None` fields apply.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateScreening,
    ) -> Result<Option<Screening>, sqlx::Error> {
        let query = format!(
            "UPDATE screenings SET
                start_time = COALESCE($2, start_time),
                end_time = COALESCE($3, end_time),
                price = COALESCE($4, price)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Screening>(&query)
            .bind(id)
            .bind(input.start_time)
            .bind(input.end_time)
            .bind(input.price)
            .fetch_optional(pool)
            .await
    }

    /// Soft-delete a screening. Returns `true` if an active row was
    /// deactivated. The caller must check the active-bookings guard first.
    pub async fn deactivate(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE screenings SET is_active = FALSE WHERE id = $1 AND is_active = TRUE",
        )
        .bind(id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Count active screenings in an auditorium (auditorium delete guard).
    pub async fn count_active_by_auditorium(
        pool: &PgPool,
        auditorium_id: DbId,
    ) -> Result<i64, sqlx::Error> {
        let row: (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM screenings WHERE auditorium_id = $1 AND is_active = TRUE",
        )
        .bind(auditorium_id)
        .fetch_one(pool)
        .await?;
        Ok(row.0)
    }

    /// Count active screenings of a movie (movie delete guard).
    pub async fn count_active_by_movie(pool: &PgPool, movie_id: DbId) -> Result<i64, sqlx::Error> {
        let row: (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM screenings WHERE movie_id = $1 AND is_active = TRUE",
        )
        .bind(movie_id)
        .fetch_one(pool)
        .await?;
        Ok(row.0)
    }
}
