//! Repository for the `auditoriums` table.

use kinoplex_core::types::DbId;
use sqlx::PgPool;

use crate::models::auditorium::{Auditorium, CreateAuditorium, UpdateAuditorium};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, capacity, is_active, created_at, updated_at";

/// Provides CRUD operations for auditoriums.
pub struct AuditoriumRepo;

impl AuditoriumRepo {
    /// Insert a new auditorium, returning the created row.
    pub async fn create(
        pool: &PgPool,
        input: &CreateAuditorium,
    ) -> Result<Auditorium, sqlx::Error> {
        let query = format!(
            "INSERT INTO auditoriums (name, capacity) VALUES ($1, $2) RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Auditorium>(&query)
            .bind(&input.name)
            .bind(input.capacity)
            .fetch_one(pool)
            .await
    }

    /// Find an auditorium by its internal ID, active or not.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Auditorium>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM auditoriums WHERE id = $1");
        sqlx::query_as::<_, Auditorium>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all active auditoriums ordered by name.
    pub async fn list(pool: &PgPool) -> Result<Vec<Auditorium>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM auditoriums WHERE is_active = TRUE ORDER BY name ASC");
        sqlx::query_as::<_, Auditorium>(&query).fetch_all(pool).await
    }

    /// Update an auditorium. Only non-`None` fields in `input` are applied.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateAuditorium,
    ) -> Result<Option<Auditorium>, sqlx::Error> {
        let query = format!(
            "UPDATE auditoriums SET
                name = COALESCE($2, name),
                capacity = COALESCE($3, capacity)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Auditorium>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(input.capacity)
            .fetch_optional(pool)
            .await
    }

    /// Soft-delete an auditorium. Returns `true` if an active row was
    /// deactivated. The caller must check the active-screenings guard first.
    pub async fn deactivate(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE auditoriums SET is_active = FALSE WHERE id = $1 AND is_active = TRUE",
        )
        .bind(id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}
