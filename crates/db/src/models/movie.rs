//! Movie entity model and DTOs.

use chrono::NaiveDate;
use kinoplex_core::types::{DbId, Timestamp};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A movie row from the `movies` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Movie {
    pub id: DbId,
    pub title: String,
    pub description: String,
    pub duration_minutes: i32,
    pub genre: String,
    pub director: String,
    pub release_date: NaiveDate,
    pub poster_url: Option<String>,
    pub ticket_price: Decimal,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new movie.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateMovie {
    pub title: String,
    pub description: String,
    pub duration_minutes: i32,
    pub genre: String,
    pub director: String,
    pub release_date: NaiveDate,
    pub poster_url: Option<String>,
    pub ticket_price: Decimal,
}

/// DTO for updating a movie. All fields are optional, but a supplied field
/// must pass the same validation as on create.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateMovie {
    pub title: Option<String>,
    pub description: Option<String>,
    pub duration_minutes: Option<i32>,
    pub genre: Option<String>,
    pub director: Option<String>,
    pub release_date: Option<NaiveDate>,
    pub poster_url: Option<String>,
    pub ticket_price: Option<Decimal>,
}
