//! Auditorium entity model and DTOs.

use kinoplex_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// An auditorium row from the `auditoriums` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Auditorium {
    pub id: DbId,
    pub name: String,
    pub capacity: i32,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new auditorium.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateAuditorium {
    pub name: String,
    pub capacity: i32,
}

/// DTO for updating an auditorium.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateAuditorium {
    pub name: Option<String>,
    pub capacity: Option<i32>,
}
