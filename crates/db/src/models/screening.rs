//! Screening entity model and DTOs.

use kinoplex_core::types::{DbId, Timestamp};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::models::seat::Seat;

/// A screening row from the `screenings` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Screening {
    pub id: DbId,
    pub movie_id: DbId,
    pub auditorium_id: DbId,
    pub start_time: Timestamp,
    pub end_time: Timestamp,
    pub price: Decimal,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new screening.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateScreening {
    pub movie_id: DbId,
    pub auditorium_id: DbId,
    pub start_time: Timestamp,
    pub end_time: Timestamp,
    pub price: Decimal,
}

/// DTO for updating a screening's window or price.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateScreening {
    pub start_time: Option<Timestamp>,
    pub end_time: Option<Timestamp>,
    pub price: Option<Decimal>,
}

/// A seat of the screening's auditorium tagged with its derived availability.
///
/// Returned by `GET /screenings/{id}/seats`; availability is computed from
/// the screening's active bookings at request time.
#[derive(Debug, Clone, Serialize)]
pub struct SeatAvailability {
    #[serde(flatten)]
    pub seat: Seat,
    pub is_available: bool,
}
