//! Seat entity model and DTOs.

use kinoplex_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A seat row from the `seats` table. `row_label` is stored upper-cased.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Seat {
    pub id: DbId,
    pub auditorium_id: DbId,
    #[serde(rename = "row")]
    pub row_label: String,
    pub seat_number: i32,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Seat {
    /// Human-readable label, e.g. `A12`. Used in conflict messages.
    pub fn display_string(&self) -> String {
        kinoplex_core::seat::display_string(&self.row_label, self.seat_number)
    }
}

/// DTO for creating a new seat within an auditorium.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateSeat {
    #[serde(rename = "row")]
    pub row_label: String,
    pub seat_number: i32,
}
