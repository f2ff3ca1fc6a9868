//! Booking entity models and DTOs.
//!
//! `Booking` is the persisted row; lifecycle rules live in
//! `kinoplex_core::booking`. `to_aggregate` rehydrates the domain state
//! machine so handlers never run guards against raw status ids.

use kinoplex_core::booking;
use kinoplex_core::error::CoreError;
use kinoplex_core::status::{BookingStatus, StatusId};
use kinoplex_core::types::{DbId, Timestamp};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::models::seat::Seat;

/// A booking row from the `bookings` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Booking {
    pub id: DbId,
    pub screening_id: DbId,
    pub user_id: DbId,
    pub status_id: StatusId,
    pub total_amount: Decimal,
    pub booking_date: Timestamp,
    pub expires_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Booking {
    /// Decode the row's status id.
    pub fn status(&self) -> Result<BookingStatus, CoreError> {
        BookingStatus::from_id(self.status_id)
    }

    /// Rehydrate the domain aggregate with the given seat assignments.
    pub fn to_aggregate(&self, seat_ids: Vec<DbId>) -> Result<booking::Booking, CoreError> {
        Ok(booking::Booking::from_storage(
            self.screening_id,
            self.user_id,
            self.status()?,
            self.total_amount,
            self.booking_date,
            self.expires_at,
            seat_ids,
        ))
    }
}

/// One `(booking status, seat id)` pair per booking-seat row of a screening.
///
/// Input to `kinoplex_core::screening::booked_seat_ids`, which filters out
/// released bookings; the query deliberately does not.
#[derive(Debug, Clone, Copy, FromRow)]
pub struct SeatAssignment {
    pub status_id: StatusId,
    pub seat_id: DbId,
}

/// Request body for `POST /api/v1/bookings`.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateBooking {
    pub screening_id: DbId,
    pub seat_ids: Vec<DbId>,
}

/// A booking plus its reserved seats, as returned by booking endpoints.
#[derive(Debug, Clone, Serialize)]
pub struct BookingDetail {
    #[serde(flatten)]
    pub booking: Booking,
    pub seats: Vec<Seat>,
}
