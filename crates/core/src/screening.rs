//! Screening scheduling rules and derived seat availability.
//!
//! Availability is never stored. It is computed on demand from the
//! `(status, seat_id)` assignments of the screening's bookings, so a
//! cancelled or expired booking releases its seats with no explicit
//! unreserve step. The scan is O(active bookings x seats), which is fine at
//! cinema scale.

use std::collections::HashSet;

use rust_decimal::Decimal;

use crate::error::CoreError;
use crate::status::BookingStatus;
use crate::types::{DbId, Timestamp};

/// Validate a screening's time window at creation.
///
/// The start must precede the end and must not already be in the past.
pub fn validate_schedule(
    start_time: Timestamp,
    end_time: Timestamp,
    now: Timestamp,
) -> Result<(), CoreError> {
    if start_time >= end_time {
        return Err(CoreError::Validation(
            "Start time must be before end time".into(),
        ));
    }
    if start_time < now {
        return Err(CoreError::Validation(
            "Start time cannot be in the past".into(),
        ));
    }
    Ok(())
}

/// Validate a ticket price.
pub fn validate_price(price: Decimal) -> Result<(), CoreError> {
    if price <= Decimal::ZERO {
        return Err(CoreError::Validation(
            "Price must be greater than zero".into(),
        ));
    }
    Ok(())
}

/// Distinct seat ids held by Pending or Confirmed bookings.
///
/// `assignments` is one `(booking status, seat id)` pair per booking-seat row
/// of the screening; assignments of released bookings are filtered out here,
/// not in the query, so "active booking" has exactly one definition.
pub fn booked_seat_ids<I>(assignments: I) -> HashSet<DbId>
where
    I: IntoIterator<Item = (BookingStatus, DbId)>,
{
    assignments
        .into_iter()
        .filter(|(status, _)| status.holds_seats())
        .map(|(_, seat_id)| seat_id)
        .collect()
}

/// Whether a seat can be booked for a screening.
///
/// Inactive screenings have no available seats at all.
pub fn is_seat_available(
    screening_active: bool,
    booked: &HashSet<DbId>,
    seat_id: DbId,
) -> bool {
    screening_active && !booked.contains(&seat_id)
}

/* --------------------------------------------------------------------------
Tests
-------------------------------------------------------------------------- */

#[cfg(test)]
mod tests {
    use chrono::{Duration, TimeZone, Utc};

    use super::*;

    fn now() -> Timestamp {
        Utc.with_ymd_and_hms(2026, 3, 14, 18, 0, 0).unwrap()
    }

    #[test]
    fn schedule_accepts_future_window() {
        let start = now() + Duration::hours(1);
        let end = start + Duration::hours(2);
        assert!(validate_schedule(start, end, now()).is_ok());
    }

    #[test]
    fn schedule_rejects_inverted_or_empty_window() {
        let start = now() + Duration::hours(2);
        assert!(validate_schedule(start, start, now()).is_err());
        assert!(validate_schedule(start, start - Duration::hours(1), now()).is_err());
    }

    #[test]
    fn schedule_rejects_past_start() {
        let start = now() - Duration::minutes(1);
        let end = now() + Duration::hours(2);
        let err = validate_schedule(start, end, now()).unwrap_err();
        assert!(err.to_string().contains("past"));
    }

    #[test]
    fn price_must_be_positive() {
        assert!(validate_price(Decimal::new(1050, 2)).is_ok());
        assert!(validate_price(Decimal::ZERO).is_err());
        assert!(validate_price(Decimal::new(-1, 0)).is_err());
    }

    #[test]
    fn booked_seat_ids_collects_only_active_bookings() {
        let assignments = vec![
            (BookingStatus::Pending, 1),
            (BookingStatus::Confirmed, 2),
            (BookingStatus::Cancelled, 3),
            (BookingStatus::Expired, 4),
            // Seat 1 also held by a second active booking; dedup applies.
            (BookingStatus::Confirmed, 1),
        ];
        let booked = booked_seat_ids(assignments);
        assert_eq!(booked, HashSet::from([1, 2]));
    }

    #[test]
    fn cancelled_booking_releases_its_seats() {
        let before = booked_seat_ids(vec![(BookingStatus::Pending, 9)]);
        assert!(!is_seat_available(true, &before, 9));

        let after = booked_seat_ids(vec![(BookingStatus::Cancelled, 9)]);
        assert!(is_seat_available(true, &after, 9));
    }

    #[test]
    fn inactive_screening_has_no_available_seats() {
        let booked = HashSet::new();
        assert!(!is_seat_available(false, &booked, 1));
    }
}
