//! Booking aggregate state machine.
//!
//! A booking is created Pending with a hard expiry and moves through
//! `Pending -> Confirmed | Cancelled | Expired`. Seats are attached only
//! while Pending. All fields are module-private: the only way to change a
//! booking's state is through the methods here, so every transition guard is
//! enforced at compile time for the rest of the workspace.
//!
//! Expiry is lazy. Nothing sweeps bookings past their deadline; a booking is
//! marked Expired only when a predicate-checking path (payment, confirm)
//! touches it. Time-dependent guards take `now` explicitly so the machine is
//! deterministic under test.

use rust_decimal::Decimal;

use crate::error::CoreError;
use crate::status::BookingStatus;
use crate::types::{DbId, Timestamp};

/// Default reservation window, in minutes.
pub const DEFAULT_EXPIRATION_MINS: i64 = 15;

/// The booking aggregate root: lifecycle state plus its reserved seat ids.
#[derive(Debug, Clone)]
pub struct Booking {
    screening_id: DbId,
    user_id: DbId,
    status: BookingStatus,
    total_amount: Decimal,
    booking_date: Timestamp,
    expires_at: Option<Timestamp>,
    seat_ids: Vec<DbId>,
}

impl Booking {
    /// Create a new pending booking expiring `expiration_minutes` from `now`.
    pub fn create(
        screening_id: DbId,
        user_id: DbId,
        total_amount: Decimal,
        expiration_minutes: i64,
        now: Timestamp,
    ) -> Result<Self, CoreError> {
        if screening_id <= 0 {
            return Err(CoreError::Validation("Screening ID is required".into()));
        }
        if user_id <= 0 {
            return Err(CoreError::Validation("User ID is required".into()));
        }
        if total_amount <= Decimal::ZERO {
            return Err(CoreError::Validation(
                "Total amount must be greater than zero".into(),
            ));
        }
        if expiration_minutes <= 0 {
            return Err(CoreError::Validation(
                "Expiration minutes must be greater than zero".into(),
            ));
        }

        Ok(Self {
            screening_id,
            user_id,
            status: BookingStatus::Pending,
            total_amount,
            booking_date: now,
            expires_at: Some(now + chrono::Duration::minutes(expiration_minutes)),
            seat_ids: Vec::new(),
        })
    }

    /// Rehydrate a booking from its persisted state.
    ///
    /// Storage is trusted: no guards run here. Use [`Booking::create`] for
    /// new bookings.
    pub fn from_storage(
        screening_id: DbId,
        user_id: DbId,
        status: BookingStatus,
        total_amount: Decimal,
        booking_date: Timestamp,
        expires_at: Option<Timestamp>,
        seat_ids: Vec<DbId>,
    ) -> Self {
        Self {
            screening_id,
            user_id,
            status,
            total_amount,
            booking_date,
            expires_at,
            seat_ids,
        }
    }

    /// Reserve a seat on this booking.
    ///
    /// Allowed only while Pending; a seat already on the booking is rejected.
    pub fn add_seat(&mut self, seat_id: DbId) -> Result<(), CoreError> {
        if seat_id <= 0 {
            return Err(CoreError::Validation("Seat ID is required".into()));
        }
        if self.status != BookingStatus::Pending {
            return Err(CoreError::Conflict(format!(
                "Cannot add seats to booking with status {}",
                self.status
            )));
        }
        if self.seat_ids.contains(&seat_id) {
            return Err(CoreError::Conflict(
                "Seat is already added to this booking".into(),
            ));
        }
        self.seat_ids.push(seat_id);
        Ok(())
    }

    /// Transition to Confirmed. Only a pending, unexpired booking qualifies.
    pub fn confirm(&mut self, now: Timestamp) -> Result<(), CoreError> {
        if self.status != BookingStatus::Pending {
            return Err(CoreError::Conflict(format!(
                "Cannot confirm booking with status {}. Only pending bookings can be confirmed.",
                self.status
            )));
        }
        if self.is_expired(now) {
            return Err(CoreError::Conflict(
                "Cannot confirm an expired booking".into(),
            ));
        }
        self.status = BookingStatus::Confirmed;
        Ok(())
    }

    /// Transition to Cancelled. Pending and Confirmed bookings may cancel.
    pub fn cancel(&mut self) -> Result<(), CoreError> {
        if self.status == BookingStatus::Cancelled {
            return Err(CoreError::Conflict("Booking is already cancelled".into()));
        }
        if self.status == BookingStatus::Expired {
            return Err(CoreError::Conflict(
                "Cannot cancel an expired booking".into(),
            ));
        }
        self.status = BookingStatus::Cancelled;
        Ok(())
    }

    /// Transition to Expired once the wall clock is past `expires_at`.
    ///
    /// Returns `Ok(true)` when the transition happened. Already-Expired
    /// bookings and bookings still inside their window are a silent no-op
    /// (`Ok(false)`); Confirmed and Cancelled bookings are an error.
    pub fn mark_as_expired(&mut self, now: Timestamp) -> Result<bool, CoreError> {
        if self.status == BookingStatus::Expired {
            return Ok(false);
        }
        if matches!(
            self.status,
            BookingStatus::Confirmed | BookingStatus::Cancelled
        ) {
            return Err(CoreError::Conflict(format!(
                "Cannot expire booking with status {}",
                self.status
            )));
        }
        if self.is_expired(now) {
            self.status = BookingStatus::Expired;
            return Ok(true);
        }
        Ok(false)
    }

    /// Whether the booking's deadline has passed.
    pub fn is_expired(&self, now: Timestamp) -> bool {
        self.expires_at.is_some_and(|deadline| deadline < now)
    }

    /// Whether a payment may be created for this booking.
    pub fn can_be_paid(&self, now: Timestamp) -> bool {
        self.status == BookingStatus::Pending && !self.is_expired(now)
    }

    /// Ownership check used by every user-facing read and mutation.
    pub fn belongs_to_user(&self, user_id: DbId) -> bool {
        self.user_id == user_id
    }

    pub fn screening_id(&self) -> DbId {
        self.screening_id
    }

    pub fn user_id(&self) -> DbId {
        self.user_id
    }

    pub fn status(&self) -> BookingStatus {
        self.status
    }

    pub fn total_amount(&self) -> Decimal {
        self.total_amount
    }

    pub fn booking_date(&self) -> Timestamp {
        self.booking_date
    }

    pub fn expires_at(&self) -> Option<Timestamp> {
        self.expires_at
    }

    pub fn seat_ids(&self) -> &[DbId] {
        &self.seat_ids
    }
}

/* --------------------------------------------------------------------------
Tests
-------------------------------------------------------------------------- */

#[cfg(test)]
mod tests {
    use chrono::{Duration, TimeZone, Utc};
    use rust_decimal::Decimal;

    use super::*;

    fn now() -> Timestamp {
        Utc.with_ymd_and_hms(2026, 3, 14, 18, 0, 0).unwrap()
    }

    fn pending_booking() -> Booking {
        Booking::create(1, 7, Decimal::new(3000, 2), DEFAULT_EXPIRATION_MINS, now()).unwrap()
    }

    #[test]
    fn create_sets_pending_status_and_expiry_window() {
        let booking = pending_booking();
        assert_eq!(booking.status(), BookingStatus::Pending);
        assert_eq!(booking.booking_date(), now());
        assert_eq!(booking.expires_at(), Some(now() + Duration::minutes(15)));
        assert!(booking.seat_ids().is_empty());
    }

    #[test]
    fn create_rejects_invalid_inputs() {
        assert!(Booking::create(0, 7, Decimal::ONE, 15, now()).is_err());
        assert!(Booking::create(1, 0, Decimal::ONE, 15, now()).is_err());
        assert!(Booking::create(1, 7, Decimal::ZERO, 15, now()).is_err());
        assert!(Booking::create(1, 7, Decimal::new(-100, 2), 15, now()).is_err());
        assert!(Booking::create(1, 7, Decimal::ONE, 0, now()).is_err());
    }

    #[test]
    fn add_seat_appends_in_order() {
        let mut booking = pending_booking();
        booking.add_seat(11).unwrap();
        booking.add_seat(12).unwrap();
        assert_eq!(booking.seat_ids(), &[11, 12]);
    }

    #[test]
    fn add_seat_rejects_duplicate() {
        let mut booking = pending_booking();
        booking.add_seat(11).unwrap();
        let err = booking.add_seat(11).unwrap_err();
        assert!(err.to_string().contains("already added"));
        assert_eq!(booking.seat_ids(), &[11]);
    }

    #[test]
    fn add_seat_rejects_non_pending_status() {
        let mut booking = pending_booking();
        booking.add_seat(11).unwrap();
        booking.confirm(now()).unwrap();
        assert!(booking.add_seat(12).is_err());
    }

    #[test]
    fn confirm_moves_pending_to_confirmed() {
        let mut booking = pending_booking();
        booking.confirm(now()).unwrap();
        assert_eq!(booking.status(), BookingStatus::Confirmed);
    }

    #[test]
    fn confirm_twice_fails_the_second_time() {
        let mut booking = pending_booking();
        booking.confirm(now()).unwrap();
        let err = booking.confirm(now()).unwrap_err();
        assert!(err.to_string().contains("Only pending bookings"));
    }

    #[test]
    fn confirm_rejects_expired_booking() {
        let mut booking = pending_booking();
        let late = now() + Duration::minutes(16);
        let err = booking.confirm(late).unwrap_err();
        assert!(err.to_string().contains("expired"));
        // The failed confirm must not have changed the status.
        assert_eq!(booking.status(), BookingStatus::Pending);
    }

    #[test]
    fn cancel_allowed_from_pending_and_confirmed() {
        let mut pending = pending_booking();
        pending.cancel().unwrap();
        assert_eq!(pending.status(), BookingStatus::Cancelled);

        let mut confirmed = pending_booking();
        confirmed.confirm(now()).unwrap();
        confirmed.cancel().unwrap();
        assert_eq!(confirmed.status(), BookingStatus::Cancelled);
    }

    #[test]
    fn cancel_rejects_cancelled_and_expired() {
        let mut booking = pending_booking();
        booking.cancel().unwrap();
        assert!(booking.cancel().is_err());

        let mut expired = pending_booking();
        expired
            .mark_as_expired(now() + Duration::minutes(20))
            .unwrap();
        assert!(expired.cancel().is_err());
    }

    #[test]
    fn mark_as_expired_before_deadline_is_a_silent_noop() {
        let mut booking = pending_booking();
        let transitioned = booking.mark_as_expired(now() + Duration::minutes(5)).unwrap();
        assert!(!transitioned);
        assert_eq!(booking.status(), BookingStatus::Pending);
    }

    #[test]
    fn mark_as_expired_past_deadline_transitions() {
        let mut booking = pending_booking();
        let transitioned = booking
            .mark_as_expired(now() + Duration::minutes(16))
            .unwrap();
        assert!(transitioned);
        assert_eq!(booking.status(), BookingStatus::Expired);

        // Idempotent once expired.
        let again = booking.mark_as_expired(now() + Duration::hours(1)).unwrap();
        assert!(!again);
    }

    #[test]
    fn mark_as_expired_rejects_confirmed_and_cancelled() {
        let mut confirmed = pending_booking();
        confirmed.confirm(now()).unwrap();
        assert!(confirmed.mark_as_expired(now() + Duration::hours(1)).is_err());

        let mut cancelled = pending_booking();
        cancelled.cancel().unwrap();
        assert!(cancelled.mark_as_expired(now() + Duration::hours(1)).is_err());
    }

    #[test]
    fn can_be_paid_only_while_pending_and_unexpired() {
        let booking = pending_booking();
        assert!(booking.can_be_paid(now()));
        assert!(booking.can_be_paid(now() + Duration::minutes(14)));
        assert!(!booking.can_be_paid(now() + Duration::minutes(16)));

        let mut confirmed = pending_booking();
        confirmed.confirm(now()).unwrap();
        assert!(!confirmed.can_be_paid(now()));
    }

    #[test]
    fn belongs_to_user_matches_owner_only() {
        let booking = pending_booking();
        assert!(booking.belongs_to_user(7));
        assert!(!booking.belongs_to_user(8));
    }

    #[test]
    fn from_storage_preserves_state_without_guards() {
        let booking = Booking::from_storage(
            1,
            7,
            BookingStatus::Expired,
            Decimal::new(1000, 2),
            now(),
            Some(now() - Duration::minutes(1)),
            vec![3, 4],
        );
        assert_eq!(booking.status(), BookingStatus::Expired);
        assert_eq!(booking.seat_ids(), &[3, 4]);
    }
}
