//! Payment aggregate state machine.
//!
//! A payment is created Pending and moves forward only:
//! `Pending -> Completed | Failed`, `Completed -> Refunded`. A booking has at
//! most one payment; that uniqueness is enforced by the orchestration layer
//! and backstopped by a storage constraint.

use rust_decimal::Decimal;

use crate::error::CoreError;
use crate::status::{PaymentMethod, PaymentStatus};
use crate::types::{DbId, Timestamp};

/// The payment aggregate: amount, method, and forward-only lifecycle state.
#[derive(Debug, Clone)]
pub struct Payment {
    booking_id: DbId,
    amount: Decimal,
    method: PaymentMethod,
    status: PaymentStatus,
    transaction_id: Option<String>,
    notes: Option<String>,
    payment_date: Timestamp,
}

impl Payment {
    /// Create a new pending payment for a booking.
    pub fn create(
        booking_id: DbId,
        amount: Decimal,
        method: PaymentMethod,
        transaction_id: Option<String>,
        notes: Option<String>,
        now: Timestamp,
    ) -> Result<Self, CoreError> {
        if booking_id <= 0 {
            return Err(CoreError::Validation("Booking ID is required".into()));
        }
        if amount <= Decimal::ZERO {
            return Err(CoreError::Validation(
                "Payment amount must be greater than zero".into(),
            ));
        }

        Ok(Self {
            booking_id,
            amount,
            method,
            status: PaymentStatus::Pending,
            transaction_id,
            notes,
            payment_date: now,
        })
    }

    /// Rehydrate a payment from its persisted state. Storage is trusted.
    pub fn from_storage(
        booking_id: DbId,
        amount: Decimal,
        method: PaymentMethod,
        status: PaymentStatus,
        transaction_id: Option<String>,
        notes: Option<String>,
        payment_date: Timestamp,
    ) -> Self {
        Self {
            booking_id,
            amount,
            method,
            status,
            transaction_id,
            notes,
            payment_date,
        }
    }

    /// Transition to Completed.
    ///
    /// A non-blank `transaction_id` replaces any id recorded at creation.
    pub fn mark_as_paid(&mut self, transaction_id: Option<&str>) -> Result<(), CoreError> {
        if self.status == PaymentStatus::Completed {
            return Err(CoreError::Conflict("Payment is already completed".into()));
        }
        if self.status == PaymentStatus::Refunded {
            return Err(CoreError::Conflict(
                "Cannot mark a refunded payment as paid".into(),
            ));
        }

        self.status = PaymentStatus::Completed;
        if let Some(tx_id) = transaction_id {
            if !tx_id.trim().is_empty() {
                self.transaction_id = Some(tx_id.to_string());
            }
        }
        Ok(())
    }

    /// Transition to Failed. Completed and Refunded payments cannot fail.
    pub fn mark_as_failed(&mut self) -> Result<(), CoreError> {
        if self.status == PaymentStatus::Completed {
            return Err(CoreError::Conflict(
                "Cannot mark a completed payment as failed".into(),
            ));
        }
        if self.status == PaymentStatus::Refunded {
            return Err(CoreError::Conflict(
                "Cannot mark a refunded payment as failed".into(),
            ));
        }
        self.status = PaymentStatus::Failed;
        Ok(())
    }

    /// Transition to Refunded. Only a Completed payment qualifies.
    pub fn mark_as_refunded(&mut self) -> Result<(), CoreError> {
        if self.status != PaymentStatus::Completed {
            return Err(CoreError::Conflict(format!(
                "Cannot refund payment with status {}. Only completed payments can be refunded.",
                self.status
            )));
        }
        self.status = PaymentStatus::Refunded;
        Ok(())
    }

    pub fn is_completed(&self) -> bool {
        self.status == PaymentStatus::Completed
    }

    pub fn can_be_refunded(&self) -> bool {
        self.status == PaymentStatus::Completed
    }

    pub fn booking_id(&self) -> DbId {
        self.booking_id
    }

    pub fn amount(&self) -> Decimal {
        self.amount
    }

    pub fn method(&self) -> PaymentMethod {
        self.method
    }

    pub fn status(&self) -> PaymentStatus {
        self.status
    }

    pub fn transaction_id(&self) -> Option<&str> {
        self.transaction_id.as_deref()
    }

    pub fn notes(&self) -> Option<&str> {
        self.notes.as_deref()
    }

    pub fn payment_date(&self) -> Timestamp {
        self.payment_date
    }
}

/* --------------------------------------------------------------------------
Tests
-------------------------------------------------------------------------- */
