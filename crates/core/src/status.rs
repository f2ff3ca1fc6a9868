//! SMALLINT-backed status and method enums.
//!
//! Each variant's discriminant matches the 1-based seed order in the
//! corresponding lookup table (`booking_statuses`, `payment_statuses`,
//! `payment_methods`). API payloads carry the snake_case string form.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Status ID type matching SMALLINT/SMALLSERIAL in the database.
pub type StatusId = i16;

/* --------------------------------------------------------------------------
Booking status
-------------------------------------------------------------------------- */

/// Booking lifecycle status.
#[repr(i16)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BookingStatus {
    Pending = 1,
    Confirmed = 2,
    Cancelled = 3,
    Expired = 4,
}

impl BookingStatus {
    /// Return the database status ID.
    pub fn id(self) -> StatusId {
        self as StatusId
    }

    /// Whether a booking in this status counts toward seat conflicts.
    ///
    /// Cancelled and Expired bookings release their seats implicitly: seat
    /// availability is always recomputed from this predicate, never stored.
    pub fn holds_seats(self) -> bool {
        matches!(self, BookingStatus::Pending | BookingStatus::Confirmed)
    }

    /// Decode a status ID read from storage.
    pub fn from_id(id: StatusId) -> Result<Self, CoreError> {
        match id {
            1 => Ok(BookingStatus::Pending),
            2 => Ok(BookingStatus::Confirmed),
            3 => Ok(BookingStatus::Cancelled),
            4 => Ok(BookingStatus::Expired),
            other => Err(CoreError::Internal(format!(
                "Unknown booking status id {other}"
            ))),
        }
    }
}

impl std::fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            BookingStatus::Pending => "Pending",
            BookingStatus::Confirmed => "Confirmed",
            BookingStatus::Cancelled => "Cancelled",
            BookingStatus::Expired => "Expired",
        };
        f.write_str(name)
    }
}

/* --------------------------------------------------------------------------
Payment status
-------------------------------------------------------------------------- */

/// Payment lifecycle status.
#[repr(i16)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    Pending = 1,
    Completed = 2,
    Failed = 3,
    Refunded = 4,
}

impl PaymentStatus {
    /// Return the database status ID.
    pub fn id(self) -> StatusId {
        self as StatusId
    }

    /// Decode a status ID read from storage.
    pub fn from_id(id: StatusId) -> Result<Self, CoreError> {
        match id {
            1 => Ok(PaymentStatus::Pending),
            2 => Ok(PaymentStatus::Completed),
            3 => Ok(PaymentStatus::Failed),
            4 => Ok(PaymentStatus::Refunded),
            other => Err(CoreError::Internal(format!(
                "Unknown payment status id {other}"
            ))),
        }
    }
}

impl std::fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            PaymentStatus::Pending => "Pending",
            PaymentStatus::Completed => "Completed",
            PaymentStatus::Failed => "Failed",
            PaymentStatus::Refunded => "Refunded",
        };
        f.write_str(name)
    }
}

/* --------------------------------------------------------------------------
Payment method
-------------------------------------------------------------------------- */

/// Accepted payment methods.
#[repr(i16)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PaymentMethod {
    #[serde(rename = "credit_card")]
    CreditCard = 1,
    #[serde(rename = "debit_card")]
    DebitCard = 2,
    #[serde(rename = "paypal")]
    PayPal = 3,
    #[serde(rename = "cash")]
    Cash = 4,
    #[serde(rename = "bank_transfer")]
    BankTransfer = 5,
}

impl PaymentMethod {
    /// Return the database method ID.
    pub fn id(self) -> StatusId {
        self as StatusId
    }

    /// Decode a method ID read from storage.
    pub fn from_id(id: StatusId) -> Result<Self, CoreError> {
        match id {
            1 => Ok(PaymentMethod::CreditCard),
            2 => Ok(PaymentMethod::DebitCard),
            3 => Ok(PaymentMethod::PayPal),
            4 => Ok(PaymentMethod::Cash),
            5 => Ok(PaymentMethod::BankTransfer),
            other => Err(CoreError::Internal(format!(
                "Unknown payment method id {other}"
            ))),
        }
    }
}

/* --------------------------------------------------------------------------
Tests
-------------------------------------------------------------------------- */
