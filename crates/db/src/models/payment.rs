//! Payment entity model and DTOs.

use kinoplex_core::error::CoreError;
use kinoplex_core::status::{PaymentMethod, PaymentStatus, StatusId};
use kinoplex_core::types::{DbId, Timestamp};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A payment row from the `payments` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Payment {
    pub id: DbId,
    pub booking_id: DbId,
    pub amount: Decimal,
    pub method_id: StatusId,
    pub status_id: StatusId,
    pub transaction_id: Option<String>,
    pub notes: Option<String>,
    pub payment_date: Timestamp,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Payment {
    /// Decode the row's status id.
    pub fn status(&self) -> Result<PaymentStatus, CoreError> {
        PaymentStatus::from_id(self.status_id)
    }

    /// Decode the row's method id.
    pub fn method(&self) -> Result<PaymentMethod, CoreError> {
        PaymentMethod::from_id(self.method_id)
    }
}

/// Request body for `POST /api/v1/payments`.
///
/// The amount is not part of the request: a payment always settles the
/// booking's full total.
#[derive(Debug, Clone, Deserialize)]
pub struct CreatePayment {
    pub booking_id: DbId,
    pub method: PaymentMethod,
    pub transaction_id: Option<String>,
    pub notes: Option<String>,
}
