//! Repository for the `payments` table.

use kinoplex_core::payment;
use kinoplex_core::types::DbId;
use sqlx::{PgPool, Postgres, Transaction};

use crate::models::payment::Payment;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, booking_id, amount, method_id, status_id, transaction_id, \
    notes, payment_date, created_at, updated_at";

/// Provides persistence for payments.
pub struct PaymentRepo;

impl PaymentRepo {
    /// Insert a new payment from the domain aggregate, returning the row.
    ///
    /// `uq_payments_booking` rejects a second payment for the same booking
    /// even if two orchestrations race past the existence check.
    pub async fn insert_tx(
        tx: &mut Transaction<'_, Postgres>,
        aggregate: &payment::Payment,
    ) -> Result<Payment, sqlx::Error> {
        let query = format!(
            "INSERT INTO payments \
                (booking_id, amount, method_id, status_id, transaction_id, notes, payment_date) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Payment>(&query)
            .bind(aggregate.booking_id())
            .bind(aggregate.amount())
            .bind(aggregate.method().id())
            .bind(aggregate.status().id())
            .bind(aggregate.transaction_id())
            .bind(aggregate.notes())
            .bind(aggregate.payment_date())
            .fetch_one(&mut **tx)
            .await
    }

    /// Find a payment by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Payment>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM payments WHERE id = $1");
        sqlx::query_as::<_, Payment>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find the payment of a booking inside a caller-owned transaction.
    pub async fn find_by_booking_tx(
        tx: &mut Transaction<'_, Postgres>,
        booking_id: DbId,
    ) -> Result<Option<Payment>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM payments WHERE booking_id = $1");
        sqlx::query_as::<_, Payment>(&query)
            .bind(booking_id)
            .fetch_optional(&mut **tx)
            .await
    }

    /// List a booking's payments (at most one today, kept as a list for the
    /// API shape).
    pub async fn list_by_booking(
        pool: &PgPool,
        booking_id: DbId,
    ) -> Result<Vec<Payment>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM payments WHERE booking_id = $1 ORDER BY payment_date DESC"
        );
        sqlx::query_as::<_, Payment>(&query)
            .bind(booking_id)
            .fetch_all(pool)
            .await
    }
}
