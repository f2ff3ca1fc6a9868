//! Integration tests for the booking and payment repositories: transactional
//! inserts, the conflict-scan query, compare-and-swap status updates, and
//! the storage backstop constraints.

use chrono::{Duration, NaiveDate, Utc};
use kinoplex_core::booking::{Booking, DEFAULT_EXPIRATION_MINS};
use kinoplex_core::payment::Payment;
use kinoplex_core::screening::booked_seat_ids;
use kinoplex_core::status::{BookingStatus, PaymentMethod};
use kinoplex_core::types::DbId;
use kinoplex_db::models::auditorium::CreateAuditorium;
use kinoplex_db::models::movie::CreateMovie;
use kinoplex_db::models::screening::CreateScreening;
use kinoplex_db::models::seat::CreateSeat;
use kinoplex_db::models::user::CreateUser;
use kinoplex_db::repositories::{
    AuditoriumRepo, BookingRepo, MovieRepo, PaymentRepo, RoleRepo, ScreeningRepo, SeatRepo,
    UserRepo,
};
use rust_decimal::Decimal;
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

struct Fixture {
    user_id: DbId,
    screening_id: DbId,
    seat_ids: Vec<DbId>,
}

/// One user, one movie/auditorium/screening, three seats A1-A3.
async fn fixture(pool: &PgPool) -> Fixture {
    let role = RoleRepo::find_by_name(pool, "user").await.unwrap().unwrap();
    let user = UserRepo::create(
        pool,
        &CreateUser {
            username: "alice".to_string(),
            email: "alice@example.com".to_string(),
            password_hash: "$argon2id$fake".to_string(),
            role_id: role.id,
        },
    )
    .await
    .unwrap();

    let movie = MovieRepo::create(
        pool,
        &CreateMovie {
            title: "Heat".to_string(),
            description: "A film".to_string(),
            duration_minutes: 170,
            genre: "Crime".to_string(),
            director: "Michael Mann".to_string(),
            release_date: NaiveDate::from_ymd_opt(1995, 12, 15).unwrap(),
            poster_url: None,
            ticket_price: Decimal::new(1000, 2),
        },
    )
    .await
    .unwrap();

    let auditorium = AuditoriumRepo::create(
        pool,
        &CreateAuditorium {
            name: "Screen 1".to_string(),
            capacity: 30,
        },
    )
    .await
    .unwrap();

    let mut seat_ids = Vec::new();
    for number in 1..=3 {
        let seat = SeatRepo::create(
            pool,
            auditorium.id,
            &CreateSeat {
                row_label: "A".to_string(),
                seat_number: number,
            },
        )
        .await
        .unwrap();
        seat_ids.push(seat.id);
    }

    let start = Utc::now() + Duration::days(1);
    let screening = ScreeningRepo::create(
        pool,
        &CreateScreening {
            movie_id: movie.id,
            auditorium_id: auditorium.id,
            start_time: start,
            end_time: start + Duration::hours(2),
            price: Decimal::new(1000, 2),
        },
    )
    .await
    .unwrap();

    Fixture {
        user_id: user.id,
        screening_id: screening.id,
        seat_ids,
    }
}

/// Persist a pending booking over the given seats, committing the
/// transaction, and return its row id.
async fn insert_booking(pool: &PgPool, fx: &Fixture, seat_ids: &[DbId]) -> DbId {
    let mut aggregate = Booking::create(
        fx.screening_id,
        fx.user_id,
        Decimal::new(1000, 2) * Decimal::from(seat_ids.len() as i64),
        DEFAULT_EXPIRATION_MINS,
        Utc::now(),
    )
    .unwrap();
    for seat_id in seat_ids {
        aggregate.add_seat(*seat_id).unwrap();
    }

    let mut tx = pool.begin().await.unwrap();
    let row = BookingRepo::insert_tx(&mut tx, &aggregate).await.unwrap();
    BookingRepo::insert_seats_tx(&mut tx, row.id, aggregate.seat_ids())
        .await
        .unwrap();
    tx.commit().await.unwrap();
    row.id
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_insert_booking_with_seats_round_trips(pool: PgPool) {
    let fx = fixture(&pool).await;
    let booking_id = insert_booking(&pool, &fx, &fx.seat_ids).await;

    let row = BookingRepo::find_by_id(&pool, booking_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(row.status().unwrap(), BookingStatus::Pending);
    assert_eq!(row.total_amount, Decimal::new(3000, 2));
    assert!(row.expires_at.is_some());

    // Seats come back in insertion order.
    let seat_ids = BookingRepo::seat_ids(&pool, booking_id).await.unwrap();
    assert_eq!(seat_ids, fx.seat_ids);

    let seats = BookingRepo::seats_of_booking(&pool, booking_id)
        .await
        .unwrap();
    assert_eq!(seats.len(), 3);
    assert_eq!(seats[0].display_string(), "A1");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_duplicate_seat_within_booking_hits_backstop_constraint(pool: PgPool) {
    let fx = fixture(&pool).await;
    let booking_id = insert_booking(&pool, &fx, &[fx.seat_ids[0]]).await;

    // Bypassing the aggregate guard, the unique constraint still refuses.
    let mut tx = pool.begin().await.unwrap();
    let err = BookingRepo::insert_seats_tx(&mut tx, booking_id, &[fx.seat_ids[0]])
        .await
        .unwrap_err();
    assert_eq!(
        err.as_database_error().and_then(|e| e.constraint()),
        Some("uq_booking_seats_booking_seat")
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_seat_assignments_feed_derived_availability(pool: PgPool) {
    let fx = fixture(&pool).await;
    let booking_id = insert_booking(&pool, &fx, &[fx.seat_ids[0], fx.seat_ids[1]]).await;

    let assignments = BookingRepo::seat_assignments(&pool, fx.screening_id)
        .await
        .unwrap();
    assert_eq!(assignments.len(), 2);

    let decoded: Vec<_> = assignments
        .iter()
        .map(|a| (BookingStatus::from_id(a.status_id).unwrap(), a.seat_id))
        .collect();
    let booked = booked_seat_ids(decoded);
    assert!(booked.contains(&fx.seat_ids[0]));
    assert!(booked.contains(&fx.seat_ids[1]));
    assert!(!booked.contains(&fx.seat_ids[2]));

    // Cancelling releases the seats: the rows remain, the derived set empties.
    BookingRepo::update_status_if(
        &pool,
        booking_id,
        BookingStatus::Pending,
        BookingStatus::Cancelled,
    )
    .await
    .unwrap()
    .unwrap();

    let assignments = BookingRepo::seat_assignments(&pool, fx.screening_id)
        .await
        .unwrap();
    assert_eq!(assignments.len(), 2);
    let decoded: Vec<_> = assignments
        .iter()
        .map(|a| (BookingStatus::from_id(a.status_id).unwrap(), a.seat_id))
        .collect();
    assert!(booked_seat_ids(decoded).is_empty());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_update_status_if_is_a_compare_and_swap(pool: PgPool) {
    let fx = fixture(&pool).await;
    let booking_id = insert_booking(&pool, &fx, &[fx.seat_ids[0]]).await;

    // Wrong expected status: no row updated.
    let miss = BookingRepo::update_status_if(
        &pool,
        booking_id,
        BookingStatus::Confirmed,
        BookingStatus::Cancelled,
    )
    .await
    .unwrap();
    assert!(miss.is_none());

    let hit = BookingRepo::update_status_if(
        &pool,
        booking_id,
        BookingStatus::Pending,
        BookingStatus::Confirmed,
    )
    .await
    .unwrap()
    .unwrap();
    assert_eq!(hit.status().unwrap(), BookingStatus::Confirmed);

    // The swap consumed the Pending state; replaying it misses.
    let replay = BookingRepo::update_status_if(
        &pool,
        booking_id,
        BookingStatus::Pending,
        BookingStatus::Confirmed,
    )
    .await
    .unwrap();
    assert!(replay.is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_active_booking_guards_toggle_with_status(pool: PgPool) {
    let fx = fixture(&pool).await;
    let booking_id = insert_booking(&pool, &fx, &[fx.seat_ids[0]]).await;

    assert!(BookingRepo::has_active_for_screening(&pool, fx.screening_id)
        .await
        .unwrap());
    assert!(BookingRepo::has_active_for_seat(&pool, fx.seat_ids[0])
        .await
        .unwrap());
    assert!(!BookingRepo::has_active_for_seat(&pool, fx.seat_ids[1])
        .await
        .unwrap());

    BookingRepo::update_status_if(
        &pool,
        booking_id,
        BookingStatus::Pending,
        BookingStatus::Cancelled,
    )
    .await
    .unwrap()
    .unwrap();

    assert!(!BookingRepo::has_active_for_screening(&pool, fx.screening_id)
        .await
        .unwrap());
    assert!(!BookingRepo::has_active_for_seat(&pool, fx.seat_ids[0])
        .await
        .unwrap());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_payment_round_trip_and_one_per_booking(pool: PgPool) {
    let fx = fixture(&pool).await;
    let booking_id = insert_booking(&pool, &fx, &[fx.seat_ids[0]]).await;

    let mut aggregate = Payment::create(
        booking_id,
        Decimal::new(1000, 2),
        PaymentMethod::CreditCard,
        None,
        Some("window seat".to_string()),
        Utc::now(),
    )
    .unwrap();
    aggregate.mark_as_paid(Some("tx-1")).unwrap();

    let mut tx = pool.begin().await.unwrap();
    assert!(PaymentRepo::find_by_booking_tx(&mut tx, booking_id)
        .await
        .unwrap()
        .is_none());
    let row = PaymentRepo::insert_tx(&mut tx, &aggregate).await.unwrap();
    tx.commit().await.unwrap();

    assert_eq!(row.method().unwrap(), PaymentMethod::CreditCard);
    assert_eq!(row.transaction_id.as_deref(), Some("tx-1"));
    assert_eq!(row.notes.as_deref(), Some("window seat"));

    let listed = PaymentRepo::list_by_booking(&pool, booking_id).await.unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].id, row.id);

    // A second payment for the same booking hits uq_payments_booking.
    let mut tx = pool.begin().await.unwrap();
    let err = PaymentRepo::insert_tx(&mut tx, &aggregate).await.unwrap_err();
    assert_eq!(
        err.as_database_error().and_then(|e| e.constraint()),
        Some("uq_payments_booking")
    );
}
