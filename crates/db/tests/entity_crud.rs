//! Integration tests for catalog repositories against a real database:
//! hierarchy creation, unique constraints, partial updates, and
//! soft-delete visibility.

use chrono::{Duration, NaiveDate, Utc};
use kinoplex_db::models::auditorium::{CreateAuditorium, UpdateAuditorium};
use kinoplex_db::models::movie::{CreateMovie, UpdateMovie};
use kinoplex_db::models::screening::CreateScreening;
use kinoplex_db::models::seat::CreateSeat;
use kinoplex_db::models::user::CreateUser;
use kinoplex_db::repositories::{
    AuditoriumRepo, MovieRepo, RoleRepo, ScreeningRepo, SeatRepo, UserRepo,
};
use rust_decimal::Decimal;
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn new_movie(title: &str) -> CreateMovie {
    CreateMovie {
        title: title.to_string(),
        description: "A film".to_string(),
        duration_minutes: 120,
        genre: "Drama".to_string(),
        director: "Someone".to_string(),
        release_date: NaiveDate::from_ymd_opt(2020, 6, 1).unwrap(),
        poster_url: None,
        ticket_price: Decimal::new(1000, 2),
    }
}

fn new_auditorium(name: &str) -> CreateAuditorium {
    CreateAuditorium {
        name: name.to_string(),
        capacity: 40,
    }
}

fn new_seat(row: &str, number: i32) -> CreateSeat {
    CreateSeat {
        row_label: row.to_string(),
        seat_number: number,
    }
}

fn new_screening(movie_id: i64, auditorium_id: i64) -> CreateScreening {
    let start = Utc::now() + Duration::days(1);
    CreateScreening {
        movie_id,
        auditorium_id,
        start_time: start,
        end_time: start + Duration::hours(2),
        price: Decimal::new(1250, 2),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_full_hierarchy(pool: PgPool) {
    let movie = MovieRepo::create(&pool, &new_movie("Heat")).await.unwrap();
    let auditorium = AuditoriumRepo::create(&pool, &new_auditorium("Screen 1"))
        .await
        .unwrap();
    let seat = SeatRepo::create(&pool, auditorium.id, &new_seat("A", 1))
        .await
        .unwrap();
    let screening = ScreeningRepo::create(&pool, &new_screening(movie.id, auditorium.id))
        .await
        .unwrap();

    assert!(movie.is_active);
    assert!(seat.is_active);
    assert!(screening.is_active);
    assert_eq!(seat.auditorium_id, auditorium.id);
    assert_eq!(screening.movie_id, movie.id);
    assert_eq!(screening.price, Decimal::new(1250, 2));
    assert_eq!(seat.display_string(), "A1");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_duplicate_seat_position_violates_unique_constraint(pool: PgPool) {
    let auditorium = AuditoriumRepo::create(&pool, &new_auditorium("Screen 1"))
        .await
        .unwrap();
    SeatRepo::create(&pool, auditorium.id, &new_seat("A", 1))
        .await
        .unwrap();

    let err = SeatRepo::create(&pool, auditorium.id, &new_seat("A", 1))
        .await
        .unwrap_err();
    let constraint = err
        .as_database_error()
        .and_then(|db_err| db_err.constraint())
        .unwrap();
    assert_eq!(constraint, "uq_seats_auditorium_row_number");

    // The same position in another auditorium is fine.
    let other = AuditoriumRepo::create(&pool, &new_auditorium("Screen 2"))
        .await
        .unwrap();
    assert!(SeatRepo::create(&pool, other.id, &new_seat("A", 1))
        .await
        .is_ok());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_find_by_position(pool: PgPool) {
    let auditorium = AuditoriumRepo::create(&pool, &new_auditorium("Screen 1"))
        .await
        .unwrap();
    let created = SeatRepo::create(&pool, auditorium.id, &new_seat("B", 7))
        .await
        .unwrap();

    let found = SeatRepo::find_by_position(&pool, auditorium.id, "B", 7)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(found.id, created.id);

    let missing = SeatRepo::find_by_position(&pool, auditorium.id, "B", 8)
        .await
        .unwrap();
    assert!(missing.is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_partial_update_keeps_unset_fields(pool: PgPool) {
    let movie = MovieRepo::create(&pool, &new_movie("Original")).await.unwrap();

    let updated = MovieRepo::update(
        &pool,
        movie.id,
        &UpdateMovie {
            title: Some("Renamed".to_string()),
            description: None,
            duration_minutes: None,
            genre: None,
            director: None,
            release_date: None,
            poster_url: None,
            ticket_price: Some(Decimal::new(1500, 2)),
        },
    )
    .await
    .unwrap()
    .unwrap();

    assert_eq!(updated.title, "Renamed");
    assert_eq!(updated.ticket_price, Decimal::new(1500, 2));
    assert_eq!(updated.description, movie.description);
    assert_eq!(updated.duration_minutes, movie.duration_minutes);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_update_missing_row_returns_none(pool: PgPool) {
    let result = AuditoriumRepo::update(
        &pool,
        999_999,
        &UpdateAuditorium {
            name: Some("Ghost".to_string()),
            capacity: None,
        },
    )
    .await
    .unwrap();
    assert!(result.is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_deactivated_rows_leave_default_listings(pool: PgPool) {
    let movie = MovieRepo::create(&pool, &new_movie("Visible")).await.unwrap();
    assert_eq!(MovieRepo::list(&pool).await.unwrap().len(), 1);

    assert!(MovieRepo::deactivate(&pool, movie.id).await.unwrap());
    assert_eq!(MovieRepo::list(&pool).await.unwrap().len(), 0);

    // The row itself survives (soft delete), and a second deactivation
    // reports nothing to do.
    let row = MovieRepo::find_by_id(&pool, movie.id).await.unwrap().unwrap();
    assert!(!row.is_active);
    assert!(!MovieRepo::deactivate(&pool, movie.id).await.unwrap());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_active_screening_counts_for_guards(pool: PgPool) {
    let movie = MovieRepo::create(&pool, &new_movie("Heat")).await.unwrap();
    let auditorium = AuditoriumRepo::create(&pool, &new_auditorium("Screen 1"))
        .await
        .unwrap();
    let screening = ScreeningRepo::create(&pool, &new_screening(movie.id, auditorium.id))
        .await
        .unwrap();

    assert_eq!(
        ScreeningRepo::count_active_by_auditorium(&pool, auditorium.id)
            .await
            .unwrap(),
        1
    );
    assert_eq!(
        ScreeningRepo::count_active_by_movie(&pool, movie.id)
            .await
            .unwrap(),
        1
    );

    ScreeningRepo::deactivate(&pool, screening.id).await.unwrap();

    assert_eq!(
        ScreeningRepo::count_active_by_auditorium(&pool, auditorium.id)
            .await
            .unwrap(),
        0
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_user_roles_are_seeded_and_usable(pool: PgPool) {
    let role = RoleRepo::find_by_name(&pool, "user").await.unwrap().unwrap();

    let user = UserRepo::create(
        &pool,
        &CreateUser {
            username: "alice".to_string(),
            email: "alice@example.com".to_string(),
            password_hash: "$argon2id$fake".to_string(),
            role_id: role.id,
        },
    )
    .await
    .unwrap();

    let found = UserRepo::find_by_username(&pool, "alice")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(found.id, user.id);
    assert_eq!(found.failed_login_count, 0);
    assert_eq!(UserRepo::count(&pool).await.unwrap(), 1);

    assert_eq!(
        RoleRepo::resolve_name(&pool, role.id).await.unwrap(),
        "user"
    );

    // Duplicate usernames hit uq_users_username.
    let err = UserRepo::create(
        &pool,
        &CreateUser {
            username: "alice".to_string(),
            email: "alice2@example.com".to_string(),
            password_hash: "$argon2id$fake".to_string(),
            role_id: role.id,
        },
    )
    .await
    .unwrap_err();
    assert_eq!(
        err.as_database_error().and_then(|e| e.constraint()),
        Some("uq_users_username")
    );
}
