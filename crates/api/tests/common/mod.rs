//! Shared helpers for HTTP-level integration tests.
//!
//! Mirrors the production router construction so tests exercise the same
//! middleware stack (CORS, request ID, timeout, tracing, panic recovery),
//! plus seeding helpers for users, tokens, and a minimal cinema catalog.

#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, Response};
use axum::Router;
use chrono::{Duration, Utc};
use http_body_util::BodyExt;
use rust_decimal::Decimal;
use sqlx::PgPool;
use tower::ServiceExt;

use kinoplex_api::auth::jwt::{generate_access_token, JwtConfig};
use kinoplex_api::auth::password::hash_password;
use kinoplex_api::config::ServerConfig;
use kinoplex_api::router::build_app_router;
use kinoplex_api::state::AppState;
use kinoplex_core::types::DbId;
use kinoplex_db::models::auditorium::CreateAuditorium;
use kinoplex_db::models::movie::CreateMovie;
use kinoplex_db::models::screening::CreateScreening;
use kinoplex_db::models::seat::CreateSeat;
use kinoplex_db::models::user::CreateUser;
use kinoplex_db::repositories::{
    AuditoriumRepo, MovieRepo, RoleRepo, ScreeningRepo, SeatRepo, UserRepo,
};

/// Build a test `ServerConfig` with a fixed JWT secret.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        jwt: JwtConfig {
            secret: "integration-test-secret-long-enough".to_string(),
            access_token_expiry_mins: 15,
            refresh_token_expiry_days: 7,
        },
    }
}

/// Build the full application router against the given pool.
pub fn build_test_app(pool: PgPool) -> Router {
    let config = test_config();
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
    };
    build_app_router(state, &config)
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

async fn send(
    app: Router,
    method: &str,
    path: &str,
    token: Option<&str>,
    body: Option<serde_json::Value>,
) -> Response<Body> {
    let mut builder = Request::builder().method(method).uri(path);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, path: &str, token: Option<&str>) -> Response<Body> {
    send(app, "GET", path, token, None).await
}

pub async fn post_json(
    app: Router,
    path: &str,
    token: Option<&str>,
    body: serde_json::Value,
) -> Response<Body> {
    send(app, "POST", path, token, Some(body)).await
}

pub async fn post_empty(app: Router, path: &str, token: Option<&str>) -> Response<Body> {
    send(app, "POST", path, token, None).await
}

pub async fn put_json(
    app: Router,
    path: &str,
    token: Option<&str>,
    body: serde_json::Value,
) -> Response<Body> {
    send(app, "PUT", path, token, Some(body)).await
}

pub async fn delete(app: Router, path: &str, token: Option<&str>) -> Response<Body> {
    send(app, "DELETE", path, token, None).await
}

/// Collect a response body as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

// ---------------------------------------------------------------------------
// Seeding helpers
// ---------------------------------------------------------------------------

/// Create a user with the given role name and return `(user_id, token)`.
pub async fn seed_user(pool: &PgPool, username: &str, role: &str) -> (DbId, String) {
    let role_row = RoleRepo::find_by_name(pool, role)
        .await
        .unwrap()
        .expect("role must be seeded");
    let user = UserRepo::create(
        pool,
        &CreateUser {
            username: username.to_string(),
            email: format!("{username}@example.com"),
            password_hash: hash_password("integration-test-password").unwrap(),
            role_id: role_row.id,
        },
    )
    .await
    .unwrap();

    let token = generate_access_token(user.id, role, &test_config().jwt).unwrap();
    (user.id, token)
}

/// A seeded catalog: one movie, one auditorium with three seats (A1, A2,
/// A3), and one active future screening priced 10.00.
pub struct Catalog {
    pub movie_id: DbId,
    pub auditorium_id: DbId,
    pub screening_id: DbId,
    pub seat_ids: Vec<DbId>,
}

pub async fn seed_catalog(pool: &PgPool) -> Catalog {
    let movie = MovieRepo::create(
        pool,
        &CreateMovie {
            title: "Arrival".to_string(),
            description: "First contact".to_string(),
            duration_minutes: 116,
            genre: "Sci-Fi".to_string(),
            director: "Denis Villeneuve".to_string(),
            release_date: chrono::NaiveDate::from_ymd_opt(2016, 11, 11).unwrap(),
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
            capacity: 50,
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

    Catalog {
        movie_id: movie.id,
        auditorium_id: auditorium.id,
        screening_id: screening.id,
        seat_ids,
    }
}

/// Force a booking's expiry deadline into the past.
pub async fn expire_booking(pool: &PgPool, booking_id: DbId) {
    sqlx::query("UPDATE bookings SET expires_at = NOW() - INTERVAL '1 minute' WHERE id = $1")
        .bind(booking_id)
        .execute(pool)
        .await
        .unwrap();
}
