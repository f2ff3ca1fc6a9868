pub mod admin;
pub mod auditoriums;
pub mod auth;
pub mod bookings;
pub mod health;
pub mod movies;
pub mod payments;
pub mod screenings;
pub mod seats;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/login                         login (public)
/// /auth/refresh                       refresh (public)
/// /auth/logout                        logout (requires auth)
/// /auth/me                            current user (requires auth)
///
/// /admin/users                        list, create (admin only)
/// /admin/users/{id}                   deactivate (admin only)
///
/// /movies                             list, create
/// /movies/{id}                        get, update, delete
///
/// /auditoriums                        list, create
/// /auditoriums/{id}                   get, update, delete
/// /auditoriums/{auditorium_id}/seats  list, create
///
/// /seats/{id}                         get, delete
///
/// /screenings                         list, create
/// /screenings/{id}                    get, update, delete
/// /screenings/{id}/seats              seat map with derived availability
///
/// /bookings                           my bookings, create
/// /bookings/{id}                      get (owner or admin)
/// /bookings/{id}/confirm              confirm (owner or admin)
/// /bookings/{id}/cancel               cancel (owner or admin)
///
/// /payments                           create (owner only)
/// /payments/{id}                      get (owner or admin)
/// /payments/booking/{booking_id}      payments of a booking
/// ```
///
/// Catalog writes are admin-only; catalog reads and the whole booking /
/// payment surface require any authenticated user.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Authentication (login, refresh, logout, me).
        .nest("/auth", auth::router())
        // Admin user management.
        .nest("/admin/users", admin::router())
        // Movie catalog.
        .nest("/movies", movies::router())
        // Auditoriums (also nests their seats).
        .nest("/auditoriums", auditoriums::router())
        // Individual seats.
        .nest("/seats", seats::router())
        // Screenings and their derived seat map.
        .nest("/screenings", screenings::router())
        // Booking lifecycle.
        .nest("/bookings", bookings::router())
        // Payments.
        .nest("/payments", payments::router())
}
