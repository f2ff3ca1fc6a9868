//! Handlers for the `/movies` resource.
//!
//! Reads are open to any authenticated user; writes require the admin role.
//! Deletion is a soft delete guarded against active screenings.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use kinoplex_core::error::CoreError;
use kinoplex_core::movie as rules;
use kinoplex_core::types::DbId;
use kinoplex_db::models::movie::{CreateMovie, Movie, UpdateMovie};
use kinoplex_db::repositories::{MovieRepo, ScreeningRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireAdmin;
use crate::state::AppState;

/// POST /api/v1/movies
pub async fn create(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Json(mut input): Json<CreateMovie>,
) -> AppResult<(StatusCode, Json<Movie>)> {
    input.title = rules::validate_text("Title", &input.title)?;
    input.description = rules::validate_text("Description", &input.description)?;
    input.genre = rules::validate_text("Genre", &input.genre)?;
    input.director = rules::validate_text("Director", &input.director)?;
    rules::validate_duration(input.duration_minutes)?;
    rules::validate_ticket_price(input.ticket_price)?;

    let movie = MovieRepo::create(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(movie)))
}

/// GET /api/v1/movies
pub async fn list(
    State(state): State<AppState>,
    _user: AuthUser,
) -> AppResult<Json<Vec<Movie>>> {
    let movies = MovieRepo::list(&state.pool).await?;
    Ok(Json(movies))
}

/// GET /api/v1/movies/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<Movie>> {
    let movie = MovieRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Movie", id }))?;
    Ok(Json(movie))
}

/// PUT /api/v1/movies/{id}
///
/// Supplied fields must pass the same validation as on create; a blank or
/// non-positive value is rejected, not ignored.
pub async fn update(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
    Json(mut input): Json<UpdateMovie>,
) -> AppResult<Json<Movie>> {
    if let Some(title) = &input.title {
        input.title = Some(rules::validate_text("Title", title)?);
    }
    if let Some(description) = &input.description {
        input.description = Some(rules::validate_text("Description", description)?);
    }
    if let Some(genre) = &input.genre {
        input.genre = Some(rules::validate_text("Genre", genre)?);
    }
    if let Some(director) = &input.director {
        input.director = Some(rules::validate_text("Director", director)?);
    }
    if let Some(duration) = input.duration_minutes {
        rules::validate_duration(duration)?;
    }
    if let Some(price) = input.ticket_price {
        rules::validate_ticket_price(price)?;
    }

    let movie = MovieRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Movie", id }))?;
    Ok(Json(movie))
}

/// DELETE /api/v1/movies/{id}
///
/// Soft delete. Refused while the movie still has active screenings.
pub async fn delete(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let active_screenings = ScreeningRepo::count_active_by_movie(&state.pool, id).await?;
    if active_screenings > 0 {
        return Err(AppError::Core(CoreError::Conflict(
            "Cannot delete movie with active screenings".into(),
        )));
    }

    let deactivated = MovieRepo::deactivate(&state.pool, id).await?;
    if deactivated {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound { entity: "Movie", id }))
    }
}
