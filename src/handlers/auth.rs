use axum::extract::{Query, State};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Deserialize;
use uuid::Uuid;

use crate::models::rsvp::RsvpEntry;
use crate::models::user::User;
use crate::state::AppState;
use crate::utils::error::AppError;
use crate::utils::password::{hash_password, verify_password};
use crate::utils::response::{created, success};
use crate::utils::validate::{require, require_email};

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub password: String,
    pub email: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct UserQuery {
    pub username: String,
}

pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> Result<Response, AppError> {
    require(&payload.username, "username")?;
    require(&payload.password, "password")?;
    require_email(&payload.email)?;

    let password_hash = hash_password(&payload.password)?;

    let user = sqlx::query_as::<_, User>(
        "INSERT INTO users (id, username, password_hash, email) \
         VALUES ($1, $2, $3, $4) RETURNING *",
    )
    .bind(Uuid::new_v4())
    .bind(payload.username.trim())
    .bind(&password_hash)
    .bind(payload.email.trim())
    .fetch_one(&state.pool)
    .await
    .map_err(|e| AppError::or_duplicate(e, "Username or email is already registered"))?;

    Ok(created(user, "Registration successful").into_response())
}

pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Response, AppError> {
    require(&payload.username, "username")?;
    require(&payload.password, "password")?;

    let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE username = $1")
        .bind(payload.username.trim())
        .fetch_optional(&state.pool)
        .await?
        .ok_or_else(|| AppError::AuthError("Invalid username or password".to_string()))?;

    if !verify_password(&payload.password, &user.password_hash)? {
        return Err(AppError::AuthError(
            "Invalid username or password".to_string(),
        ));
    }

    Ok(success(user, "Login successful").into_response())
}

pub async fn get_user(
    State(state): State<AppState>,
    Query(query): Query<UserQuery>,
) -> Result<Response, AppError> {
    require(&query.username, "username")?;

    let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE username = $1")
        .bind(query.username.trim())
        .fetch_optional(&state.pool)
        .await?
        .ok_or_else(|| {
            AppError::NotFound(format!("User '{}' was not found", query.username.trim()))
        })?;

    Ok(success(user, "User retrieved").into_response())
}

pub async fn list_rsvps(
    State(state): State<AppState>,
    Query(query): Query<UserQuery>,
) -> Result<Response, AppError> {
    require(&query.username, "username")?;

    let user_id = sqlx::query_scalar::<_, Uuid>("SELECT id FROM users WHERE username = $1")
        .bind(query.username.trim())
        .fetch_optional(&state.pool)
        .await?
        .ok_or_else(|| {
            AppError::NotFound(format!("User '{}' was not found", query.username.trim()))
        })?;

    let entries = sqlx::query_as::<_, RsvpEntry>(
        "SELECT e.id, e.title, e.date FROM rsvps r \
         JOIN events e ON e.id = r.event_id \
         WHERE r.user_id = $1 \
         ORDER BY e.date",
    )
    .bind(user_id)
    .fetch_all(&state.pool)
    .await?;

    Ok(success(entries, "RSVPs retrieved").into_response())
}
