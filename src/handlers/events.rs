use axum::extract::{Path, State};
use axum::http::header;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::event::Event;
use crate::services::qr;
use crate::state::AppState;
use crate::utils::error::AppError;
use crate::utils::response::{no_content, success};

#[derive(Debug, Deserialize)]
pub struct RsvpRequest {
    pub user_id: Uuid,
}

#[derive(Debug, Serialize)]
struct RsvpConfirmation {
    event_id: Uuid,
    rsvp_count: i32,
}

pub async fn list_events(State(state): State<AppState>) -> Result<Response, AppError> {
    let events = sqlx::query_as::<_, Event>("SELECT * FROM events ORDER BY date")
        .fetch_all(&state.pool)
        .await?;

    Ok(success(events, "Events retrieved").into_response())
}

/// Records an RSVP and bumps the event counter in one transaction, so the
/// count can never drift from the RSVP rows.
pub async fn rsvp(
    State(state): State<AppState>,
    Path(event_id): Path<Uuid>,
    Json(payload): Json<RsvpRequest>,
) -> Result<Response, AppError> {
    let mut tx = state.pool.begin().await?;

    let exists = sqlx::query_scalar::<_, i32>("SELECT 1 FROM events WHERE id = $1")
        .bind(event_id)
        .fetch_optional(&mut *tx)
        .await?;
    if exists.is_none() {
        return Err(AppError::NotFound(format!(
            "Event with id '{event_id}' was not found"
        )));
    }

    sqlx::query("INSERT INTO rsvps (id, user_id, event_id) VALUES ($1, $2, $3)")
        .bind(Uuid::new_v4())
        .bind(payload.user_id)
        .bind(event_id)
        .execute(&mut *tx)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(db) if db.is_unique_violation() => AppError::ValidationError(
                "User has already RSVP'd to this event".to_string(),
            ),
            sqlx::Error::Database(db) if db.is_foreign_key_violation() => AppError::NotFound(
                format!("User with id '{}' was not found", payload.user_id),
            ),
            other => AppError::DatabaseError(other),
        })?;

    let rsvp_count = sqlx::query_scalar::<_, i32>(
        "UPDATE events SET rsvp_count = rsvp_count + 1 WHERE id = $1 RETURNING rsvp_count",
    )
    .bind(event_id)
    .fetch_one(&mut *tx)
    .await?;

    tx.commit().await?;

    Ok(success(
        RsvpConfirmation {
            event_id,
            rsvp_count,
        },
        "RSVP recorded",
    )
    .into_response())
}

pub async fn event_qrcode(
    State(state): State<AppState>,
    Path(event_id): Path<Uuid>,
) -> Result<Response, AppError> {
    let event = sqlx::query_as::<_, Event>("SELECT * FROM events WHERE id = $1")
        .bind(event_id)
        .fetch_optional(&state.pool)
        .await?
        .ok_or_else(|| {
            AppError::NotFound(format!("Event with id '{event_id}' was not found"))
        })?;

    let png = qr::ticket_png(&event)?;

    Ok(([(header::CONTENT_TYPE, "image/png")], png).into_response())
}

pub async fn delete_event(
    State(state): State<AppState>,
    Path(event_id): Path<Uuid>,
) -> Result<Response, AppError> {
    let result = sqlx::query("DELETE FROM events WHERE id = $1")
        .bind(event_id)
        .execute(&state.pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound(format!(
            "Event with id '{event_id}' was not found"
        )));
    }

    tracing::info!(%event_id, "Event deleted");
    Ok(no_content().into_response())
}
