use axum::extract::State;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Deserialize;
use uuid::Uuid;

use crate::models::event::Event;
use crate::state::AppState;
use crate::utils::error::AppError;
use crate::utils::response::empty_success;
use crate::utils::validate::require_email;

#[derive(Debug, Deserialize)]
pub struct PayRequest {
    pub email: String,
    pub event_id: Uuid,
}

/// Confirms a payment by emailing the payer. Nothing is persisted; the
/// mail relay is the only side effect.
pub async fn pay(
    State(state): State<AppState>,
    Json(payload): Json<PayRequest>,
) -> Result<Response, AppError> {
    require_email(&payload.email)?;

    let event = sqlx::query_as::<_, Event>("SELECT * FROM events WHERE id = $1")
        .bind(payload.event_id)
        .fetch_optional(&state.pool)
        .await?
        .ok_or_else(|| {
            AppError::NotFound(format!(
                "Event with id '{}' was not found",
                payload.event_id
            ))
        })?;

    state
        .mailer
        .send_payment_confirmation(payload.email.trim(), &event)
        .await?;

    Ok(empty_success("Payment confirmed, a confirmation email is on its way").into_response())
}
