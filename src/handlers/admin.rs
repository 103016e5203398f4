use axum::extract::multipart::Field;
use axum::extract::{Multipart, State};
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use std::str::FromStr;
use uuid::Uuid;

use crate::handlers::auth::{LoginRequest, RegisterRequest};
use crate::models::admin::Admin;
use crate::models::event::Event;
use crate::services::images;
use crate::state::AppState;
use crate::utils::error::AppError;
use crate::utils::password::{hash_password, verify_password};
use crate::utils::response::{created, success};
use crate::utils::validate::{require, require_email};

pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> Result<Response, AppError> {
    require(&payload.username, "username")?;
    require(&payload.password, "password")?;
    require_email(&payload.email)?;

    let password_hash = hash_password(&payload.password)?;

    let admin = sqlx::query_as::<_, Admin>(
        "INSERT INTO admins (id, username, password_hash, email) \
         VALUES ($1, $2, $3, $4) RETURNING *",
    )
    .bind(Uuid::new_v4())
    .bind(payload.username.trim())
    .bind(&password_hash)
    .bind(payload.email.trim())
    .fetch_one(&state.pool)
    .await
    .map_err(|e| AppError::or_duplicate(e, "Username or email is already registered"))?;

    Ok(created(admin, "Admin registration successful").into_response())
}

pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Response, AppError> {
    require(&payload.username, "username")?;
    require(&payload.password, "password")?;

    let admin = sqlx::query_as::<_, Admin>("SELECT * FROM admins WHERE username = $1")
        .bind(payload.username.trim())
        .fetch_optional(&state.pool)
        .await?
        .ok_or_else(|| AppError::AuthError("Invalid username or password".to_string()))?;

    if !verify_password(&payload.password, &admin.password_hash)? {
        return Err(AppError::AuthError(
            "Invalid username or password".to_string(),
        ));
    }

    Ok(success(admin, "Login successful").into_response())
}

/// Multipart fields collected from an upload-event request before any of
/// them are acted on.
#[derive(Default)]
struct EventDraft {
    title: Option<String>,
    description: Option<String>,
    date: Option<DateTime<Utc>>,
    location: Option<String>,
    price: Option<Decimal>,
    image: Option<PosterUpload>,
}

struct PosterUpload {
    file_name: String,
    content_type: String,
    bytes: Vec<u8>,
}

pub async fn upload_event(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Response, AppError> {
    let mut draft = EventDraft::default();

    while let Some(field) = multipart.next_field().await.map_err(|e| {
        AppError::ValidationError(format!("Malformed multipart request: {e}"))
    })? {
        let Some(name) = field.name().map(str::to_string) else {
            continue;
        };

        match name.as_str() {
            "image" => draft.image = Some(read_poster(field).await?),
            "title" => draft.title = Some(text(field).await?),
            "description" => draft.description = Some(text(field).await?),
            "date" => draft.date = Some(parse_date(&text(field).await?)?),
            "location" => draft.location = Some(text(field).await?),
            "price" => draft.price = Some(parse_price(&text(field).await?)?),
            _ => {}
        }
    }

    let title = required_field(draft.title, "title")?;
    let location = required_field(draft.location, "location")?;
    let date = draft
        .date
        .ok_or_else(|| AppError::ValidationError("date is required".to_string()))?;
    let price = draft
        .price
        .ok_or_else(|| AppError::ValidationError("price is required".to_string()))?;
    let poster = draft
        .image
        .ok_or_else(|| AppError::ValidationError("image is required".to_string()))?;

    let description = draft
        .description
        .map(|d| d.trim().to_string())
        .filter(|d| !d.is_empty());

    let image_url = images::upload_poster(
        &state.http,
        &state.config,
        poster.file_name,
        &poster.content_type,
        poster.bytes,
    )
    .await?;

    let event = sqlx::query_as::<_, Event>(
        "INSERT INTO events (id, title, description, date, location, image_url, price) \
         VALUES ($1, $2, $3, $4, $5, $6, $7) RETURNING *",
    )
    .bind(Uuid::new_v4())
    .bind(title)
    .bind(description)
    .bind(date)
    .bind(location)
    .bind(image_url)
    .bind(price)
    .fetch_one(&state.pool)
    .await?;

    tracing::info!(event_id = %event.id, "Event created");
    Ok(created(event, "Event created").into_response())
}

async fn read_poster(field: Field<'_>) -> Result<PosterUpload, AppError> {
    let file_name = field.file_name().unwrap_or("poster").to_string();
    let content_type = field
        .content_type()
        .unwrap_or("application/octet-stream")
        .to_string();

    if !content_type.starts_with("image/") {
        return Err(AppError::ValidationError(
            "image must be an image file".to_string(),
        ));
    }

    let bytes = field
        .bytes()
        .await
        .map_err(|e| AppError::ValidationError(format!("Failed to read image: {e}")))?;

    if bytes.is_empty() {
        return Err(AppError::ValidationError("image is empty".to_string()));
    }

    Ok(PosterUpload {
        file_name,
        content_type,
        bytes: bytes.to_vec(),
    })
}

async fn text(field: Field<'_>) -> Result<String, AppError> {
    field
        .text()
        .await
        .map_err(|e| AppError::ValidationError(format!("Malformed multipart request: {e}")))
}

fn required_field(value: Option<String>, field: &'static str) -> Result<String, AppError> {
    let value = value.unwrap_or_default();
    require(&value, field)?;
    Ok(value.trim().to_string())
}

fn parse_date(raw: &str) -> Result<DateTime<Utc>, AppError> {
    DateTime::parse_from_rfc3339(raw.trim())
        .map(|d| d.with_timezone(&Utc))
        .map_err(|_| AppError::ValidationError("date must be an RFC 3339 timestamp".to_string()))
}

fn parse_price(raw: &str) -> Result<Decimal, AppError> {
    let price = Decimal::from_str(raw.trim())
        .map_err(|_| AppError::ValidationError("price must be a decimal number".to_string()))?;

    if price.is_sign_negative() {
        return Err(AppError::ValidationError(
            "price must not be negative".to_string(),
        ));
    }
    Ok(price)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dates_must_be_rfc3339() {
        assert!(parse_date("2026-09-01T19:00:00Z").is_ok());
        assert!(parse_date(" 2026-09-01T19:00:00+02:00 ").is_ok());
        assert!(parse_date("next friday").is_err());
        assert!(parse_date("2026-09-01").is_err());
    }

    #[test]
    fn prices_parse_and_reject_negatives() {
        assert_eq!(parse_price("25.00").unwrap(), Decimal::new(2500, 2));
        assert_eq!(parse_price("0").unwrap(), Decimal::ZERO);
        assert!(parse_price("-1").is_err());
        assert!(parse_price("free").is_err());
    }

    #[test]
    fn required_fields_reject_blank_text() {
        assert_eq!(
            required_field(Some(" Launch ".to_string()), "title").unwrap(),
            "Launch"
        );
        assert!(required_field(Some("  ".to_string()), "title").is_err());
        assert!(required_field(None, "title").is_err());
    }
}
