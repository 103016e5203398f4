use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

/// A user's confirmed attendance, exposed read-only as the event it
/// points at.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct RsvpEntry {
    pub id: Uuid,
    pub title: String,
    pub date: DateTime<Utc>,
}
