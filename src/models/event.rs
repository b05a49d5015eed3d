use chrono::{DateTime, NaiveDateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Event {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub start_date: NaiveDateTime,
    pub end_date: NaiveDateTime,
    pub timestamp: DateTime<Utc>,
    pub organizer_id: i64,
    pub location_id: i64,
    pub category_id: i64,
}

/// Event joined with the names of its organizer, location and category.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct EventView {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub start_date: NaiveDateTime,
    pub end_date: NaiveDateTime,
    pub timestamp: DateTime<Utc>,
    pub organizer_id: i64,
    pub organizer_username: String,
    pub location_id: i64,
    pub location_name: String,
    pub category_id: i64,
    pub category_name: String,
}

/// Validated event input; the organizer is supplied separately.
#[derive(Debug, Clone)]
pub struct NewEvent {
    pub title: String,
    pub description: String,
    pub start_date: NaiveDateTime,
    pub end_date: NaiveDateTime,
    pub location_id: i64,
    pub category_id: i64,
}
