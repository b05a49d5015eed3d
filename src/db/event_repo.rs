use crate::models::{Event, EventView, NewEvent};
use sqlx::PgPool;

const EVENT_VIEW_SELECT: &str = r#"
    SELECT e.id, e.title, e.description, e.start_date, e.end_date, e.timestamp,
           e.organizer_id, u.username AS organizer_username,
           e.location_id, l.name AS location_name,
           e.category_id, c.name AS category_name
    FROM events e
    JOIN users u ON u.id = e.organizer_id
    JOIN locations l ON l.id = e.location_id
    JOIN categories c ON c.id = e.category_id
"#;

/// Create a new event organized by `organizer_id`
pub async fn create_event(
    pool: &PgPool,
    organizer_id: i64,
    event: &NewEvent,
) -> Result<Event, sqlx::Error> {
    sqlx::query_as::<_, Event>(
        r#"
        INSERT INTO events (title, description, start_date, end_date, organizer_id, location_id, category_id)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        RETURNING id, title, description, start_date, end_date, timestamp, organizer_id, location_id, category_id
        "#,
    )
    .bind(&event.title)
    .bind(&event.description)
    .bind(event.start_date)
    .bind(event.end_date)
    .bind(organizer_id)
    .bind(event.location_id)
    .bind(event.category_id)
    .fetch_one(pool)
    .await
}

pub async fn get_event(pool: &PgPool, event_id: i64) -> Result<Option<EventView>, sqlx::Error> {
    sqlx::query_as::<_, EventView>(&format!("{EVENT_VIEW_SELECT} WHERE e.id = $1"))
        .bind(event_id)
        .fetch_optional(pool)
        .await
}

/// All events, soonest first
pub async fn list_upcoming(pool: &PgPool) -> Result<Vec<EventView>, sqlx::Error> {
    sqlx::query_as::<_, EventView>(&format!("{EVENT_VIEW_SELECT} ORDER BY e.start_date ASC, e.id ASC"))
        .fetch_all(pool)
        .await
}

pub async fn list_by_organizer(
    pool: &PgPool,
    organizer_id: i64,
) -> Result<Vec<EventView>, sqlx::Error> {
    sqlx::query_as::<_, EventView>(&format!(
        "{EVENT_VIEW_SELECT} WHERE e.organizer_id = $1 ORDER BY e.start_date ASC, e.id ASC"
    ))
    .bind(organizer_id)
    .fetch_all(pool)
    .await
}
