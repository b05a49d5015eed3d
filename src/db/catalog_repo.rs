/// Categories and locations offered when creating events
use crate::models::{Category, Location};
use sqlx::PgPool;

pub const DEFAULT_CATEGORIES: &[&str] = &[
    "Wedding",
    "Burial",
    "Graduation",
    "Birthday Party",
    "Community Gathering",
];

pub const DEFAULT_LOCATIONS: &[&str] = &["Town Hall", "Community Center", "Park", "Library"];

pub async fn list_categories(pool: &PgPool) -> Result<Vec<Category>, sqlx::Error> {
    sqlx::query_as::<_, Category>("SELECT id, name FROM categories ORDER BY id")
        .fetch_all(pool)
        .await
}

pub async fn list_locations(pool: &PgPool) -> Result<Vec<Location>, sqlx::Error> {
    sqlx::query_as::<_, Location>("SELECT id, name FROM locations ORDER BY id")
        .fetch_all(pool)
        .await
}

/// Seed categories and locations when their tables are empty.
/// Returns how many (categories, locations) rows were inserted.
pub async fn seed_reference_data(pool: &PgPool) -> Result<(usize, usize), sqlx::Error> {
    let mut tx = pool.begin().await?;

    let categories = seed_table(&mut tx, "categories", DEFAULT_CATEGORIES).await?;
    let locations = seed_table(&mut tx, "locations", DEFAULT_LOCATIONS).await?;

    tx.commit().await?;

    if categories + locations > 0 {
        tracing::info!(categories, locations, "seeded reference data");
    }

    Ok((categories, locations))
}

async fn seed_table(
    tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
    table: &str,
    names: &[&str],
) -> Result<usize, sqlx::Error> {
    let count: i64 = sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {table}"))
        .fetch_one(&mut **tx)
        .await?;

    if count > 0 {
        return Ok(0);
    }

    for name in names {
        sqlx::query(&format!("INSERT INTO {table} (name) VALUES ($1)"))
            .bind(name)
            .execute(&mut **tx)
            .await?;
    }

    Ok(names.len())
}
