use crate::models::Like;
use sqlx::PgPool;

pub async fn find_like(
    pool: &PgPool,
    user_id: i64,
    post_id: i64,
) -> Result<Option<Like>, sqlx::Error> {
    sqlx::query_as::<_, Like>(
        "SELECT id, user_id, post_id FROM likes WHERE user_id = $1 AND post_id = $2",
    )
    .bind(user_id)
    .bind(post_id)
    .fetch_optional(pool)
    .await
}

/// Create a like; a no-op when it already exists
pub async fn create_like(pool: &PgPool, user_id: i64, post_id: i64) -> Result<bool, sqlx::Error> {
    let result = sqlx::query(
        r#"
        INSERT INTO likes (user_id, post_id)
        VALUES ($1, $2)
        ON CONFLICT (user_id, post_id) DO NOTHING
        "#,
    )
    .bind(user_id)
    .bind(post_id)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}

/// Delete a like; returns whether one existed
pub async fn delete_like(pool: &PgPool, user_id: i64, post_id: i64) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM likes WHERE user_id = $1 AND post_id = $2")
        .bind(user_id)
        .bind(post_id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}

/// Like the post if not yet liked, otherwise remove the like.
/// Returns `true` when the post is liked afterwards.
pub async fn toggle_like(pool: &PgPool, user_id: i64, post_id: i64) -> Result<bool, sqlx::Error> {
    if delete_like(pool, user_id, post_id).await? {
        return Ok(false);
    }
    create_like(pool, user_id, post_id).await?;
    Ok(true)
}

pub async fn count_for_post(pool: &PgPool, post_id: i64) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar("SELECT COUNT(*) FROM likes WHERE post_id = $1")
        .bind(post_id)
        .fetch_one(pool)
        .await
}
