use crate::models::{Post, PostView};
use sqlx::PgPool;

/// `$1` is the viewing user, used for `liked_by_viewer`.
const POST_VIEW_SELECT: &str = r#"
    SELECT p.id, p.content, p.timestamp, p.author_id, u.username AS author_username, p.location_id,
           (SELECT COUNT(*) FROM likes l WHERE l.post_id = p.id) AS like_count,
           (SELECT COUNT(*) FROM comments c WHERE c.post_id = p.id) AS comment_count,
           EXISTS(SELECT 1 FROM likes l WHERE l.post_id = p.id AND l.user_id = $1) AS liked_by_viewer
    FROM posts p
    JOIN users u ON u.id = p.author_id
"#;

pub async fn create_post(pool: &PgPool, author_id: i64, content: &str) -> Result<Post, sqlx::Error> {
    sqlx::query_as::<_, Post>(
        r#"
        INSERT INTO posts (content, author_id)
        VALUES ($1, $2)
        RETURNING id, content, timestamp, author_id, location_id
        "#,
    )
    .bind(content)
    .bind(author_id)
    .fetch_one(pool)
    .await
}

pub async fn get_post(pool: &PgPool, post_id: i64) -> Result<Option<Post>, sqlx::Error> {
    sqlx::query_as::<_, Post>(
        "SELECT id, content, timestamp, author_id, location_id FROM posts WHERE id = $1",
    )
    .bind(post_id)
    .fetch_optional(pool)
    .await
}

pub async fn get_post_view(
    pool: &PgPool,
    post_id: i64,
    viewer_id: i64,
) -> Result<Option<PostView>, sqlx::Error> {
    sqlx::query_as::<_, PostView>(&format!("{POST_VIEW_SELECT} WHERE p.id = $2"))
        .bind(viewer_id)
        .bind(post_id)
        .fetch_optional(pool)
        .await
}

/// One page of the feed, newest first
pub async fn list_page(
    pool: &PgPool,
    viewer_id: i64,
    limit: i64,
    offset: i64,
) -> Result<Vec<PostView>, sqlx::Error> {
    sqlx::query_as::<_, PostView>(&format!(
        "{POST_VIEW_SELECT} ORDER BY p.timestamp DESC, p.id DESC LIMIT $2 OFFSET $3"
    ))
    .bind(viewer_id)
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await
}

pub async fn count_posts(pool: &PgPool) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar("SELECT COUNT(*) FROM posts")
        .fetch_one(pool)
        .await
}
