use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Post {
    pub id: i64,
    pub content: String,
    pub timestamp: DateTime<Utc>,
    pub author_id: i64,
    pub location_id: Option<i64>,
}

/// Post with its author and engagement as seen by one viewer.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct PostView {
    pub id: i64,
    pub content: String,
    pub timestamp: DateTime<Utc>,
    pub author_id: i64,
    pub author_username: String,
    pub location_id: Option<i64>,
    pub like_count: i64,
    pub comment_count: i64,
    pub liked_by_viewer: bool,
}

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Comment {
    pub id: i64,
    pub content: String,
    pub timestamp: DateTime<Utc>,
    pub post_id: i64,
    pub user_id: i64,
}

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct CommentView {
    pub id: i64,
    pub content: String,
    pub timestamp: DateTime<Utc>,
    pub post_id: i64,
    pub user_id: i64,
    pub author_username: String,
}

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Like {
    pub id: i64,
    pub user_id: i64,
    pub post_id: i64,
}

/// Offset pagination metadata for one page of a listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Pagination {
    pub page: i64,
    pub per_page: i64,
    pub total: i64,
    pub pages: i64,
    pub has_prev: bool,
    pub has_next: bool,
    pub prev_num: Option<i64>,
    pub next_num: Option<i64>,
}

impl Pagination {
    pub fn new(page: i64, per_page: i64, total: i64) -> Self {
        let pages = if per_page <= 0 || total <= 0 {
            0
        } else {
            (total + per_page - 1) / per_page
        };
        let has_prev = page > 1;
        let has_next = page < pages;

        Self {
            page,
            per_page,
            total,
            pages,
            has_prev,
            has_next,
            prev_num: has_prev.then(|| page - 1),
            next_num: has_next.then(|| page + 1),
        }
    }

    /// Pages below 1 or past the last one; page 1 exists even when empty.
    pub fn is_out_of_range(&self) -> bool {
        self.page < 1 || self.page > self.pages.max(1)
    }

    /// Rows to skip for `page` (1-based); `None` on overflow.
    pub fn offset(page: i64, per_page: i64) -> Option<i64> {
        (page.max(1) - 1).checked_mul(per_page)
    }
}
