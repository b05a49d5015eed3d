use actix_web::{http::StatusCode, web, HttpResponse};
use serde::{Deserialize, Serialize};

use super::{redirect, render};
use crate::db::{comment_repo, like_repo, post_repo};
use crate::error::{AppError, Result};
use crate::flash::Flashes;
use crate::forms::{CommentForm, PostForm};
use crate::middleware::CurrentUser;
use crate::models::{CommentView, Pagination, PostView};
use crate::AppState;

pub const PER_PAGE: i64 = 5;

#[derive(Debug, Deserialize)]
pub struct FeedQuery {
    pub page: Option<String>,
}

impl FeedQuery {
    /// Unparseable or missing values fall back to the first page.
    pub fn page(&self) -> i64 {
        self.page
            .as_deref()
            .and_then(|p| p.trim().parse().ok())
            .unwrap_or(1)
    }
}

#[derive(Serialize)]
struct FeedPage {
    posts: Vec<PostView>,
    pagination: Pagination,
}

#[derive(Serialize)]
struct PostPage {
    post: PostView,
    comments: Vec<CommentView>,
}

/// GET /posts?page=N
pub async fn feed(
    state: web::Data<AppState>,
    CurrentUser(user): CurrentUser,
    flashes: Flashes,
    query: web::Query<FeedQuery>,
) -> Result<HttpResponse> {
    let page = query.page();
    let total = post_repo::count_posts(&state.db).await?;
    let pagination = Pagination::new(page, PER_PAGE, total);
    if pagination.is_out_of_range() {
        return Err(AppError::not_found("Page"));
    }

    let offset = Pagination::offset(page, PER_PAGE).ok_or_else(|| AppError::not_found("Page"))?;
    let posts = post_repo::list_page(&state.db, user.id, PER_PAGE, offset).await?;

    // Rows may have been deleted since the count
    if posts.is_empty() && page != 1 {
        return Err(AppError::not_found("Page"));
    }

    Ok(render(StatusCode::OK, flashes, FeedPage { posts, pagination }))
}

/// POST /posts
pub async fn create_post(
    state: web::Data<AppState>,
    CurrentUser(user): CurrentUser,
    mut flashes: Flashes,
    form: web::Form<PostForm>,
) -> Result<HttpResponse> {
    let content = form.clean()?;
    let post = post_repo::create_post(&state.db, user.id, &content).await?;

    tracing::info!(post_id = post.id, author_id = user.id, "post created");

    flashes.success("Post created successfully!");
    Ok(redirect("/posts", &flashes))
}

/// GET /post/{post_id}
pub async fn post_details(
    state: web::Data<AppState>,
    CurrentUser(user): CurrentUser,
    path: web::Path<i64>,
    flashes: Flashes,
) -> Result<HttpResponse> {
    let post_id = path.into_inner();
    let post = post_repo::get_post_view(&state.db, post_id, user.id)
        .await?
        .ok_or_else(|| AppError::not_found("Post"))?;
    let comments = comment_repo::list_for_post(&state.db, post_id).await?;

    Ok(render(StatusCode::OK, flashes, PostPage { post, comments }))
}

/// POST /post/{post_id}
pub async fn add_comment(
    state: web::Data<AppState>,
    CurrentUser(user): CurrentUser,
    path: web::Path<i64>,
    mut flashes: Flashes,
    form: web::Form<CommentForm>,
) -> Result<HttpResponse> {
    let post_id = path.into_inner();
    ensure_post_exists(&state, post_id).await?;

    let content = form.clean()?;
    let comment = comment_repo::create_comment(&state.db, post_id, user.id, &content).await?;
    tracing::debug!(comment_id = comment.id, post_id, "comment added");

    flashes.success("Comment added successfully!");
    Ok(redirect(&format!("/post/{}", post_id), &flashes))
}

/// POST /like/{post_id} - like, or unlike when already liked
pub async fn like_post(
    state: web::Data<AppState>,
    CurrentUser(user): CurrentUser,
    path: web::Path<i64>,
    mut flashes: Flashes,
) -> Result<HttpResponse> {
    let post_id = path.into_inner();
    ensure_post_exists(&state, post_id).await?;

    if like_repo::toggle_like(&state.db, user.id, post_id).await? {
        flashes.success("Post liked!");
    } else {
        flashes.info("Post unliked.");
    }

    Ok(redirect("/posts", &flashes))
}

/// POST /unlike/{post_id}
pub async fn unlike_post(
    state: web::Data<AppState>,
    CurrentUser(user): CurrentUser,
    path: web::Path<i64>,
    flashes: Flashes,
) -> Result<HttpResponse> {
    let post_id = path.into_inner();
    ensure_post_exists(&state, post_id).await?;

    like_repo::delete_like(&state.db, user.id, post_id).await?;

    Ok(redirect("/posts", &flashes))
}

/// POST /comment/{post_id} - inline comment from the feed
pub async fn comment_post(
    state: web::Data<AppState>,
    CurrentUser(user): CurrentUser,
    path: web::Path<i64>,
    mut flashes: Flashes,
    form: web::Form<CommentForm>,
) -> Result<HttpResponse> {
    let post_id = path.into_inner();
    ensure_post_exists(&state, post_id).await?;

    // Invalid input is dropped silently; the feed is shown again either way.
    if let Ok(content) = form.clean() {
        comment_repo::create_comment(&state.db, post_id, user.id, &content).await?;
        flashes.success("Comment added!");
    }

    Ok(redirect("/posts", &flashes))
}

async fn ensure_post_exists(state: &AppState, post_id: i64) -> Result<()> {
    post_repo::get_post(&state.db, post_id)
        .await?
        .map(|_| ())
        .ok_or_else(|| AppError::not_found("Post"))
}
