/// Session extraction for handlers.
/// `CurrentUser` enforces login; `MaybeUser` only looks.
use actix_web::{dev::Payload, web, FromRequest, HttpRequest};
use futures::future::LocalBoxFuture;

use crate::db::user_repo;
use crate::error::AppError;
use crate::models::User;
use crate::security::validate_session;
use crate::utils::login_url;
use crate::AppState;

/// Authenticated user loaded from the session
#[derive(Debug, Clone)]
pub struct CurrentUser(pub User);

/// User if a valid session is present
#[derive(Debug, Clone)]
pub struct MaybeUser(pub Option<User>);

/// Session token from the cookie, or a Bearer token for API clients.
fn session_token(req: &HttpRequest, cookie_name: &str) -> Option<String> {
    if let Some(cookie) = req.cookie(cookie_name) {
        return Some(cookie.value().to_string());
    }

    req.headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .map(|t| t.to_string())
}

async fn load_user(req: HttpRequest) -> Result<Option<User>, AppError> {
    let state = req
        .app_data::<web::Data<AppState>>()
        .ok_or_else(|| AppError::Internal("application state not configured".into()))?;

    let Some(token) = session_token(&req, &state.config.session.cookie_name) else {
        return Ok(None);
    };

    let user_id = match validate_session(&token, &state.config.session) {
        Ok(data) => data.claims.user_id(),
        Err(e) => {
            tracing::debug!("Session validation failed: {}", e);
            None
        }
    };

    match user_id {
        Some(id) => Ok(user_repo::find_by_id(&state.db, id).await?),
        None => Ok(None),
    }
}

impl FromRequest for CurrentUser {
    type Error = AppError;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let req = req.clone();
        Box::pin(async move {
            let target = req
                .uri()
                .path_and_query()
                .map(|pq| pq.as_str().to_string())
                .unwrap_or_else(|| req.path().to_string());

            match load_user(req).await? {
                Some(user) => Ok(CurrentUser(user)),
                None => Err(AppError::Authentication {
                    login_url: login_url(&target),
                }),
            }
        })
    }
}

impl FromRequest for MaybeUser {
    type Error = AppError;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let req = req.clone();
        Box::pin(async move { Ok(MaybeUser(load_user(req).await?)) })
    }
}
