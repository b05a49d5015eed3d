use actix_web::{http::StatusCode, web, HttpResponse};
use serde::{Deserialize, Serialize};

use super::{redirect, render, see_other};
use crate::db::user_repo;
use crate::error::{AppError, Result};
use crate::flash::Flashes;
use crate::forms::{LoginForm, RegistrationForm};
use crate::middleware::{CurrentUser, MaybeUser};
use crate::security::{
    clear_session_cookie, hash_password, issue_session, session_cookie, verify_password,
};
use crate::utils::safe_next_url;
use crate::AppState;

#[derive(Serialize)]
struct FormPage {
    form: &'static str,
    fields: &'static [&'static str],
}

const REGISTER_PAGE: FormPage = FormPage {
    form: "register",
    fields: &["username", "email", "password", "confirm_password"],
};

const LOGIN_PAGE: FormPage = FormPage {
    form: "login",
    fields: &["email", "password"],
};

#[derive(Debug, Deserialize)]
pub struct NextQuery {
    pub next: Option<String>,
}

/// GET /register
pub async fn register_form(flashes: Flashes) -> HttpResponse {
    render(StatusCode::OK, flashes, REGISTER_PAGE)
}

/// POST /register
pub async fn register(
    state: web::Data<AppState>,
    mut flashes: Flashes,
    form: web::Form<RegistrationForm>,
) -> Result<HttpResponse> {
    let form = form.into_inner().normalized();
    form.check()?;

    let username_taken = user_repo::username_exists(&state.db, &form.username).await?;
    let email_taken = user_repo::email_exists(&state.db, &form.email).await?;
    RegistrationForm::uniqueness_errors(username_taken, email_taken).into_result()?;

    let password_hash = hash_password(&form.password)?;
    let user = user_repo::create_user(&state.db, &form.username, &form.email, &password_hash)
        .await
        .map_err(unique_violation_to_field_error)?;

    tracing::info!(user_id = user.id, "user registered");

    flashes.success("Account created! You can now log in.");
    Ok(redirect("/login", &flashes))
}

/// A concurrent registration can win the race between the existence checks and the insert.
fn unique_violation_to_field_error(error: sqlx::Error) -> AppError {
    if let sqlx::Error::Database(db_error) = &error {
        if db_error.is_unique_violation() {
            let constraint = db_error.constraint().unwrap_or_default();
            let errors = RegistrationForm::uniqueness_errors(
                constraint.contains("username"),
                constraint.contains("email"),
            );
            if !errors.is_empty() {
                return AppError::Validation(errors);
            }
        }
    }
    AppError::Database(error)
}

/// GET /login
pub async fn login_form(MaybeUser(user): MaybeUser, flashes: Flashes) -> HttpResponse {
    if user.is_some() {
        return redirect("/", &flashes);
    }
    render(StatusCode::OK, flashes, LOGIN_PAGE)
}

/// POST /login
pub async fn login(
    state: web::Data<AppState>,
    MaybeUser(current): MaybeUser,
    mut flashes: Flashes,
    query: web::Query<NextQuery>,
    form: web::Form<LoginForm>,
) -> Result<HttpResponse> {
    if current.is_some() {
        return Ok(redirect("/", &flashes));
    }

    let form = form.into_inner().normalized();
    form.check()?;

    let user = user_repo::find_by_email(&state.db, &form.email).await?;
    let authenticated = match &user {
        Some(user) => verify_password(&form.password, &user.password_hash)?,
        None => false,
    };

    let user = match user {
        Some(user) if authenticated => user,
        _ => {
            tracing::debug!("login rejected");
            flashes.danger("Login unsuccessful. Please check email and password.");
            return Ok(render(StatusCode::UNAUTHORIZED, flashes, LOGIN_PAGE));
        }
    };

    let token = issue_session(&user, &state.config.session)?;
    tracing::info!(user_id = user.id, "user logged in");

    flashes.success("Login successful!");
    let target = safe_next_url(query.next.as_deref()).unwrap_or_else(|| "/".to_string());

    Ok(see_other(&target, &flashes)
        .cookie(session_cookie(token, &state.config.session))
        .finish())
}

/// GET /logout
pub async fn logout(
    state: web::Data<AppState>,
    CurrentUser(user): CurrentUser,
    mut flashes: Flashes,
) -> HttpResponse {
    tracing::info!(user_id = user.id, "user logged out");

    flashes.info("You have been logged out.");
    see_other("/", &flashes)
        .cookie(clear_session_cookie(&state.config.session))
        .finish()
}
