use actix_web::{
    http::{header, StatusCode},
    web, HttpResponse, HttpResponseBuilder,
};
use serde::Serialize;

use crate::error::AppError;
use crate::flash::{self, FlashMessage, Flashes};

pub mod auth;
pub mod events;
pub mod health;
pub mod posts;
pub mod profile;

/// A rendered page: the flashes being shown plus the page data.
#[derive(Serialize)]
struct Page<T: Serialize> {
    flashes: Vec<FlashMessage>,
    #[serde(flatten)]
    data: T,
}

/// Respond with page data, consuming pending flash messages.
pub fn render<T: Serialize>(status: StatusCode, flashes: Flashes, data: T) -> HttpResponse {
    let (messages, had_cookie) = flashes.take();

    let mut builder = HttpResponse::build(status);
    if had_cookie {
        builder.cookie(flash::removal_cookie());
    }
    builder.json(Page {
        flashes: messages,
        data,
    })
}

/// `303 See Other` to `location`, carrying pending flash messages forward.
pub fn see_other(location: &str, flashes: &Flashes) -> HttpResponseBuilder {
    let mut builder = HttpResponse::SeeOther();
    builder.insert_header((header::LOCATION, location));
    if let Some(cookie) = flashes.to_cookie() {
        builder.cookie(cookie);
    }
    builder
}

pub fn redirect(location: &str, flashes: &Flashes) -> HttpResponse {
    see_other(location, flashes).finish()
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(
        web::FormConfig::default()
            .error_handler(|err, _req| AppError::BadRequest(err.to_string()).into()),
    )
    .route("/health", web::get().to(health::health_check))
    .route("/", web::get().to(events::home))
    .route("/event/{event_id}", web::get().to(events::event_details))
    .service(
        web::resource("/register")
            .route(web::get().to(auth::register_form))
            .route(web::post().to(auth::register)),
    )
    .service(
        web::resource("/login")
            .route(web::get().to(auth::login_form))
            .route(web::post().to(auth::login)),
    )
    .route("/logout", web::get().to(auth::logout))
    .service(
        web::resource("/create_event")
            .route(web::get().to(events::create_event_form))
            .route(web::post().to(events::create_event)),
    )
    .route("/profile", web::get().to(profile::profile))
    .service(
        web::resource("/profile/update")
            .route(web::get().to(profile::update_profile_form))
            .route(web::post().to(profile::update_profile)),
    )
    .service(
        web::resource("/posts")
            .route(web::get().to(posts::feed))
            .route(web::post().to(posts::create_post)),
    )
    .service(
        web::resource("/post/{post_id}")
            .route(web::get().to(posts::post_details))
            .route(web::post().to(posts::add_comment)),
    )
    .route("/like/{post_id}", web::post().to(posts::like_post))
    .route("/unlike/{post_id}", web::post().to(posts::unlike_post))
    .route("/comment/{post_id}", web::post().to(posts::comment_post));
}
