use actix_web::{http::StatusCode, web, HttpResponse};
use serde::Serialize;

use super::{redirect, render};
use crate::db::{catalog_repo, event_repo};
use crate::error::{AppError, Result};
use crate::flash::Flashes;
use crate::forms::{EventForm, EVENT_DATETIME_FORMAT};
use crate::middleware::CurrentUser;
use crate::models::{Category, EventView, Location};
use crate::AppState;

#[derive(Serialize)]
struct HomePage {
    events: Vec<EventView>,
}

#[derive(Serialize)]
struct EventPage {
    event: EventView,
}

#[derive(Serialize)]
struct EventFormPage {
    locations: Vec<Location>,
    categories: Vec<Category>,
    date_format: &'static str,
}

/// GET / - every event, soonest first
pub async fn home(state: web::Data<AppState>, flashes: Flashes) -> Result<HttpResponse> {
    let events = event_repo::list_upcoming(&state.db).await?;
    Ok(render(StatusCode::OK, flashes, HomePage { events }))
}

/// GET /event/{event_id}
pub async fn event_details(
    state: web::Data<AppState>,
    path: web::Path<i64>,
    flashes: Flashes,
) -> Result<HttpResponse> {
    let event = event_repo::get_event(&state.db, path.into_inner())
        .await?
        .ok_or_else(|| AppError::not_found("Event"))?;

    Ok(render(StatusCode::OK, flashes, EventPage { event }))
}

/// GET /create_event - the choices a new event can pick from
pub async fn create_event_form(
    state: web::Data<AppState>,
    _user: CurrentUser,
    flashes: Flashes,
) -> Result<HttpResponse> {
    let locations = catalog_repo::list_locations(&state.db).await?;
    let categories = catalog_repo::list_categories(&state.db).await?;

    Ok(render(
        StatusCode::OK,
        flashes,
        EventFormPage {
            locations,
            categories,
            date_format: EVENT_DATETIME_FORMAT,
        },
    ))
}

/// POST /create_event
pub async fn create_event(
    state: web::Data<AppState>,
    CurrentUser(user): CurrentUser,
    mut flashes: Flashes,
    form: web::Form<EventForm>,
) -> Result<HttpResponse> {
    let locations = catalog_repo::list_locations(&state.db).await?;
    let categories = catalog_repo::list_categories(&state.db).await?;

    let new_event = form.clean(&locations, &categories)?;
    let event = event_repo::create_event(&state.db, user.id, &new_event).await?;

    tracing::info!(event_id = event.id, organizer_id = user.id, "event created");

    flashes.success("Event created successfully!");
    Ok(redirect("/", &flashes))
}
