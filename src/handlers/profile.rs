use actix_multipart::Multipart;
use actix_web::{http::StatusCode, web, HttpResponse};
use futures::StreamExt;
use serde::Serialize;
use std::path::Path;

use super::{redirect, render};
use crate::db::{event_repo, user_repo};
use crate::error::{AppError, Result};
use crate::flash::Flashes;
use crate::forms::{FieldErrors, UpdateProfileForm, UploadedPicture};
use crate::middleware::CurrentUser;
use crate::models::{EventView, ProfileUpdate, ProfileView};
use crate::utils::secure_filename;
use crate::AppState;

#[derive(Serialize)]
struct ProfilePage {
    user: ProfileView,
    events: Vec<EventView>,
}

#[derive(Serialize)]
struct UpdateProfilePage {
    form: ProfileUpdate,
    profile_picture: Option<String>,
}

/// GET /profile - the current user and the events they organize
pub async fn profile(
    state: web::Data<AppState>,
    CurrentUser(user): CurrentUser,
    flashes: Flashes,
) -> Result<HttpResponse> {
    let events = event_repo::list_by_organizer(&state.db, user.id).await?;

    Ok(render(
        StatusCode::OK,
        flashes,
        ProfilePage {
            user: ProfileView::from(&user),
            events,
        },
    ))
}

/// GET /profile/update - form pre-populated with the stored values
pub async fn update_profile_form(CurrentUser(user): CurrentUser, flashes: Flashes) -> HttpResponse {
    render(
        StatusCode::OK,
        flashes,
        UpdateProfilePage {
            form: ProfileUpdate::from(&user),
            profile_picture: user.profile_picture.clone(),
        },
    )
}

/// POST /profile/update (multipart/form-data)
pub async fn update_profile(
    state: web::Data<AppState>,
    CurrentUser(user): CurrentUser,
    mut flashes: Flashes,
    payload: Multipart,
) -> Result<HttpResponse> {
    let uploads = &state.config.uploads;
    let form = read_profile_form(payload, uploads.max_bytes).await?;
    let (update, picture) = form.clean()?;

    let stored = match &picture {
        Some(picture) => Some(store_picture(&uploads.dir, user.id, picture).await?),
        None => None,
    };

    if let Err(e) = user_repo::update_profile(&state.db, user.id, &update, stored.as_deref()).await {
        if let Some(stored) = &stored {
            if let Err(io) = tokio::fs::remove_file(Path::new(&uploads.dir).join(stored)).await {
                tracing::warn!(file = %stored, error = %io, "failed to remove unused profile picture");
            }
        }
        return Err(e.into());
    }

    if let Some(stored) = &stored {
        tracing::info!(user_id = user.id, file = %stored, "profile picture stored");
    }

    flashes.success("Your profile has been updated!");
    Ok(redirect("/profile", &flashes))
}

/// Collects the form parts; the whole body is capped at `max_bytes`.
async fn read_profile_form(mut payload: Multipart, max_bytes: usize) -> Result<UpdateProfileForm> {
    let mut form = UpdateProfileForm::default();
    let mut received = 0usize;

    while let Some(field) = payload.next().await {
        let mut field = field?;

        let (name, filename) = {
            let disposition = field.content_disposition();
            (
                disposition.get_name().unwrap_or_default().to_string(),
                disposition.get_filename().map(str::to_string),
            )
        };
        let is_picture = name == "profile_picture";
        let keep = is_picture || UpdateProfileForm::is_text_field(&name);

        let mut bytes = Vec::new();
        while let Some(chunk) = field.next().await {
            let chunk = chunk?;
            received += chunk.len();
            if received > max_bytes {
                return Err(AppError::PayloadTooLarge(format!(
                    "profile form exceeds {} bytes",
                    max_bytes
                )));
            }
            if keep {
                bytes.extend_from_slice(&chunk);
            }
        }

        if is_picture {
            form.profile_picture = Some(UploadedPicture {
                filename: filename.unwrap_or_default(),
                bytes,
            });
        } else if keep {
            form.set_text(&name, String::from_utf8_lossy(&bytes).into_owned());
        }
    }

    Ok(form)
}

/// Write the picture under `dir`; returns the stored file name.
async fn store_picture(dir: &str, user_id: i64, picture: &UploadedPicture) -> Result<String> {
    let Some(safe_name) = secure_filename(&picture.filename) else {
        let mut errors = FieldErrors::default();
        errors.add("profile_picture", "Invalid file name.");
        return Err(errors.into());
    };

    // Prefixed so users cannot overwrite each other's pictures.
    let stored = format!("{}_{}", user_id, safe_name);

    tokio::fs::create_dir_all(dir).await?;
    tokio::fs::write(Path::new(dir).join(&stored), &picture.bytes).await?;

    Ok(stored)
}
