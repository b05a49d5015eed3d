use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;

#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub profile_picture: Option<String>,
    pub location: Option<String>,
    pub bio: Option<String>,
    pub website_link: Option<String>,
    pub contact_email: Option<String>,
    pub date_joined: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// User as shown on profile pages; never carries the password hash.
#[derive(Debug, Clone, Serialize)]
pub struct ProfileView {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub profile_picture: Option<String>,
    pub location: Option<String>,
    pub bio: Option<String>,
    pub website_link: Option<String>,
    pub contact_email: Option<String>,
    pub date_joined: DateTime<Utc>,
}

impl From<&User> for ProfileView {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
            email: user.email.clone(),
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            profile_picture: user.profile_picture.clone(),
            location: user.location.clone(),
            bio: user.bio.clone(),
            website_link: user.website_link.clone(),
            contact_email: user.contact_email.clone(),
            date_joined: user.date_joined,
        }
    }
}

/// Editable profile fields; `None` clears the column.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ProfileUpdate {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub bio: Option<String>,
    pub location: Option<String>,
    pub website_link: Option<String>,
    pub contact_email: Option<String>,
}

impl From<&User> for ProfileUpdate {
    fn from(user: &User) -> Self {
        Self {
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            bio: user.bio.clone(),
            location: user.location.clone(),
            website_link: user.website_link.clone(),
            contact_email: user.contact_email.clone(),
        }
    }
}
