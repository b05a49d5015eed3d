use validator::Validate;

use super::{non_blank, FieldErrors};
use crate::models::ProfileUpdate;

pub const ALLOWED_PICTURE_EXTENSIONS: &[&str] = &["jpg", "png"];

/// File part of the profile form as received.
#[derive(Debug, Clone)]
pub struct UploadedPicture {
    pub filename: String,
    pub bytes: Vec<u8>,
}

impl UploadedPicture {
    pub fn extension(&self) -> Option<String> {
        let (_, ext) = self.filename.rsplit_once('.')?;
        Some(ext.to_ascii_lowercase())
    }
}

/// Profile edit form; every field is optional.
#[derive(Debug, Default, Validate)]
pub struct UpdateProfileForm {
    #[validate(length(max = 80, message = "Field cannot be longer than 80 characters."))]
    pub first_name: Option<String>,

    #[validate(length(max = 80, message = "Field cannot be longer than 80 characters."))]
    pub last_name: Option<String>,

    pub bio: Option<String>,

    #[validate(length(max = 120, message = "Field cannot be longer than 120 characters."))]
    pub location: Option<String>,

    #[validate(length(max = 200, message = "Field cannot be longer than 200 characters."))]
    pub website_link: Option<String>,

    #[validate(
        email(message = "Invalid email address."),
        length(max = 120, message = "Field cannot be longer than 120 characters.")
    )]
    pub contact_email: Option<String>,

    pub profile_picture: Option<UploadedPicture>,
}

impl UpdateProfileForm {
    pub const TEXT_FIELDS: &'static [&'static str] = &[
        "first_name",
        "last_name",
        "bio",
        "location",
        "website_link",
        "contact_email",
    ];

    pub fn is_text_field(name: &str) -> bool {
        Self::TEXT_FIELDS.contains(&name)
    }

    /// Assigns a text field by its form name; unknown names are ignored.
    pub fn set_text(&mut self, name: &str, value: String) {
        let slot = match name {
            "first_name" => &mut self.first_name,
            "last_name" => &mut self.last_name,
            "bio" => &mut self.bio,
            "location" => &mut self.location,
            "website_link" => &mut self.website_link,
            "contact_email" => &mut self.contact_email,
            _ => return,
        };
        *slot = Some(value);
    }

    /// Blank fields become `None`; returns the text update and the picture, if any.
    pub fn clean(self) -> Result<(ProfileUpdate, Option<UploadedPicture>), FieldErrors> {
        let form = Self {
            first_name: non_blank(self.first_name),
            last_name: non_blank(self.last_name),
            bio: non_blank(self.bio),
            location: non_blank(self.location),
            website_link: non_blank(self.website_link),
            contact_email: non_blank(self.contact_email),
            profile_picture: self
                .profile_picture
                .filter(|p| !p.filename.trim().is_empty() && !p.bytes.is_empty()),
        };

        let mut errors = match form.validate() {
            Ok(()) => FieldErrors::default(),
            Err(e) => FieldErrors::from(e),
        };

        if let Some(picture) = &form.profile_picture {
            let allowed = picture
                .extension()
                .map(|ext| ALLOWED_PICTURE_EXTENSIONS.contains(&ext.as_str()))
                .unwrap_or(false);
            if !allowed {
                errors.add("profile_picture", "File does not have an approved extension: jpg, png");
            }
        }

        errors.into_result()?;

        Ok((
            ProfileUpdate {
                first_name: form.first_name,
                last_name: form.last_name,
                bio: form.bio,
                location: form.location,
                website_link: form.website_link,
                contact_email: form.contact_email,
            },
            form.profile_picture,
        ))
    }
}
