use serde::{Deserialize, Serialize};
use validator::Validate;

use super::{required, FieldErrors};

pub const USERNAME_TAKEN: &str = "That username is already taken. Please choose a different one.";
pub const EMAIL_TAKEN: &str = "That email is already registered. Please choose a different one.";

#[derive(Debug, Default, Deserialize, Serialize, Validate)]
pub struct RegistrationForm {
    #[serde(default)]
    #[validate(
        custom(function = "required"),
        length(max = 80, message = "Field cannot be longer than 80 characters.")
    )]
    pub username: String,

    #[serde(default)]
    #[validate(
        custom(function = "required"),
        email(message = "Invalid email address."),
        length(max = 120, message = "Field cannot be longer than 120 characters.")
    )]
    pub email: String,

    #[serde(default)]
    #[validate(
        custom(function = "required"),
        length(min = 6, message = "Field must be at least 6 characters long.")
    )]
    pub password: String,

    #[serde(default)]
    #[validate(
        custom(function = "required"),
        must_match(other = "password", message = "Field must be equal to password.")
    )]
    pub confirm_password: String,
}

impl RegistrationForm {
    /// Trims the identity fields; passwords are taken verbatim.
    pub fn normalized(mut self) -> Self {
        self.username = self.username.trim().to_string();
        self.email = self.email.trim().to_string();
        self
    }

    /// Checks that do not need the database.
    pub fn check(&self) -> Result<(), FieldErrors> {
        self.validate().map_err(FieldErrors::from)
    }

    /// Field errors for identities that already exist.
    pub fn uniqueness_errors(username_taken: bool, email_taken: bool) -> FieldErrors {
        let mut errors = FieldErrors::default();
        if username_taken {
            errors.add("username", USERNAME_TAKEN);
        }
        if email_taken {
            errors.add("email", EMAIL_TAKEN);
        }
        errors
    }
}

#[derive(Debug, Default, Deserialize, Serialize, Validate)]
pub struct LoginForm {
    #[serde(default)]
    #[validate(
        custom(function = "required"),
        email(message = "Invalid email address.")
    )]
    pub email: String,

    #[serde(default)]
    #[validate(
        custom(function = "required"),
        length(min = 6, message = "Field must be at least 6 characters long.")
    )]
    pub password: String,
}

impl LoginForm {
    pub fn normalized(mut self) -> Self {
        self.email = self.email.trim().to_string();
        self
    }

    pub fn check(&self) -> Result<(), FieldErrors> {
        self.validate().map_err(FieldErrors::from)
    }
}
