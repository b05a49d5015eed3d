/// Form definitions and field-level error accumulation
mod auth;
mod event;
mod post;
mod profile;

pub use auth::{LoginForm, RegistrationForm, EMAIL_TAKEN, USERNAME_TAKEN};
pub use event::{EventForm, EVENT_DATETIME_FORMAT};
pub use post::{CommentForm, PostForm};
pub use profile::{UpdateProfileForm, UploadedPicture, ALLOWED_PICTURE_EXTENSIONS};

use serde::Serialize;
use std::collections::BTreeMap;
use validator::{ValidationError, ValidationErrors};

pub(crate) const REQUIRED: &str = "required";
pub(crate) const REQUIRED_MESSAGE: &str = "This field is required.";

/// Errors keyed by form field name; each field keeps its messages in the order raised.
#[derive(Debug, Default, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, Vec<String>>);

impl FieldErrors {
    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.0.entry(field.to_string()).or_default().push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.0.get(field).map(Vec::as_slice)
    }

    /// `Ok(())` when no field failed.
    pub fn into_result(self) -> Result<(), FieldErrors> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl From<ValidationErrors> for FieldErrors {
    fn from(errors: ValidationErrors) -> Self {
        let mut fields = FieldErrors::default();

        for (field, errs) in errors.field_errors() {
            let field = field.to_string();
            // A missing value stops the chain for that field.
            let required = errs.iter().find(|e| e.code == REQUIRED);
            let selected: Vec<&ValidationError> = match required {
                Some(e) => vec![e],
                None => errs.iter().collect(),
            };

            for error in selected {
                let message = error
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| error.code.to_string());
                fields.add(&field, message);
            }
        }

        fields
    }
}

/// Present and not blank.
pub(crate) fn required(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut error = ValidationError::new(REQUIRED);
        error.message = Some(REQUIRED_MESSAGE.into());
        return Err(error);
    }
    Ok(())
}

/// Trimmed value, `None` when blank.
pub(crate) fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_rejects_whitespace() {
        assert!(required("   ").is_err());
        assert!(required("").is_err());
        assert!(required(" x ").is_ok());
    }

    #[test]
    fn test_non_blank() {
        assert_eq!(non_blank(Some("  bio ".into())), Some("bio".into()));
        assert_eq!(non_blank(Some("   ".into())), None);
        assert_eq!(non_blank(None), None);
    }

    #[test]
    fn test_add_and_into_result() {
        let mut errors = FieldErrors::default();
        errors.add("title", REQUIRED_MESSAGE);
        errors.add("title", "Too long.");
        errors.add("location", "Not a valid choice.");

        assert_eq!(errors.get("title").unwrap(), [REQUIRED_MESSAGE, "Too long."]);
        assert_eq!(errors.get("location").unwrap(), ["Not a valid choice."]);
        assert!(errors.into_result().is_err());
        assert!(FieldErrors::default().into_result().is_ok());
    }
}
