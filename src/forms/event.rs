use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use super::{required, FieldErrors};
use crate::models::{Category, Location, NewEvent};

/// Format expected for event start/end dates, e.g. `2024-06-01 18:30`.
pub const EVENT_DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M";

#[derive(Debug, Default, Deserialize, Serialize, Validate)]
pub struct EventForm {
    #[serde(default)]
    #[validate(
        custom(function = "required"),
        length(max = 100, message = "Field cannot be longer than 100 characters.")
    )]
    pub title: String,

    #[serde(default)]
    #[validate(custom(function = "required"))]
    pub description: String,

    #[serde(default)]
    #[validate(custom(function = "required_datetime"))]
    pub start_date: String,

    #[serde(default)]
    #[validate(custom(function = "required_datetime"))]
    pub end_date: String,

    #[serde(default)]
    #[validate(custom(function = "required"))]
    pub location: String,

    #[serde(default)]
    #[validate(custom(function = "required"))]
    pub category: String,
}

fn parse_datetime(value: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(value.trim(), EVENT_DATETIME_FORMAT).ok()
}

fn required_datetime(value: &str) -> Result<(), ValidationError> {
    required(value)?;
    if parse_datetime(value).is_some() {
        return Ok(());
    }
    let mut error = ValidationError::new("datetime");
    error.message = Some("Not a valid datetime value.".into());
    Err(error)
}

/// Coerces a select value to an id that is one of `choices`.
fn select_choice(
    errors: &mut FieldErrors,
    field: &str,
    raw: &str,
    choices: impl IntoIterator<Item = i64>,
) -> Option<i64> {
    if raw.trim().is_empty() {
        return None;
    }
    let Ok(id) = raw.trim().parse::<i64>() else {
        errors.add(field, "Invalid Choice: could not coerce.");
        return None;
    };
    if !choices.into_iter().any(|choice| choice == id) {
        errors.add(field, "Not a valid choice.");
        return None;
    }
    Some(id)
}

impl EventForm {
    /// Validates against the offered choices and produces the event to insert.
    pub fn clean(
        &self,
        locations: &[Location],
        categories: &[Category],
    ) -> Result<NewEvent, FieldErrors> {
        let mut errors = match self.validate() {
            Ok(()) => FieldErrors::default(),
            Err(e) => FieldErrors::from(e),
        };

        let location_id = select_choice(
            &mut errors,
            "location",
            &self.location,
            locations.iter().map(|l| l.id),
        );
        let category_id = select_choice(
            &mut errors,
            "category",
            &self.category,
            categories.iter().map(|c| c.id),
        );

        let start_date = parse_datetime(&self.start_date);
        let end_date = parse_datetime(&self.end_date);
        if let (Some(start), Some(end)) = (start_date, end_date) {
            if end < start {
                errors.add("end_date", "End date must not be earlier than start date.");
            }
        }

        errors.into_result()?;

        match (start_date, end_date, location_id, category_id) {
            (Some(start_date), Some(end_date), Some(location_id), Some(category_id)) => {
                Ok(NewEvent {
                    title: self.title.trim().to_string(),
                    description: self.description.trim().to_string(),
                    start_date,
                    end_date,
                    location_id,
                    category_id,
                })
            }
            _ => {
                let mut errors = FieldErrors::default();
                errors.add("__all__", "Event form is incomplete.");
                Err(errors)
            }
        }
    }
}
