//! Request DTOs for the administrative write endpoints
//!
//! Defines the structure of incoming HTTP request bodies.

use serde::Deserialize;

use super::{NewProperty, Price, PropertyUpdate};

/// Maximum length of title and location fields
pub const MAX_LABEL_LENGTH: usize = 200;

/// Request body for `POST /admin/properties`
#[derive(Debug, Clone, Deserialize)]
pub struct CreatePropertyRequest {
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub price: Price,
    pub location: String,
}

impl CreatePropertyRequest {
    /// Returns an error message if validation fails, None if valid.
    pub fn validate(&self) -> Option<String> {
        validate_label("title", &self.title).or_else(|| validate_label("location", &self.location))
    }

    pub fn into_new_property(self) -> NewProperty {
        NewProperty::new(self.title, self.description, self.price, self.location)
    }
}

/// Request body for `PUT /admin/properties/:id`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdatePropertyRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub price: Option<Price>,
    pub location: Option<String>,
}

impl UpdatePropertyRequest {
    /// Returns an error message if validation fails, None if valid.
    pub fn validate(&self) -> Option<String> {
        if self.title.is_none()
            && self.description.is_none()
            && self.price.is_none()
            && self.location.is_none()
        {
            return Some("Update must change at least one field".to_string());
        }
        self.title
            .as_deref()
            .and_then(|title| validate_label("title", title))
            .or_else(|| {
                self.location
                    .as_deref()
                    .and_then(|location| validate_label("location", location))
            })
    }

    pub fn into_update(self) -> PropertyUpdate {
        PropertyUpdate {
            title: self.title,
            description: self.description,
            price: self.price,
            location: self.location,
        }
    }
}

fn validate_label(field: &str, value: &str) -> Option<String> {
    if value.trim().is_empty() {
        return Some(format!("{} cannot be empty", field));
    }
    if value.chars().count() > MAX_LABEL_LENGTH {
        return Some(format!(
            "{} exceeds maximum length of {} characters",
            field, MAX_LABEL_LENGTH
        ));
    }
    None
}
