//! API request types for point-of-interest operations.
//!
//! Both payloads carry optional fields so that a missing `name` reaches
//! validation and produces a field error instead of a deserialization error.

use serde::{Deserialize, Serialize};

use super::error::ValidationErrors;
use super::types::{NewPointOfInterest, PointOfInterest};

/// Maximum length of a point-of-interest name.
pub const NAME_MAX_LENGTH: usize = 50;

/// Maximum length of a point-of-interest description.
pub const DESCRIPTION_MAX_LENGTH: usize = 200;

/// Request payload for creating a point of interest.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PointOfInterestForCreation {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

impl PointOfInterestForCreation {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            description: None,
        }
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Validates the payload and converts it into an unsaved entity.
    pub fn validate(self) -> Result<NewPointOfInterest, ValidationErrors> {
        validate_fields(self.name.as_deref(), self.description.as_deref()).into_result()?;

        Ok(NewPointOfInterest {
            name: self.name.unwrap_or_default(),
            description: self.description,
        })
    }
}

/// Request payload for a full or partial update of a point of interest.
///
/// Partial updates apply a patch document to a copy of this shape built from
/// the stored entity, so every field serializes (including `null`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PointOfInterestForUpdate {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

impl PointOfInterestForUpdate {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            description: None,
        }
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn validate(&self) -> Result<(), ValidationErrors> {
        validate_fields(self.name.as_deref(), self.description.as_deref()).into_result()
    }

    /// Overwrites the mutable fields of a stored point of interest.
    ///
    /// `id` and `city_id` are never touched. Call [`Self::validate`] first.
    pub fn apply_to(self, point: &mut PointOfInterest) {
        point.name = self.name.unwrap_or_default();
        point.description = self.description;
    }
}

impl From<&PointOfInterest> for PointOfInterestForUpdate {
    fn from(point: &PointOfInterest) -> Self {
        Self {
            name: Some(point.name.clone()),
            description: point.description.clone(),
        }
    }
}

/// Validation rules shared by creation and update payloads.
///
/// - `name` is required and at most [`NAME_MAX_LENGTH`] characters
/// - `description` is at most [`DESCRIPTION_MAX_LENGTH`] characters
/// - `name` and `description` must differ
pub fn validate_fields(name: Option<&str>, description: Option<&str>) -> ValidationErrors {
    let mut errors = ValidationErrors::new();

    match name {
        None => errors.add("name", "Enter a valid name."),
        Some(name) if name.trim().is_empty() => errors.add("name", "Enter a valid name."),
        Some(name) if name.chars().count() > NAME_MAX_LENGTH => errors.add(
            "name",
            format!("The name must be at most {NAME_MAX_LENGTH} characters."),
        ),
        Some(_) => {}
    }

    if let Some(description) = description {
        if description.chars().count() > DESCRIPTION_MAX_LENGTH {
            errors.add(
                "description",
                format!("The description must be at most {DESCRIPTION_MAX_LENGTH} characters."),
            );
        }
    }

    if name.is_some() && name == description {
        errors.add(
            "description",
            "The provided description should be different from the name.",
        );
    }

    errors
}
