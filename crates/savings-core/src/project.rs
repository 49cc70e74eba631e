//! Project records and the shapes used to create and change them.
//!
//! - [`Project`]: a stored record
//! - [`ProjectInput`]: a full record as sent for an upsert
//! - [`ProjectPatch`]: a partial update
//! - [`ProjectDraft`]: a new project as typed by a user, before it has an id

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::util::ids::{slugify, unique_id};
use crate::util::numbers::{
    deserialize_number, deserialize_optional_number, deserialize_optional_text, non_negative,
};
use crate::{Error, Result};

// ============================================================================
// Project
// ============================================================================

/// An automation project.
///
/// All numeric fields are finite and non-negative; the input types below
/// guarantee it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    /// Unique, immutable identifier.
    pub id: String,
    /// Human label.
    pub name: String,
    /// Transaction volume.
    pub count: f64,
    /// Minutes of IT effort per transaction.
    pub time_per_transaction_min: f64,
    /// Flat number of business hours handed back.
    pub business_hours_back: f64,
}

/// The projects a fresh server starts with.
pub fn demo_projects() -> Vec<Project> {
    vec![
        Project {
            id: "powerbi".to_string(),
            name: "Power BI".to_string(),
            count: 200.0,
            time_per_transaction_min: 14.0,
            business_hours_back: 30.0,
        },
        Project {
            id: "project2".to_string(),
            name: "Project 2".to_string(),
            count: 100.0,
            time_per_transaction_min: 10.0,
            business_hours_back: 15.0,
        },
    ]
}

// ============================================================================
// ProjectInput
// ============================================================================

/// A full project record as supplied to an upsert.
///
/// Numeric fields are coerced leniently: missing, empty, or non-numeric values
/// become `0`. Only the id is required.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectInput {
    /// Project id; required.
    #[serde(default, deserialize_with = "deserialize_optional_text")]
    pub id: Option<String>,
    /// Project name; falls back to the id when blank.
    #[serde(default, deserialize_with = "deserialize_optional_text")]
    pub name: Option<String>,
    /// Transaction volume.
    #[serde(default, deserialize_with = "deserialize_number")]
    pub count: f64,
    /// Minutes per transaction.
    #[serde(default, deserialize_with = "deserialize_number")]
    pub time_per_transaction_min: f64,
    /// Business hours handed back.
    #[serde(default, deserialize_with = "deserialize_number")]
    pub business_hours_back: f64,
}

impl ProjectInput {
    /// Parse an upsert body. Fails only when the body is not a JSON object.
    pub fn from_json(value: Value) -> Result<Self> {
        if !value.is_object() {
            return Err(Error::validation("project body must be a JSON object"));
        }
        serde_json::from_value(value).map_err(|e| Error::validation(e.to_string()))
    }

    /// Validate into a storable record.
    ///
    /// Returns [`Error::Validation`] with the message `id required` when the
    /// id is missing or blank.
    pub fn into_project(self) -> Result<Project> {
        let id = self
            .id
            .filter(|id| !id.trim().is_empty())
            .ok_or_else(|| Error::validation_field("id", "id required"))?;
        let name = self
            .name
            .filter(|name| !name.trim().is_empty())
            .unwrap_or_else(|| id.clone());

        Ok(Project {
            id,
            name,
            count: non_negative(self.count),
            time_per_transaction_min: non_negative(self.time_per_transaction_min),
            business_hours_back: non_negative(self.business_hours_back),
        })
    }
}

impl From<Project> for ProjectInput {
    fn from(project: Project) -> Self {
        Self {
            id: Some(project.id),
            name: Some(project.name),
            count: project.count,
            time_per_transaction_min: project.time_per_transaction_min,
            business_hours_back: project.business_hours_back,
        }
    }
}

// ============================================================================
// ProjectPatch
// ============================================================================

/// A partial project update; `None` fields are left as stored.
///
/// The id is immutable, so an `id` key in a patch body is ignored. A blank
/// name is ignored as well.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectPatch {
    /// New name.
    #[serde(
        default,
        deserialize_with = "deserialize_optional_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub name: Option<String>,
    /// New transaction volume.
    #[serde(
        default,
        deserialize_with = "deserialize_optional_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub count: Option<f64>,
    /// New minutes per transaction.
    #[serde(
        default,
        deserialize_with = "deserialize_optional_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub time_per_transaction_min: Option<f64>,
    /// New business hours handed back.
    #[serde(
        default,
        deserialize_with = "deserialize_optional_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub business_hours_back: Option<f64>,
}

impl ProjectPatch {
    /// Parse a patch body. Fails only when the body is not a JSON object.
    pub fn from_json(value: Value) -> Result<Self> {
        if !value.is_object() {
            return Err(Error::validation("project body must be a JSON object"));
        }
        serde_json::from_value(value).map_err(|e| Error::validation(e.to_string()))
    }

    /// Returns `true` if the patch changes nothing.
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.count.is_none()
            && self.time_per_transaction_min.is_none()
            && self.business_hours_back.is_none()
    }

    /// Merge the supplied fields onto `project`.
    pub fn apply_to(&self, project: &mut Project) {
        if let Some(name) = self.name.as_ref().filter(|n| !n.trim().is_empty()) {
            project.name = name.clone();
        }
        if let Some(count) = self.count {
            project.count = non_negative(count);
        }
        if let Some(minutes) = self.time_per_transaction_min {
            project.time_per_transaction_min = non_negative(minutes);
        }
        if let Some(hours) = self.business_hours_back {
            project.business_hours_back = non_negative(hours);
        }
    }
}

// ============================================================================
// ProjectDraft
// ============================================================================

/// A project being added by a user, before it has a settled id.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectDraft {
    /// Required display name.
    pub name: String,
    /// Explicit id; derived from the name when absent or blank.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Transaction volume.
    #[serde(default)]
    pub count: f64,
    /// Minutes per transaction.
    #[serde(default)]
    pub time_per_transaction_min: f64,
    /// Business hours handed back.
    #[serde(default)]
    pub business_hours_back: f64,
}

impl ProjectDraft {
    /// Create a draft with the given name and zeroed figures.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Settle the draft into a project whose id `is_taken` does not claim.
    ///
    /// The id candidate is the trimmed explicit id, or [`slugify`] of the
    /// name; collisions get a `-1`, `-2`, ... suffix.
    ///
    /// # Examples
    ///
    /// ```
    /// use savings_core::ProjectDraft;
    ///
    /// let existing = ["my-new-project"];
    /// let project = ProjectDraft::new("My New Project!")
    ///     .into_project(|id| existing.contains(&id))
    ///     .unwrap();
    /// assert_eq!(project.id, "my-new-project-1");
    /// ```
    pub fn into_project<F>(self, is_taken: F) -> Result<Project>
    where
        F: Fn(&str) -> bool,
    {
        let name = self.name.trim().to_string();
        if name.is_empty() {
            return Err(Error::validation_field("name", "name required"));
        }

        let candidate = match self.id.as_deref().map(str::trim) {
            Some(explicit) if !explicit.is_empty() => explicit.to_string(),
            _ => slugify(&name),
        };
        if candidate.is_empty() {
            return Err(Error::validation_field(
                "id",
                format!("could not derive an id from name '{name}'"),
            ));
        }

        Ok(Project {
            id: unique_id(&candidate, is_taken),
            name,
            count: non_negative(self.count),
            time_per_transaction_min: non_negative(self.time_per_transaction_min),
            business_hours_back: non_negative(self.business_hours_back),
        })
    }
}
