//! Roster entries.

use serde::{Deserialize, Serialize};

use crate::types::{ChildId, ValidationError};

/// A child on the facility roster.
///
/// Children are never deleted; archiving clears `is_active`, which hides the
/// child from the daily board but keeps them in historical reports.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Child {
    pub id: ChildId,
    pub first_name: String,
    pub last_name: String,
    /// Responsible party for drop-off and pickup.
    pub guardian: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allergies: Option<String>,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

const fn default_active() -> bool {
    true
}

impl Child {
    /// Builds an active child from already validated fields.
    pub(crate) fn new(id: ChildId, fields: ChildFields) -> Self {
        Self {
            id,
            first_name: fields.first_name,
            last_name: fields.last_name,
            guardian: fields.guardian,
            allergies: fields.allergies,
            is_active: true,
        }
    }

    /// Copies editable fields in, keeping `id` and `is_active`.
    pub(crate) fn apply(&mut self, fields: ChildFields) {
        self.first_name = fields.first_name;
        self.last_name = fields.last_name;
        self.guardian = fields.guardian;
        self.allergies = fields.allergies;
    }

    /// `"{first} {last}"`.
    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Editable roster fields, as entered by the operator.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChildFields {
    pub first_name: String,
    pub last_name: String,
    pub guardian: String,
    #[serde(default)]
    pub allergies: Option<String>,
}

impl ChildFields {
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        guardian: impl Into<String>,
    ) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
            guardian: guardian.into(),
            allergies: None,
        }
    }

    #[must_use]
    pub fn with_allergies(mut self, allergies: impl Into<String>) -> Self {
        self.allergies = Some(allergies.into());
        self
    }

    /// Returns trimmed fields, or the first required field that is empty.
    ///
    /// Blank allergies are normalized to `None`.
    pub fn validate(&self) -> Result<Self, ValidationError> {
        let required = |value: &str, field: &'static str| {
            let value = value.trim();
            if value.is_empty() {
                Err(ValidationError::Empty { field })
            } else {
                Ok(value.to_string())
            }
        };

        Ok(Self {
            first_name: required(&self.first_name, "first name")?,
            last_name: required(&self.last_name, "last name")?,
            guardian: required(&self.guardian, "guardian")?,
            allergies: self
                .allergies
                .as_deref()
                .map(str::trim)
                .filter(|a| !a.is_empty())
                .map(String::from),
        })
    }
}

impl From<&Child> for ChildFields {
    fn from(child: &Child) -> Self {
        Self {
            first_name: child.first_name.clone(),
            last_name: child.last_name.clone(),
            guardian: child.guardian.clone(),
            allergies: child.allergies.clone(),
        }
    }
}
