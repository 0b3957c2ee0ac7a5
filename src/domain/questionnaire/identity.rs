//! Who the user said they are.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::foundation::ValidationError;

/// Name and date of birth collected before the conversation starts.
///
/// Built once when the chat begins and never changed afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserIdentity {
    name: String,
    date_of_birth: NaiveDate,
}

impl UserIdentity {
    /// Validates and creates an identity.
    ///
    /// # Errors
    ///
    /// - `EmptyField` if the trimmed name is empty
    /// - `MissingField` if no date of birth was supplied
    pub fn new(
        name: impl AsRef<str>,
        date_of_birth: Option<NaiveDate>,
    ) -> Result<Self, ValidationError> {
        let name = name.as_ref().trim();
        if name.is_empty() {
            return Err(ValidationError::empty_field("name"));
        }
        let date_of_birth =
            date_of_birth.ok_or_else(|| ValidationError::missing_field("date_of_birth"))?;

        Ok(Self {
            name: name.to_string(),
            date_of_birth,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn date_of_birth(&self) -> NaiveDate {
        self.date_of_birth
    }
}
