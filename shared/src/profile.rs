use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter};

use crate::validation;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, EnumIter, Display,
)]
#[serde(rename_all = "lowercase")]
pub enum ProfileField {
    Name,
    Weight,
    Age,
    Ethnicity,
    Sex,
    City,
}

impl ProfileField {
    /// Example value shown in the empty input.
    pub fn placeholder(self) -> &'static str {
        match self {
            ProfileField::Name => "Alfredo",
            ProfileField::Weight => "162 lb",
            ProfileField::Age => "18",
            ProfileField::Ethnicity => "Hispanic",
            ProfileField::Sex => "Male or Female",
            ProfileField::City => "Toronto",
        }
    }

    pub fn input_id(self) -> String {
        format!("profile-{}", self.to_string().to_lowercase())
    }
}

/// Values typed on the profile screen together with the current error for
/// each field. Errors are only ever written by [`ProfileForm::set_value`], so
/// an error always describes the value next to it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProfileForm {
    values: HashMap<ProfileField, String>,
    errors: HashMap<ProfileField, String>,
}

impl ProfileForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `value` and re-validates `field` only.
    pub fn set_value(&mut self, field: ProfileField, value: impl Into<String>) {
        let value = value.into();
        match validation::validate(field, &value) {
            Some(message) => {
                self.errors.insert(field, message);
            }
            None => {
                self.errors.remove(&field);
            }
        }
        self.values.insert(field, value);
    }

    pub fn value(&self, field: ProfileField) -> &str {
        self.values.get(&field).map(String::as_str).unwrap_or("")
    }

    pub fn error(&self, field: ProfileField) -> Option<&str> {
        self.errors.get(&field).map(String::as_str)
    }

    pub fn is_filled(&self) -> bool {
        ProfileField::iter().all(|field| !self.value(field).trim().is_empty())
    }

    pub fn is_valid(&self) -> bool {
        ProfileField::iter().all(|field| self.error(field).is_none())
    }

    /// Both halves are checked on purpose: a field can hold text and still be
    /// invalid, and an untouched field is empty without having an error yet.
    pub fn is_complete(&self) -> bool {
        self.is_filled() && self.is_valid()
    }

    /// First field, in screen order, that still blocks completion.
    pub fn first_incomplete(&self) -> Option<ProfileField> {
        ProfileField::iter()
            .find(|&field| self.value(field).trim().is_empty() || self.error(field).is_some())
    }

    /// Name used in screen headings, falling back to "User".
    pub fn display_name(&self) -> &str {
        let name = self.value(ProfileField::Name).trim();
        if name.is_empty() { "User" } else { name }
    }

    pub fn reset(&mut self) {
        self.values.clear();
        self.errors.clear();
    }
}
