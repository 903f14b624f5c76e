//! Per-field validators for the profile screen.
//!
//! Every validator is a pure function of the raw input and returns `None`
//! when the value is acceptable, or the message to show under the field.

use lazy_static::lazy_static;
use regex::Regex;

use crate::profile::ProfileField;

lazy_static! {
    static ref LETTERS_AND_SPACES: Regex = Regex::new(r"^[A-Za-z\s]+$").unwrap();
    static ref WEIGHT_WITH_UNITS: Regex =
        Regex::new(r"^[0-9]+(\.[0-9]+)?\s*(lb|kg|pounds|kilograms)$").unwrap();
    static ref WHOLE_NUMBER: Regex = Regex::new(r"^[0-9]+$").unwrap();
}

fn letters_only(label: &str, value: &str) -> Option<String> {
    if LETTERS_AND_SPACES.is_match(value) {
        None
    } else {
        Some(format!("{} should contain only letters and spaces", label))
    }
}

pub fn validate_name(value: &str) -> Option<String> {
    letters_only("Name", value)
}

/// Units are matched case-insensitively, so `"73.5 KG"` is accepted.
pub fn validate_weight(value: &str) -> Option<String> {
    if WEIGHT_WITH_UNITS.is_match(&value.to_lowercase()) {
        None
    } else {
        Some("Weight should be a number followed by units (e.g., 162 lb or 73.5 kg)".to_string())
    }
}

pub fn validate_age(value: &str) -> Option<String> {
    if WHOLE_NUMBER.is_match(value) {
        None
    } else {
        Some("Age should be a whole number".to_string())
    }
}

pub fn validate_ethnicity(value: &str) -> Option<String> {
    letters_only("Ethnicity", value)
}

pub fn validate_sex(value: &str) -> Option<String> {
    letters_only("Sex", value)
}

pub fn validate_city(value: &str) -> Option<String> {
    letters_only("City", value)
}

pub fn validate(field: ProfileField, value: &str) -> Option<String> {
    match field {
        ProfileField::Name => validate_name(value),
        ProfileField::Weight => validate_weight(value),
        ProfileField::Age => validate_age(value),
        ProfileField::Ethnicity => validate_ethnicity(value),
        ProfileField::Sex => validate_sex(value),
        ProfileField::City => validate_city(value),
    }
}
