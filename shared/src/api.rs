//! Wire contract of `POST /api/classify`.
//!
//! The prediction is produced by the external inference service and passed
//! through unchanged; nothing here computes labels or risk levels.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use strum_macros::Display;

pub const CLASSIFY_ENDPOINT: &str = "/api/classify";
pub const UPLOAD_FIELD: &str = "file";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
pub enum Risk {
    Low,
    Medium,
    High,
    #[serde(rename = "Very High")]
    #[strum(serialize = "Very High")]
    VeryHigh,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    pub risk: Risk,
    pub display_name: String,
    pub confidence: f32,
    pub description: String,
    pub recommendation: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub class_id: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub class_name: Option<String>,
}

impl Prediction {
    pub fn has_valid_confidence(&self) -> bool {
        self.confidence.is_finite() && (0.0..=1.0).contains(&self.confidence)
    }

    pub fn confidence_percent(&self) -> f32 {
        self.confidence * 100.0
    }
}

/// One ensemble member's vote, when the service reports them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelVote {
    pub class_id: u8,
    pub class_name: String,
    pub confidence: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassifyResponse {
    pub prediction: Prediction,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub class_probabilities: Option<BTreeMap<String, f32>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model_predictions: Option<BTreeMap<String, ModelVote>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ErrorBody {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            message: None,
        }
    }

    pub fn with_message(error: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            message: Some(message.into()),
        }
    }

    /// Single line for the error banner.
    pub fn summary(&self) -> String {
        match &self.message {
            Some(message) => format!("{}: {}", self.error, message),
            None => self.error.clone(),
        }
    }
}
