use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::wire::null_as_default;

/// Output of `POST /predict` for one question.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Prediction {
    pub answer: String,
    #[serde(default, deserialize_with = "null_as_default")]
    #[schemars(with = "Option<Vec<String>>")]
    pub retrieved_articles: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    #[schemars(with = "Option<Vec<String>>")]
    pub llm_extracted_articles: Vec<String>,
}

/// Output of `POST /validate`: the backend's judgement of an answer.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct Validation {
    pub passed: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    #[schemars(with = "Option<f64>")]
    pub similarity: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    #[schemars(with = "Option<String>")]
    pub explanation: String,
}

impl Validation {
    /// Stand-in used when the validation endpoint itself fails.
    #[must_use]
    pub fn server_error() -> Self {
        Self {
            passed: false,
            similarity: 0.0,
            explanation: "Server Error during validation".to_string(),
        }
    }
}
