//! Wire mapping between backend JSON and the typed entities.
//!
//! The backend mixes conventions: entities come back in `camelCase`, while
//! several request bodies (chat, run creation, validation, result updates)
//! expect `snake_case`. Every casing decision lives in this module so the
//! rest of the workspace only ever sees the typed entities.

use serde::{Deserialize, Deserializer, Serialize};

use crate::enums::{RunStatus, Strategy};

// ---------------------------------------------------------------------------
// Timestamps
// ---------------------------------------------------------------------------

/// Lenient RFC 3339 codec for backend timestamps.
///
/// The backend emits offset-less ISO timestamps (`2025-03-01T10:00:00.123`)
/// for some entities; those are read as UTC. Serialization is always RFC 3339.
pub mod timestamp {
    use chrono::{DateTime, NaiveDateTime, Utc};
    use serde::{Deserialize, Deserializer, Serializer, de::Error as _};

    /// Parse a backend timestamp, treating offset-less values as UTC.
    ///
    /// # Errors
    ///
    /// Returns the chrono parse error when the value is neither RFC 3339 nor
    /// a naive ISO 8601 date-time.
    pub fn parse(raw: &str) -> Result<DateTime<Utc>, chrono::ParseError> {
        match DateTime::parse_from_rfc3339(raw) {
            Ok(dt) => Ok(dt.with_timezone(&Utc)),
            Err(rfc_err) => NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
                .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f"))
                .map(|naive| naive.and_utc())
                .map_err(|_| rfc_err),
        }
    }

    pub fn serialize<S: Serializer>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&value.to_rfc3339())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(deserializer)?;
        parse(&raw).map_err(|e| D::Error::custom(format!("invalid timestamp '{raw}': {e}")))
    }

    /// Same codec for optional timestamps (`null` or missing is `None`).
    pub mod option {
        use chrono::{DateTime, Utc};
        use serde::{Deserialize, Deserializer, Serializer, de::Error as _};

        #[allow(clippy::ref_option)]
        pub fn serialize<S: Serializer>(
            value: &Option<DateTime<Utc>>,
            serializer: S,
        ) -> Result<S::Ok, S::Error> {
            match value {
                Some(dt) => serializer.serialize_some(&dt.to_rfc3339()),
                None => serializer.serialize_none(),
            }
        }

        pub fn deserialize<'de, D: Deserializer<'de>>(
            deserializer: D,
        ) -> Result<Option<DateTime<Utc>>, D::Error> {
            let raw = Option::<String>::deserialize(deserializer)?;
            raw.filter(|value| !value.is_empty())
                .map(|value| {
                    super::parse(&value)
                        .map_err(|e| D::Error::custom(format!("invalid timestamp '{value}': {e}")))
                })
                .transpose()
        }
    }
}

// ---------------------------------------------------------------------------
// Nullable fields
// ---------------------------------------------------------------------------

/// Read JSON `null` the same way as a missing field: `T::default()`.
///
/// The backend sends `null` for empty comments, article lists, and
/// favorite orders. Pair with `#[serde(default)]` so absent keys match.
///
/// # Errors
///
/// Returns the inner error when a non-null value does not fit `T`.
pub fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Whole-percent pass rates.
///
/// Any JSON number is accepted and rounded to the nearest percent in
/// `0..=100`; `null` reads as 0.
pub mod percent {
    use serde::{Deserialize, Deserializer};

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u32, D::Error> {
        let raw = Option::<f64>::deserialize(deserializer)?;
        Ok(raw.map_or(0, round))
    }

    /// Round a raw rate to a whole percent. Non-finite values are 0.
    #[must_use]
    pub fn round(raw: f64) -> u32 {
        if !raw.is_finite() {
            return 0;
        }
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let rate = raw.round().clamp(0.0, 100.0) as u32;
        rate
    }
}

// ---------------------------------------------------------------------------
// Request payloads
// ---------------------------------------------------------------------------

/// `POST /chat`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatRequest<'a> {
    pub message: &'a str,
    pub strategy: &'a Strategy,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_id: Option<&'a str>,
}

/// `POST /test-suites`, `PUT /test-suites/{id}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SuiteDraft<'a> {
    pub name: &'a str,
    pub description: &'a str,
}

/// `POST /test-suites/{id}/cases`, `PUT /test-cases/{id}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CaseDraft<'a> {
    pub question: &'a str,
    pub expected_answer: &'a str,
}

/// `POST /test-runs`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CreateRunRequest<'a> {
    pub suite_id: &'a str,
    pub strategy: &'a Strategy,
}

/// `POST /predict`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PredictRequest<'a> {
    pub message: &'a str,
    pub strategy: &'a Strategy,
}

/// `POST /validate`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidateRequest<'a> {
    pub question: &'a str,
    pub expected_answer: &'a str,
    pub actual_answer: &'a str,
}

/// `PUT /test-runs/{runId}/results/{caseId}`
///
/// Execution sends the full set of metrics; a manual override only sends the
/// answer and the new verdict, so optional fields are omitted when unset.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ResultUpdate {
    pub actual_answer: String,
    pub passed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub similarity: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub retrieved_articles: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expected_articles: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub llm_extracted_articles: Option<Vec<String>>,
}

impl ResultUpdate {
    /// Payload for an item whose execution failed: answer, verdict, and the
    /// error text, with no metrics.
    #[must_use]
    pub fn error(actual_answer: &str, explanation: &str) -> Self {
        Self {
            explanation: Some(explanation.to_string()),
            ..Self::verdict_only(actual_answer, false)
        }
    }

    /// Payload for a manual verdict override.
    #[must_use]
    pub fn verdict_only(actual_answer: &str, passed: bool) -> Self {
        Self {
            actual_answer: actual_answer.to_string(),
            passed,
            ..Self::default()
        }
    }
}

/// Metrics the backend computes when a result is written.
///
/// The endpoint may also answer with an empty body, in which case the client
/// reports `None` instead of this struct.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ResultUpdateAck {
    #[serde(default)]
    pub retrieval_recall: Option<f64>,
    #[serde(default)]
    pub answer_precision: Option<f64>,
    #[serde(default)]
    pub llm_extracted_articles: Option<Vec<String>>,
}

/// `PATCH /test-runs/{id}`: partial run update, `camelCase` keys.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RunPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<RunStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_favorite: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub favorite_order: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pass_rate: Option<u32>,
}

impl RunPatch {
    #[must_use]
    pub fn status(status: RunStatus) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }

    /// Final transition of a finished batch.
    #[must_use]
    pub fn completed(pass_rate: u32) -> Self {
        Self {
            status: Some(RunStatus::Completed),
            pass_rate: Some(pass_rate),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn pass_rate(pass_rate: u32) -> Self {
        Self {
            pass_rate: Some(pass_rate),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn favorite(is_favorite: bool) -> Self {
        Self {
            is_favorite: Some(is_favorite),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn favorite_order(order: u32) -> Self {
        Self {
            favorite_order: Some(order),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn comment(comment: &str) -> Self {
        Self {
            comment: Some(comment.to_string()),
            ..Self::default()
        }
    }

    /// True when no field would be sent.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}
