use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::entities::TestCaseResult;
use crate::wire::{null_as_default, timestamp};

/// One question/expected-answer pair owned by a suite.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TestCase {
    pub id: String,
    pub question: String,
    pub expected_answer: String,
    #[serde(with = "timestamp")]
    #[schemars(with = "DateTime<Utc>")]
    pub created_at: DateTime<Utc>,
}

/// A named collection of test cases. Deleting a suite deletes its cases.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TestSuite {
    pub id: String,
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    #[schemars(with = "Option<String>")]
    pub description: String,
    #[serde(default, deserialize_with = "null_as_default")]
    #[schemars(with = "Option<Vec<TestCase>>")]
    pub test_cases: Vec<TestCase>,
    #[serde(with = "timestamp")]
    #[schemars(with = "DateTime<Utc>")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "timestamp")]
    #[schemars(with = "DateTime<Utc>")]
    pub updated_at: DateTime<Utc>,
}

impl TestSuite {
    /// Unvalidated result slots for every case, in suite order.
    ///
    /// This is what a run's results look like before anything executed; it
    /// lets callers show a suite's cases before a run exists.
    #[must_use]
    pub fn placeholder_results(&self) -> Vec<TestCaseResult> {
        self.test_cases
            .iter()
            .map(TestCaseResult::placeholder)
            .collect()
    }
}
