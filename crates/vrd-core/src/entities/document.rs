use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::DocumentStatus;
use crate::wire::timestamp;

/// A knowledge-base document uploaded to the backend.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    pub id: String,
    pub name: String,
    /// Size in bytes.
    pub size: u64,
    #[serde(with = "timestamp")]
    #[schemars(with = "DateTime<Utc>")]
    pub uploaded_at: DateTime<Utc>,
    pub status: DocumentStatus,
}
