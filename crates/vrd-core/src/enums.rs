//! Status enums, verdicts, roles, and strategies for Verdict.
//!
//! Status enums with state machines provide `allowed_next_states()` so
//! callers can reject invalid transitions before talking to the backend.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ---------------------------------------------------------------------------
// Verdict
// ---------------------------------------------------------------------------

/// Tri-state outcome of comparing an actual answer against an expected one.
///
/// On the wire this is the nullable boolean `passed`: `null` is unvalidated.
///
/// ```text
/// unvalidated → passed ⇄ failed
///             → failed ⇄ passed
/// ```
///
/// A verdict never returns to `unvalidated`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "Option<bool>", into = "Option<bool>")]
pub enum Verdict {
    #[default]
    Unvalidated,
    Passed,
    Failed,
}

impl Verdict {
    /// Valid next states from the current state.
    #[must_use]
    pub const fn allowed_next_states(self) -> &'static [Self] {
        match self {
            Self::Unvalidated => &[Self::Passed, Self::Failed],
            Self::Passed => &[Self::Failed, Self::Passed],
            Self::Failed => &[Self::Passed, Self::Failed],
        }
    }

    /// Check whether transitioning to `next` is allowed.
    #[must_use]
    pub fn can_transition_to(self, next: Self) -> bool {
        self.allowed_next_states().contains(&next)
    }

    /// Verdict for a boolean pass/fail outcome.
    #[must_use]
    pub const fn from_passed(passed: bool) -> Self {
        if passed { Self::Passed } else { Self::Failed }
    }

    #[must_use]
    pub const fn is_validated(self) -> bool {
        !matches!(self, Self::Unvalidated)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Unvalidated => "unvalidated",
            Self::Passed => "passed",
            Self::Failed => "failed",
        }
    }
}

impl From<Option<bool>> for Verdict {
    fn from(value: Option<bool>) -> Self {
        value.map_or(Self::Unvalidated, Self::from_passed)
    }
}

impl From<Verdict> for Option<bool> {
    fn from(value: Verdict) -> Self {
        match value {
            Verdict::Unvalidated => None,
            Verdict::Passed => Some(true),
            Verdict::Failed => Some(false),
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// RunStatus
// ---------------------------------------------------------------------------

/// Lifecycle of a test run.
///
/// ```text
/// pending → running → completed
///           running → running (resume)
///           running → failed → running (resume)
/// ```
///
/// `completed` is terminal: re-running a suite creates a new run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum RunStatus {
    Pending,
    Running,
    Completed,
    Failed,
}

impl RunStatus {
    /// Valid next states from the current state.
    #[must_use]
    pub const fn allowed_next_states(self) -> &'static [Self] {
        match self {
            Self::Pending => &[Self::Running],
            Self::Running => &[Self::Running, Self::Completed, Self::Failed],
            Self::Failed => &[Self::Running],
            Self::Completed => &[],
        }
    }

    /// Check whether transitioning to `next` is allowed.
    #[must_use]
    pub fn can_transition_to(self, next: Self) -> bool {
        self.allowed_next_states().contains(&next)
    }

    /// A run that is not completed can be resumed.
    #[must_use]
    pub const fn is_resumable(self) -> bool {
        !matches!(self, Self::Completed)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Running => "running",
            Self::Completed => "completed",
            Self::Failed => "failed",
        }
    }
}

impl fmt::Display for RunStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// DocumentStatus
// ---------------------------------------------------------------------------

/// Ingestion state of an uploaded knowledge-base document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum DocumentStatus {
    Processing,
    Ready,
    Error,
}

impl DocumentStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Processing => "processing",
            Self::Ready => "ready",
            Self::Error => "error",
        }
    }
}

impl fmt::Display for DocumentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Role
// ---------------------------------------------------------------------------

/// Author of a chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    User,
    Assistant,
}

impl Role {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Assistant => "assistant",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Strategy
// ---------------------------------------------------------------------------

/// Backend answer-generation mode, selected per chat message or per run.
///
/// Unknown names are kept verbatim as [`Strategy::Custom`] so new backend
/// strategies work without a client release.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Strategy {
    RuleBased,
    LlmBasedSimple,
    LlmNeurosymbolic,
    ConceptTemplate,
    FastToG,
    Custom(String),
}

impl Strategy {
    /// Strategies the backend ships with.
    pub const KNOWN: [Self; 5] = [
        Self::RuleBased,
        Self::LlmBasedSimple,
        Self::LlmNeurosymbolic,
        Self::ConceptTemplate,
        Self::FastToG,
    ];

    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::RuleBased => "rule-based",
            Self::LlmBasedSimple => "llm-based-simple",
            Self::LlmNeurosymbolic => "llm-neurosymbolic",
            Self::ConceptTemplate => "concept-template",
            Self::FastToG => "fast-to-g",
            Self::Custom(name) => name,
        }
    }

    /// Human-readable label.
    #[must_use]
    pub fn label(&self) -> &str {
        match self {
            Self::RuleBased => "Rule Based",
            Self::LlmBasedSimple => "LLM Based Simple",
            Self::LlmNeurosymbolic => "LLM Neuro Symbolic",
            Self::ConceptTemplate => "Template Based",
            Self::FastToG => "Fast To G",
            Self::Custom(name) => name,
        }
    }
}

impl From<String> for Strategy {
    fn from(value: String) -> Self {
        match value.as_str() {
            "rule-based" => Self::RuleBased,
            "llm-based-simple" => Self::LlmBasedSimple,
            "llm-neurosymbolic" => Self::LlmNeurosymbolic,
            "concept-template" => Self::ConceptTemplate,
            "fast-to-g" => Self::FastToG,
            _ => Self::Custom(value),
        }
    }
}

impl From<&str> for Strategy {
    fn from(value: &str) -> Self {
        Self::from(value.to_string())
    }
}

impl From<Strategy> for String {
    fn from(value: Strategy) -> Self {
        match value {
            Strategy::Custom(name) => name,
            known => known.as_str().to_string(),
        }
    }
}

impl FromStr for Strategy {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from(s))
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
