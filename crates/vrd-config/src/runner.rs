//! Test execution settings.

use serde::{Deserialize, Serialize};
use vrd_core::enums::Strategy;

use crate::ConfigError;

/// Default number of test cases in flight at once.
const fn default_concurrency() -> usize {
    3
}

fn default_strategy() -> String {
    Strategy::LlmNeurosymbolic.to_string()
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RunnerConfig {
    /// Maximum number of test cases executing concurrently.
    #[serde(default = "default_concurrency")]
    pub concurrency: usize,

    /// Strategy used when a run is started without one.
    #[serde(default = "default_strategy")]
    pub default_strategy: String,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            concurrency: default_concurrency(),
            default_strategy: default_strategy(),
        }
    }
}

impl RunnerConfig {
    #[must_use]
    pub fn strategy(&self) -> Strategy {
        Strategy::from(self.default_strategy.as_str())
    }

    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] if `concurrency` is zero.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.concurrency == 0 {
            return Err(ConfigError::InvalidValue {
                field: "runner.concurrency".to_string(),
                reason: "must be at least 1".to_string(),
            });
        }
        Ok(())
    }
}
