//! General application configuration.

use serde::{Deserialize, Serialize};

/// Default number of recent runs shown in history.
const fn default_recent_runs_limit() -> u32 {
    20
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GeneralConfig {
    /// Number of runs listed under "recent" in run history.
    #[serde(default = "default_recent_runs_limit")]
    pub recent_runs_limit: u32,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            recent_runs_limit: default_recent_runs_limit(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_correct() {
        assert_eq!(GeneralConfig::default().recent_runs_limit, 20);
    }
}
