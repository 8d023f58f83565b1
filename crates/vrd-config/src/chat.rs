//! Chat settings.

use serde::{Deserialize, Serialize};
use vrd_core::enums::Strategy;

fn default_strategy() -> String {
    Strategy::FastToG.to_string()
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ChatConfig {
    /// Strategy used for chat messages unless overridden per message.
    #[serde(default = "default_strategy")]
    pub default_strategy: String,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            default_strategy: default_strategy(),
        }
    }
}

impl ChatConfig {
    #[must_use]
    pub fn strategy(&self) -> Strategy {
        Strategy::from(self.default_strategy.as_str())
    }
}
