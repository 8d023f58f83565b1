use serde::Serialize;
use vrd_core::enums::Strategy;

use crate::cli::GlobalFlags;
use crate::output::output;

#[derive(Debug, Serialize)]
struct StrategyRow {
    name: String,
    label: String,
}

/// Handle `vrd strategies`.
pub fn handle(flags: &GlobalFlags) -> anyhow::Result<()> {
    let rows = Strategy::KNOWN
        .iter()
        .map(|strategy| StrategyRow {
            name: strategy.as_str().to_string(),
            label: strategy.label().to_string(),
        })
        .collect::<Vec<_>>();
    output(&rows, flags.format)
}
