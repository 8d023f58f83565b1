use anyhow::Context;
use vrd_config::VerdictConfig;

use crate::cli::GlobalFlags;

/// Load layered configuration (with `.env`) and apply global flag overrides.
pub fn load_config(flags: &GlobalFlags) -> anyhow::Result<VerdictConfig> {
    let config = VerdictConfig::load_with_dotenv().context("failed to load configuration")?;
    apply_overrides(config, flags)
}

fn apply_overrides(mut config: VerdictConfig, flags: &GlobalFlags) -> anyhow::Result<VerdictConfig> {
    if let Some(base_url) = &flags.base_url {
        config.api.base_url.clone_from(base_url);
        config
            .validate()
            .with_context(|| format!("invalid --base-url '{base_url}'"))?;
    }
    tracing::debug!(base_url = %config.api.base_url, "configuration loaded");
    Ok(config)
}
