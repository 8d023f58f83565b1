use vrd_client::ApiClient;
use vrd_config::VerdictConfig;

/// Shared resources for command handlers.
pub struct AppContext {
    pub client: ApiClient,
    pub config: VerdictConfig,
}

impl AppContext {
    pub fn init(config: VerdictConfig) -> anyhow::Result<Self> {
        let client = ApiClient::new(&config.api)?;
        Ok(Self { client, config })
    }
}
