//! Integration tests for TOML configuration loading.
//!
//! Uses figment::Jail for sandboxed files and env vars.

use figment::{
    Figment, Jail,
    providers::{Format, Serialized, Toml},
};
use vrd_config::VerdictConfig;
use vrd_core::enums::Strategy;

#[test]
fn loads_all_sections_from_toml() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[api]
base_url = "https://qa.example.com"
timeout_secs = 30

[runner]
concurrency = 8
default_strategy = "rule-based"

[chat]
default_strategy = "graph-rag"

[general]
recent_runs_limit = 50
"#,
        )?;

        let config: VerdictConfig = Figment::from(Serialized::defaults(VerdictConfig::default()))
            .merge(Toml::file("config.toml"))
            .extract()?;

        assert_eq!(config.api.base_url, "https://qa.example.com");
        assert_eq!(config.api.timeout_secs, 30);
        assert_eq!(config.runner.concurrency, 8);
        assert_eq!(config.runner.strategy(), Strategy::RuleBased);
        assert_eq!(config.chat.strategy(), Strategy::Custom("graph-rag".into()));
        assert_eq!(config.general.recent_runs_limit, 50);
        assert!(config.validate().is_ok());
        Ok(())
    });
}

#[test]
fn partial_toml_keeps_defaults() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[runner]
concurrency = 5
"#,
        )?;

        let config: VerdictConfig = Figment::from(Serialized::defaults(VerdictConfig::default()))
            .merge(Toml::file("config.toml"))
            .extract()?;

        assert_eq!(config.runner.concurrency, 5);
        assert_eq!(config.runner.strategy(), Strategy::LlmNeurosymbolic);
        assert_eq!(config.api.base_url, "http://localhost:8000");
        Ok(())
    });
}

#[test]
fn project_config_file_is_picked_up() {
    Jail::expect_with(|jail| {
        jail.create_dir(".verdict")?;
        jail.create_file(
            ".verdict/config.toml",
            r#"
[api]
base_url = "http://backend:9000"
"#,
        )?;

        let config = VerdictConfig::load().expect("config loads");
        assert_eq!(config.api.base_url, "http://backend:9000");
        Ok(())
    });
}
