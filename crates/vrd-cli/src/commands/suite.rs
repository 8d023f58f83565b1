use anyhow::Context;
use chrono::{DateTime, Utc};
use serde::Serialize;
use vrd_core::entities::TestSuite;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::SuiteCommands;
use crate::context::AppContext;
use crate::output::output;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SuiteSummary {
    id: String,
    name: String,
    description: String,
    cases: usize,
    updated_at: DateTime<Utc>,
}

impl From<&TestSuite> for SuiteSummary {
    fn from(suite: &TestSuite) -> Self {
        Self {
            id: suite.id.clone(),
            name: suite.name.clone(),
            description: suite.description.clone(),
            cases: suite.test_cases.len(),
            updated_at: suite.updated_at,
        }
    }
}

/// Look up a suite or fail with a user-facing message.
pub async fn require_suite(ctx: &AppContext, suite_id: &str) -> anyhow::Result<TestSuite> {
    ctx.client
        .find_suite(suite_id)
        .await?
        .with_context(|| format!("test suite '{suite_id}' not found"))
}

/// Handle `vrd suite`.
pub async fn handle(action: &SuiteCommands, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    match action {
        SuiteCommands::List => {
            let suites = ctx.client.list_suites().await?;
            let rows = suites.iter().map(SuiteSummary::from).collect::<Vec<_>>();
            output(&rows, flags.format)
        }
        SuiteCommands::Show { id } => {
            let suite = require_suite(ctx, id).await?;
            output(&suite, flags.format)
        }
        SuiteCommands::Create { name, description } => {
            let suite = ctx.client.create_suite(name, description).await?;
            tracing::info!(suite_id = %suite.id, "created test suite");
            output(&suite, flags.format)
        }
        SuiteCommands::Update {
            id,
            name,
            description,
        } => {
            let current = require_suite(ctx, id).await?;
            let suite = ctx
                .client
                .update_suite(
                    id,
                    name.as_deref().unwrap_or(&current.name),
                    description.as_deref().unwrap_or(&current.description),
                )
                .await?;
            output(&suite, flags.format)
        }
        SuiteCommands::Delete { id } => {
            ctx.client.delete_suite(id).await?;
            output(&serde_json::json!({ "deleted": id }), flags.format)
        }
    }
}
