use std::path::PathBuf;

use anyhow::Context;
use serde_json::json;

use crate::cli::utils::{connect, output_success};
use crate::cli::OutputFormat;
use crate::database::seed::{seed, Fixtures};
use crate::database::Store;

pub async fn handle(data_dir: PathBuf, database_url: Option<String>, output_format: OutputFormat) -> anyhow::Result<()> {
    // Parse every fixture before touching the database
    let fixtures = Fixtures::load(&data_dir)
        .with_context(|| format!("failed to load fixtures from {}", data_dir.display()))?;

    let store = connect(database_url).await?;
    let result = seed(store.pool(), &fixtures).await;
    store.close().await;
    let summary = result.context("seeding failed")?;

    let message = format!(
        "Seeded {} topics, {} users, {} articles, {} comments from {}",
        summary.topics,
        summary.users,
        summary.articles,
        summary.comments,
        data_dir.display()
    );
    output_success(output_format, &message, Some(json!({ "seeded": summary })))
}
