use std::time::Instant;

use serde_json::json;

use crate::cli::utils::{connect, output_error, output_success};
use crate::cli::OutputFormat;
use crate::database::Store;

pub async fn handle(database_url: Option<String>, output_format: OutputFormat) -> anyhow::Result<()> {
    let started = Instant::now();
    let store = connect(database_url).await?;
    let result = store.health_check().await;
    store.close().await;

    match result {
        Ok(()) => {
            let elapsed_ms = started.elapsed().as_millis() as u64;
            output_success(
                output_format,
                &format!("Database reachable ({} ms)", elapsed_ms),
                Some(json!({ "elapsed_ms": elapsed_ms })),
            )
        }
        Err(e) => {
            output_error(output_format, &format!("database check failed: {}", e))?;
            anyhow::bail!("database check failed")
        }
    }
}
