use anyhow::Context;
use serde_json::json;

use crate::cli::utils::connect;
use crate::cli::OutputFormat;
use crate::database::Store;

pub async fn handle(database_url: Option<String>, output_format: OutputFormat) -> anyhow::Result<()> {
    let store = connect(database_url).await?;
    let result = store.list_tables().await;
    store.close().await;
    let tables = result.context("failed to list tables")?;

    match output_format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&json!({ "tables": tables }))?);
        }
        OutputFormat::Text => {
            if tables.is_empty() {
                println!("No tables found");
            }
            for table in &tables {
                println!("{}.{}", table.schemaname, table.tablename);
            }
        }
    }
    Ok(())
}
