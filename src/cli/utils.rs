use anyhow::Context;
use serde_json::{json, Value};

use crate::cli::OutputFormat;
use crate::config::DatabaseConfig;
use crate::database::PgStore;

/// Output a success message in the appropriate format
pub fn output_success(output_format: OutputFormat, message: &str, data: Option<Value>) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => {
            let mut response = json!({
                "success": true,
                "message": message
            });

            if let (Some(Value::Object(extra)), Some(object)) = (data, response.as_object_mut()) {
                object.extend(extra);
            }

            println!("{}", serde_json::to_string_pretty(&response)?);
        }
        OutputFormat::Text => {
            println!("✓ {}", message);
        }
    }
    Ok(())
}

/// Output an error message in the appropriate format
pub fn output_error(output_format: OutputFormat, message: &str) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => {
            let response = json!({
                "success": false,
                "error": message
            });
            println!("{}", serde_json::to_string_pretty(&response)?);
        }
        OutputFormat::Text => {
            eprintln!("Error: {}", message);
        }
    }
    Ok(())
}

/// Database settings from the environment, with `--database-url` taking precedence
pub fn database_config(database_url: Option<String>) -> DatabaseConfig {
    let mut config = crate::config::config().database.clone();
    if database_url.is_some() {
        config.url = database_url;
    }
    config
}

/// Open a pool, failing fast when the database is unreachable
pub async fn connect(database_url: Option<String>) -> anyhow::Result<PgStore> {
    let config = database_config(database_url);
    PgStore::connect(&config)
        .await
        .context("failed to connect to database (set DATABASE_URL or pass --database-url)")
}
