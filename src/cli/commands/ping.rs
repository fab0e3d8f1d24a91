use std::time::Duration;

use anyhow::Context;
use serde_json::Value;

use crate::cli::utils::{output_error, output_success};
use crate::cli::OutputFormat;

/// Base URL of the locally configured server
fn default_url() -> String {
    format!("http://127.0.0.1:{}", crate::config::config().server.port)
}

fn health_url(base: &str) -> String {
    format!("{}/health", base.trim_end_matches('/'))
}

pub async fn handle(url: Option<String>, output_format: OutputFormat) -> anyhow::Result<()> {
    let base = url.unwrap_or_else(default_url);
    let target = health_url(&base);

    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(5))
        .build()
        .context("failed to build HTTP client")?;

    let response = client
        .get(&target)
        .send()
        .await
        .with_context(|| format!("failed to reach {}", target))?;
    let status = response.status();
    let body: Value = response.json().await.unwrap_or(Value::Null);

    if status.is_success() {
        output_success(output_format, &format!("{} is healthy", base), Some(body))
    } else {
        output_error(output_format, &format!("{} responded {}", base, status))?;
        anyhow::bail!("server unhealthy")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn health_url_tolerates_trailing_slash() {
        assert_eq!(health_url("http://localhost:9090/"), "http://localhost:9090/health");
        assert_eq!(health_url("http://localhost:9090"), "http://localhost:9090/health");
    }
}
