#![allow(dead_code)]

use std::path::Path;
use std::process::{Child, Command, Stdio};
use std::sync::OnceLock;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use reqwest::StatusCode;
use serde_json::Value;

use news_api::config::AppConfig;
use news_api::database::seed::{seed, Fixtures};
use news_api::database::{PgStore, Store};

static SERVER: OnceLock<Option<TestServer>> = OnceLock::new();

pub struct TestServer {
    pub port: u16,
    pub base_url: String,
    client: reqwest::Client,
    child: Child,
}

impl TestServer {
    fn spawn() -> Result<Self> {
        // Pick an unused port for isolation
        let port = portpicker::pick_unused_port().context("failed to pick free port")?;
        let base_url = format!("http://127.0.0.1:{}", port);

        let mut cmd = Command::new(env!("CARGO_BIN_EXE_news-api"));
        cmd.env("NEWS_API_PORT", port.to_string())
            .env("HOST", "127.0.0.1")
            .stdin(Stdio::null())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit());

        // DATABASE_URL is inherited from the test environment
        let child = cmd.spawn().context("failed to spawn server binary")?;

        Ok(Self {
            port,
            base_url,
            client: reqwest::Client::new(),
            child,
        })
    }

    async fn wait_ready(&self, timeout: Duration) -> Result<()> {
        let deadline = Instant::now() + timeout;
        let url = self.url("/health");
        while Instant::now() < deadline {
            if let Ok(resp) = self.client.get(&url).send().await {
                if resp.status() == StatusCode::OK {
                    return Ok(());
                }
            }
            tokio::time::sleep(Duration::from_millis(150)).await;
        }
        anyhow::bail!("server did not become ready on {} within {:?}", self.base_url, timeout)
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub async fn get(&self, path: &str) -> Result<(StatusCode, Value)> {
        let resp = self.client.get(self.url(path)).send().await?;
        Ok((resp.status(), resp.json().await?))
    }

    pub async fn patch(&self, path: &str, body: &Value) -> Result<(StatusCode, Value)> {
        let resp = self.client.patch(self.url(path)).json(body).send().await?;
        Ok((resp.status(), resp.json().await?))
    }

    pub async fn post(&self, path: &str, body: &Value) -> Result<(StatusCode, Value)> {
        let resp = self.client.post(self.url(path)).json(body).send().await?;
        Ok((resp.status(), resp.json().await?))
    }

    pub async fn delete(&self, path: &str) -> Result<(StatusCode, Value)> {
        let resp = self.client.delete(self.url(path)).send().await?;
        Ok((resp.status(), resp.json().await?))
    }
}

/// Reload the bundled test fixtures. Runs on its own thread and runtime
/// because callers are already inside a tokio test runtime.
fn seed_database() -> Result<()> {
    std::thread::spawn(|| -> Result<()> {
        let runtime = tokio::runtime::Runtime::new()?;
        runtime.block_on(async {
            let dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("data/test-data");
            let fixtures = Fixtures::load(&dir)?;
            let store = PgStore::connect(&AppConfig::from_env().database).await?;
            let result = seed(store.pool(), &fixtures).await;
            store.close().await;
            result?;
            Ok::<(), anyhow::Error>(())
        })
    })
    .join()
    .map_err(|_| anyhow::anyhow!("seeding thread panicked"))?
}

/// Seeded database plus a running server, shared by every test in the binary.
/// `None` when DATABASE_URL is not set, in which case callers skip.
pub async fn ensure_server() -> Result<Option<&'static TestServer>> {
    let _ = dotenvy::dotenv();
    if std::env::var("DATABASE_URL").is_err() {
        eprintln!("DATABASE_URL not set; skipping integration test");
        return Ok(None);
    }

    let server = SERVER.get_or_init(|| {
        seed_database().expect("failed to seed test database");
        Some(TestServer::spawn().expect("failed to spawn server binary"))
    });

    match server {
        Some(server) => {
            server.wait_ready(Duration::from_secs(10)).await?;
            Ok(Some(server))
        }
        None => Ok(None),
    }
}
