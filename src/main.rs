#[tokio::main]
async fn main() -> anyhow::Result<()> {
    news_api::server::run().await
}
