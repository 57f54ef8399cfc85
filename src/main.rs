use daiki_sdk::app;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    app::main().await
}
