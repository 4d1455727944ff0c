#[tokio::main]
async fn main() -> anyhow::Result<()> {
    contentgen_server::start().await
}
