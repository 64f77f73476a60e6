#[tokio::main]
async fn main() -> anyhow::Result<()> {
    faqrelay_server::start().await
}
