#[tokio::main]
async fn main() -> anyhow::Result<()> {
    axura_client_lib::run().await
}
