#[tokio::main]
async fn main() -> anyhow::Result<()> {
    launchpad::bootstrapper::run().await
}
