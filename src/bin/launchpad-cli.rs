use clap::Parser;
use tracing_subscriber::EnvFilter;

use launchpad::cli::Cli;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(err) = Cli::parse().execute().await {
        eprintln!("Error: {}", err);
        std::process::exit(1);
    }
}
