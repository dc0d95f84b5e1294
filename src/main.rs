use clap::Parser;
use tracing_subscriber::EnvFilter;

use restdb_api::{cli::Cli, server, AppConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("restdb_api=info,tower_http=info")),
        )
        .init();

    let cli = Cli::parse();
    let config = AppConfig::default().with_cli(&cli);

    server::run(config).await
}
