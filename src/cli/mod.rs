use clap::Parser;

#[derive(Debug, Parser)]
#[command(name = "restdb-api")]
#[command(about = "REST endpoint layer for user accounts")]
#[command(version)]
pub struct Cli {
    #[arg(help = "Port to listen on (default 1234)")]
    pub port: Option<u16>,
}
