use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "nearstay", version, about = "Hotels near an airport, over GraphQL")]
struct Cli {
    /// Port to listen on
    #[arg(long, env = "PORT", default_value_t = 3000)]
    port: u16,

    /// Path the GraphQL endpoint is mounted at
    #[arg(long, env = "GRAPHQL_PATH", default_value = "/graphql")]
    path: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer())
        .init();

    let cli = Cli::parse();
    let config = nearstay_server::config_from_env(cli.port, &cli.path)?;
    nearstay_server::run(config).await
}
