use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[tokio::main]
async fn main() -> Result<(), lambda_http::Error> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    // CloudWatch renders escape codes literally.
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_ansi(false).without_time())
        .init();

    let path = std::env::var("GRAPHQL_PATH").unwrap_or_else(|_| "/graphql".to_string());
    let config = nearstay_server::config_from_env(0, &path)
        .map_err(|e| lambda_http::Error::from(format!("configuration failed: {e}")))?;
    nearstay_lambda::run_lambda(config).await
}
