use nearstay_core::ServerConfig;

/// Run the hotel search service inside an AWS Lambda runtime.
///
/// Builds the same axum Router as the standalone server and hands it to
/// `lambda_http`, which translates API Gateway events.
pub async fn run_lambda(config: ServerConfig) -> Result<(), lambda_http::Error> {
    let app = nearstay_server::build_app(config)
        .await
        .map_err(|e| lambda_http::Error::from(format!("build_app failed: {e}")))?;
    tracing::info!("Lambda runtime starting");
    lambda_http::run(app).await
}
