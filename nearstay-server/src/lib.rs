use axum::Router;
use nearstay_core::{GraphletteConfig, HotelResolver, RootConfig, ServerConfig};
use nearstay_dataapi::{DataApiConfig, DataApiResolver};
use nearstay_graphlette::{build_schema, GraphletteRouter, HOTELS_GRAPHQL};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tracing::info;

/// Hotel graphlette using the bundled schema and the standard query bindings.
pub fn hotel_graphlette(path: &str, resolver: Arc<dyn HotelResolver>) -> GraphletteConfig {
    GraphletteConfig {
        path: path.to_string(),
        schema_text: HOTELS_GRAPHQL.to_string(),
        root_config: RootConfig::standard(),
        resolver,
    }
}

/// ServerConfig backed by the Data API, with connection settings read from `DATA_API_*`.
pub fn config_from_env(port: u16, path: &str) -> anyhow::Result<ServerConfig> {
    let data_api = DataApiConfig::from_env()?;
    info!(
        "Using Data API at {} with query context {}",
        data_api.base_url, data_api.query_context
    );
    let resolver: Arc<dyn HotelResolver> = Arc::new(DataApiResolver::new(&data_api)?);
    Ok(ServerConfig {
        port,
        graphlettes: vec![hotel_graphlette(path, resolver)],
    })
}

/// Build the full Axum application from a ServerConfig.
pub async fn build_app(config: ServerConfig) -> anyhow::Result<Router> {
    let mut app = Router::new();

    for g in config.graphlettes {
        let schema = build_schema(&g.schema_text, &g.root_config, g.resolver)
            .map_err(|e| anyhow::anyhow!("Schema build error for {}: {:?}", g.path, e))?;
        info!("Serving GraphQL at {}", g.path);
        app = app.merge(GraphletteRouter::build(&g.path, schema));
    }

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Ok(app.layer(cors))
}

/// Start the server on the configured port.
pub async fn run(config: ServerConfig) -> anyhow::Result<()> {
    let port = config.port;
    let app = build_app(config).await?;
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{port}")).await?;
    info!("nearstay listening on port {port}");
    axum::serve(listener, app).await?;
    Ok(())
}
