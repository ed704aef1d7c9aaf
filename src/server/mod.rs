pub mod handlers;
pub mod types;

use crate::{
    Error, Result,
    config::{Config, CorsConfig},
    model::{PricePredictor, artifacts},
};
use axum::{
    Router,
    http::{HeaderValue, Method},
    routing::post,
};
use std::{net::SocketAddr, sync::Arc};
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::info;

pub async fn run(config: Config) -> Result<()> {
    // Artifacts must load before the listener binds
    let predictor = artifacts::load(&config.artifacts).await?;

    let app = router(Arc::new(predictor), &config.cors)?;

    // Start server
    let addr = SocketAddr::new(config.server.host.parse()?, config.server.port);

    info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

pub fn router(predictor: Arc<PricePredictor>, cors: &CorsConfig) -> Result<Router> {
    let app_state = handlers::AppState { predictor };

    Ok(Router::new()
        .route("/predict", post(handlers::predict))
        .layer(cors_layer(cors)?)
        .layer(TraceLayer::new_for_http())
        .with_state(app_state))
}

pub fn cors_layer(cors: &CorsConfig) -> Result<CorsLayer> {
    let layer = CorsLayer::new().allow_headers(Any);

    if cors.allows_any_origin() {
        return Ok(layer.allow_origin(Any).allow_methods(Any));
    }

    let origins = cors
        .allowed_origins
        .iter()
        .map(|origin| {
            HeaderValue::from_str(origin)
                .map_err(|_| Error::config(format!("Invalid CORS origin: '{}'", origin)))
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(layer
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::POST, Method::OPTIONS]))
}
