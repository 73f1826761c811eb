use axum::{Router, http::Method};
use roomshare::api::{handlers::api_routes, openapi::ApiDoc};
use roomshare::config::CONFIG;
use roomshare::core::services::{RoomshareService, ServiceOptions};
use roomshare::infrastructure::{
    logging::in_memory::InMemoryLogging, preferences::in_memory::InMemoryPreferenceStore,
    storage::in_memory::InMemoryRecordStore,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use tracing::info;
use tracing_subscriber::EnvFilter;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing; `log` records from the library are forwarded too
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&CONFIG.log_level))
        .init();
    info!("Starting with {:?}", *CONFIG);

    let service = Arc::new(RoomshareService::new(
        InMemoryRecordStore::new(),
        InMemoryLogging::new(),
        InMemoryPreferenceStore::new(),
        ServiceOptions {
            jwt_secret: CONFIG.jwt_secret.clone(),
            store_timeout: CONFIG.store_timeout,
        },
    ));

    let app = Router::new()
        .nest("/api", api_routes(service))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(CompressionLayer::new()) // Gzip compression
        .layer(TimeoutLayer::new(CONFIG.request_timeout))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
                .allow_headers([http::header::CONTENT_TYPE, http::header::AUTHORIZATION]),
        )
        .layer(TraceLayer::new_for_http()); // Request tracing

    let addr = SocketAddr::from(([127, 0, 0, 1], CONFIG.port));
    info!("Server running at http://{}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
