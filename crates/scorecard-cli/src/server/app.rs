//! Axum application setup.

use std::future::Future;
use std::net::SocketAddr;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};

use super::handlers;
use super::state::AppState;

/// Largest accepted upload.
const MAX_UPLOAD_BYTES: usize = 16 * 1024 * 1024;

/// Create the Axum router with all routes.
pub fn create_router(state: AppState) -> Router {
    // CORS configuration for local development
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // API routes
    let api_routes = Router::new()
        .route("/analyze", post(handlers::analyze_json))
        .route("/ping", post(handlers::ping));

    Router::new()
        .route("/", get(handlers::home).post(handlers::upload_page))
        .nest("/api", api_routes)
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .layer(cors)
        .with_state(state)
}

/// Start the web server and run until `shutdown` resolves.
pub async fn run_server<F>(
    state: AppState,
    port: u16,
    shutdown: F,
) -> Result<(), Box<dyn std::error::Error>>
where
    F: Future<Output = ()> + Send + 'static,
{
    let app = create_router(state);
    let addr = SocketAddr::from(([127, 0, 0, 1], port));

    log::info!("server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown)
    .await?;

    Ok(())
}
