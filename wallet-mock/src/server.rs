//! Axum HTTP server setup and routing

use axum::{
    routing::{get, post},
    Router,
};
use std::net::SocketAddr;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::handlers::*;
use crate::types::routes;

pub fn create_router(state: AppState) -> Router {
    // Configure CORS to allow requests from browser frontends
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Health check
        .route("/health", get(health_check))

        // Wallet endpoints
        .route(routes::CREATE_WALLET, post(create_wallet))
        .route(routes::BALANCE, get(get_balance))
        .route(routes::UTXOS, get(list_utxos))
        .route(routes::DEPOSIT, post(deposit))
        .route(routes::WITHDRAW, post(withdraw))
        .route(routes::FAUCET, post(faucet))

        // Payment endpoints
        .route(routes::ESTIMATE, get(estimate_fee))
        .route(routes::SEND, post(send_payment))

        // Shared state
        .with_state(state)

        // Middleware
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

pub async fn run_server(state: AppState, host: String, port: u16) -> anyhow::Result<()> {
    let app = create_router(state);

    let addr = format!("{}:{}", host, port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    log::info!("🚀 Wallet mock server listening on http://{}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}

/// Serve on an ephemeral localhost port in the background
///
/// Returns the bound address; the server lives as long as the runtime.
pub async fn spawn_server(state: AppState) -> anyhow::Result<SocketAddr> {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    let app = create_router(state);

    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await {
            log::error!("Wallet mock server stopped: {}", e);
        }
    });

    log::debug!("Wallet mock server spawned on http://{}", addr);
    Ok(addr)
}
