use std::env;
use std::sync::Arc;

use parking_lot::RwLock;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::EnvFilter;

use ledger_api::InMemoryLedger;
use ledger_api::api;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse().unwrap()))
        .with_writer(std::io::stderr)
        .init();

    let addr = env::var("LISTEN_ADDR").unwrap_or_else(|_| "127.0.0.1:3000".to_string());

    let mut ledger = InMemoryLedger::new();
    // no signup surface in this service; seed a few ledgers to work against
    for user in 1..=3 {
        ledger.add_user(user);
    }

    let app = api::router(Arc::new(RwLock::new(ledger)))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let listener = TcpListener::bind(&addr)
        .await
        .expect("failed to bind listen address");
    info!(%addr, "listening");
    axum::serve(listener, app).await.expect("server error");
}
