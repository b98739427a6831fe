use slotwise_api::{app, state::AppState};
use slotwise_core::BookingService;
use slotwise_shared::SystemClock;
use slotwise_store::InMemoryPropertyStore;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "slotwise_api=debug,tower_http=debug,axum::rejection=trace".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = slotwise_store::app_config::Config::load().expect("Failed to load config");
    tracing::info!("Starting Slotwise API on port {}", config.server.port);

    let store = Arc::new(InMemoryPropertyStore::new());
    let clock = Arc::new(SystemClock);
    let service = Arc::new(BookingService::new(store, clock));

    let app_state = AppState { service };
    let app = app(app_state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}
