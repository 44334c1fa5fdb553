use std::net::SocketAddr;
use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use wirekit_core::persistence::file::JsonFilePersistence;
use wirekit_core::persistence::memory::MemoryPersistence;
use wirekit_core::persistence::Persistence;
use wirekit_core::store::BuilderStore;
use wirekit_export::{EmbeddedStylesheet, FileStylesheet, StylesheetProvider};

use wirekit_api::config::{PersistenceBackend, ServerConfig};
use wirekit_api::router::build_app_router;
use wirekit_api::state::AppState;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "wirekit_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // --- Configuration ---
    let config = ServerConfig::from_env();
    tracing::info!(host = %config.host, port = %config.port, "Loaded server configuration");

    // --- Persistence ---
    let persistence = open_persistence(&config.persistence).await;

    // --- Export stylesheet ---
    let stylesheet: Arc<dyn StylesheetProvider> = match &config.export_stylesheet {
        Some(path) => {
            tracing::info!(path = %path.display(), "Using export stylesheet from file");
            Arc::new(FileStylesheet::new([path.clone()]))
        }
        None => Arc::new(EmbeddedStylesheet),
    };

    // --- App state ---
    let state = AppState {
        store: Arc::new(BuilderStore::new(persistence)),
        config: Arc::new(config.clone()),
        stylesheet,
    };

    let app = build_app_router(state, &config);

    // --- Start server ---
    let addr = SocketAddr::new(
        config.host.parse().expect("Invalid HOST address"),
        config.port,
    );
    tracing::info!(%addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");

    tracing::info!("Graceful shutdown complete");
}

/// Open the configured persistence backend. Startup fails fast on any error.
async fn open_persistence(backend: &PersistenceBackend) -> Arc<dyn Persistence> {
    match backend {
        PersistenceBackend::Postgres { database_url } => {
            let pool = wirekit_db::create_pool(database_url)
                .await
                .expect("Failed to connect to database");
            tracing::info!("Database connection pool created");

            wirekit_db::health_check(&pool)
                .await
                .expect("Database health check failed");
            tracing::info!("Database health check passed");

            wirekit_db::run_migrations(&pool)
                .await
                .expect("Failed to run database migrations");
            tracing::info!("Database migrations applied");

            Arc::new(wirekit_db::PgPersistence::new(pool))
        }
        PersistenceBackend::File { path } => {
            let persistence = JsonFilePersistence::open(path.clone())
                .await
                .expect("Failed to open data file");
            tracing::info!(path = %path.display(), "Using JSON file persistence");
            Arc::new(persistence)
        }
        PersistenceBackend::Memory => {
            tracing::warn!("Using in-memory persistence; data is lost on restart");
            Arc::new(MemoryPersistence::new())
        }
    }
}

/// Wait for a termination signal to initiate graceful shutdown.
///
/// Handles both SIGINT (Ctrl-C) and SIGTERM (on Unix).
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl-C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received SIGINT (Ctrl-C), starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}
