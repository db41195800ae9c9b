use axum::{
    extract::DefaultBodyLimit,
    routing::get,
    Router,
};
use configuration::Config;
use database::StudentRepository;
use registry::Registry;
use database::SqlitePool;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

pub mod error;
pub mod flash;
pub mod handlers;
pub mod views;

/// The shared application state that all handlers can access.
#[derive(Clone)]
pub struct AppState {
    pub registry: Registry,
}

impl AppState {
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            registry: Registry::new(StudentRepository::new(pool)),
        }
    }
}

/// Builds the router for the student pages.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/health", get(|| async { "OK" }))
        .route(
            "/register",
            get(handlers::register_form).post(handlers::register_submit),
        )
        .route("/view/:id", get(handlers::view_student))
        .route(
            "/update/:id",
            get(handlers::update_form).post(handlers::update_submit),
        )
        .route("/delete/:id", get(handlers::delete_student))
        .fallback(handlers::not_found)
        .with_state(state)
        // This middleware will automatically log information about every incoming request.
        .layer(TraceLayer::new_for_http())
        .layer(DefaultBodyLimit::max(64 * 1024))
}

/// Opens the database, applies migrations and serves until Ctrl-C.
///
/// Tracing must already be initialized by the caller.
pub async fn run_server(config: &Config) -> anyhow::Result<()> {
    let addr = config.server.socket_addr()?;

    let pool = database::connect(&config.database).await?;
    database::run_migrations(&pool).await?;

    let app = router(Arc::new(AppState::new(pool.clone())));

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Web server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    pool.close().await;
    tracing::info!("Web server stopped.");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for the shutdown signal.");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received.");
}
