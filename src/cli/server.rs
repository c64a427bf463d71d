use std::sync::Arc;

use anyhow::Result;
use weekmenu::{
    Config,
    auth::JwtAuthProvider,
    schedule::SqliteScheduleStore,
    server::{AppState, log_auth_events, router},
};
use weekmenu_navigation::{AuthProvider, NavigationContext, Navigator};

pub async fn serve(
    config: Config,
    host_override: Option<String>,
    port_override: Option<u16>,
) -> Result<()> {
    tracing::info!("Starting weekmenu server...");

    // Use CLI overrides if provided, otherwise use config
    let host = host_override.unwrap_or(config.server.host.to_owned());
    let port = port_override.unwrap_or(config.server.port);

    let read_pool =
        weekmenu::create_read_pool(&config.database.url, config.database.max_connections).await?;

    let auth = Arc::new(JwtAuthProvider::new(config.jwt.clone()));
    let store = Arc::new(SqliteScheduleStore::new(read_pool.clone()));

    // Observe auth state changes once, for the lifetime of the server
    let auth_events = log_auth_events(auth.on_auth_state_change());

    let navigator = Navigator::new(NavigationContext::new(auth, store));
    let app = router(AppState { navigator });

    let addr = format!("{}:{}", host, port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {}", listener.local_addr()?);

    let shutdown_signal = async {
        let ctrl_c = async {
            tokio::signal::ctrl_c()
                .await
                .expect("failed to install Ctrl+C handler");
        };

        #[cfg(unix)]
        let terminate = async {
            tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
                .expect("failed to install SIGTERM handler")
                .recv()
                .await;
        };

        #[cfg(not(unix))]
        let terminate = std::future::pending::<()>();

        tokio::select! {
            _ = ctrl_c => {
                tracing::info!("Received Ctrl+C signal");
            },
            _ = terminate => {
                tracing::info!("Received SIGTERM signal");
            },
        }

        tracing::info!("Starting graceful shutdown...");
    };

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal)
        .await?;

    auth_events.abort();

    tracing::info!("Closing database pool...");
    read_pool.close().await;

    tracing::info!("Graceful shutdown complete");

    Ok(())
}
