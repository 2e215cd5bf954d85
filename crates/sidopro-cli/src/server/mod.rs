//! HTTP server: role-gated JSON views and the reverse-geocoding proxy.
//!
//! Every route sits behind [`guard::role_guard`], which resolves the `role`
//! cookie and redirects before a handler runs. Handlers read the store once
//! per request and answer with the serialized view model.

use anyhow::{Context, Result};
use axum::{middleware::from_fn_with_state, routing::get, Router};
use log::{error, info, warn};
use sidopro_core::{ProgressStore, RoleResolver, ServerConfig};
use tokio::{net::TcpListener, signal};

mod error;
mod guard;
mod routes;
mod state;


pub use state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(routes::home))
        .route("/admin", get(routes::admin_login))
        .route("/admin/reports", get(routes::report_table))
        .route("/admin/stages", get(routes::stage_list))
        .route("/dashboard", get(routes::progress_grid))
        .route("/dashboard/stages", get(routes::stage_list))
        .route("/api/geocode", get(routes::geocode))
        .fallback(routes::not_found)
        .layer(from_fn_with_state(state.clone(), guard::role_guard))
        .with_state(state)
}

pub async fn run_server(store: ProgressStore, config: ServerConfig) -> Result<()> {
    let resolver = RoleResolver::from_secret(config.session_secret.as_deref())
        .context("Invalid session secret")?;
    if !resolver.is_signed() {
        warn!("No session secret configured; role cookies are accepted unsigned");
    }

    let state = AppState::new(store, config.geocoder(), resolver);
    let app = build_router(state);

    let listener = TcpListener::bind(config.bind)
        .await
        .with_context(|| format!("Failed to bind {}", config.bind))?;
    info!("Server running on {}", config.bind);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server failed")?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        match signal::ctrl_c().await {
            Ok(()) => info!("Received Ctrl+C, shutting down"),
            Err(e) => {
                error!("Failed to listen for Ctrl+C: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                error!("Failed to install terminate handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
