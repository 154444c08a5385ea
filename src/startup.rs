//! Application startup and lifecycle management.
//!
//! Builds the router, selects the POS connector based on credential
//! presence, and binds the listener. The connector choice is made once
//! here and never re-evaluated per request.

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::handlers;
use crate::services::{
    InvoicesManager, NullConnector, PirposConnector, PosConnector, UsersManager,
};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub users: UsersManager,
    pub invoices: InvoicesManager,
}

/// Application container for managing server lifecycle.
pub struct Application {
    port: u16,
    listener: TcpListener,
    router: Router,
}

impl Application {
    /// Build the application with the given configuration.
    ///
    /// Fails fast when credentials are configured but the PirPOS token
    /// exchange is rejected; the service never runs with an
    /// unauthenticated remote connector.
    pub async fn build(config: Config) -> anyhow::Result<Self> {
        let connector: Arc<dyn PosConnector> = if config.pirpos.is_configured() {
            let connector = PirposConnector::connect(config.pirpos.clone()).await?;
            Arc::new(connector)
        } else {
            tracing::warn!("PirPOS credentials not found, using the null connector");
            Arc::new(NullConnector::new())
        };

        let state = AppState {
            config: config.clone(),
            users: UsersManager::new(connector.clone()),
            invoices: InvoicesManager::new(connector),
        };

        let router = Router::new()
            .route("/health", get(handlers::health_check))
            .route("/users/:document", get(handlers::users::get_user))
            .route(
                "/users",
                post(handlers::users::create_user).put(handlers::users::update_user),
            )
            .route(
                "/invoices/:prefix/:number",
                get(handlers::invoices::get_invoice),
            )
            .layer(TraceLayer::new_for_http())
            .with_state(state);

        // Bind here so tests can ask for port 0 and read the real port back.
        let addr = format!("{}:{}", config.server.host, config.server.port);
        let listener = TcpListener::bind(&addr).await?;
        let port = listener.local_addr()?.port();

        tracing::info!("pos-sync-service listening on {}:{}", config.server.host, port);

        Ok(Self {
            port,
            listener,
            router,
        })
    }

    /// Get the port the server is listening on.
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Run the application until stopped.
    pub async fn run_until_stopped(self) -> anyhow::Result<()> {
        axum::serve(self.listener, self.router).await?;
        Ok(())
    }
}
