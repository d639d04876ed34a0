//! Web layer module
//!
//! Thin handlers over the catalog and identity services, with uniform
//! error mapping in [`responses`] and cross-cutting concerns in
//! [`middleware`].

use anyhow::{Context, Result};
use axum::{
    Router,
    routing::{get, post},
};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{
    auth::{DiscordProvider, IdentityProvider},
    config::Config,
    database::{
        Database,
        repositories::{
            ChannelSeaOrmRepository, DeviceSeaOrmRepository, SessionSeaOrmRepository,
            UserSeaOrmRepository,
        },
    },
    services::{CatalogService, IdentityService},
};

pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod openapi;
pub mod responses;

pub use responses::handle_error;

/// Shared state handed to every handler
#[derive(Clone)]
pub struct AppState {
    pub database: Database,
    pub config: Arc<Config>,
    pub catalog: CatalogService,
    pub identity: IdentityService,
    pub session_ttl: Duration,
    pub state_ttl: Duration,
}

impl AppState {
    /// Wire repositories and services over `database`.
    ///
    /// `provider` is `None` when login is not configured.
    pub fn new(
        config: Config,
        database: Database,
        provider: Option<Arc<dyn IdentityProvider>>,
    ) -> Result<Self> {
        let session_ttl = config.auth.session_ttl()?;
        let state_ttl = config.auth.state_ttl()?;
        let connection = database.connection();

        let catalog = CatalogService::new(
            Arc::new(ChannelSeaOrmRepository::new(connection.clone())),
            Arc::new(DeviceSeaOrmRepository::new(connection.clone())),
            config.catalog.default_device_name.clone(),
        );
        let identity = IdentityService::new(
            Arc::new(UserSeaOrmRepository::new(connection.clone())),
            Arc::new(SessionSeaOrmRepository::new(connection)),
            provider,
            session_ttl,
        );

        Ok(Self {
            database,
            config: Arc::new(config),
            catalog,
            identity,
            session_ttl,
            state_ttl,
        })
    }

    /// State using the Discord provider derived from `config.auth`
    pub fn from_config(config: Config, database: Database) -> Result<Self> {
        let provider = DiscordProvider::from_config(&config.auth, &config.web.base_url)
            .map(|p| Arc::new(p) as Arc<dyn IdentityProvider>);
        if let Some(provider) = &provider {
            tracing::info!(provider = provider.name(), "Login enabled");
        }
        let state = Self::new(config, database, provider)?;
        if !state.identity.login_enabled() {
            tracing::warn!("auth.client_id is not set; login and device linking are unavailable");
        }
        Ok(state)
    }
}

/// Web server configuration and setup
pub struct WebServer {
    app: Router,
    addr: SocketAddr,
}

impl WebServer {
    pub fn new(state: AppState) -> Result<Self> {
        let addr: SocketAddr = format!("{}:{}", state.config.web.host, state.config.web.port)
            .parse()
            .context("Invalid web.host / web.port")?;
        Ok(Self {
            app: create_router(state),
            addr,
        })
    }

    /// Serve until SIGINT/SIGTERM, reporting bind success or failure on `ready_signal`
    pub async fn serve_with_signal(
        self,
        ready_signal: tokio::sync::oneshot::Sender<Result<()>>,
    ) -> Result<()> {
        match tokio::net::TcpListener::bind(&self.addr).await {
            Ok(listener) => {
                let _ = ready_signal.send(Ok(()));

                axum::serve(listener, self.app)
                    .with_graceful_shutdown(shutdown_signal())
                    .await?;
                Ok(())
            }
            Err(bind_error) => {
                let bind_err_msg = format!("Failed to bind to {}: {}", self.addr, bind_error);
                let _ = ready_signal.send(Err(anyhow::anyhow!("{}", bind_err_msg)));
                Err(anyhow::anyhow!("{}", bind_err_msg))
            }
        }
    }

    pub fn addr(&self) -> SocketAddr {
        self.addr
    }
}

async fn shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{SignalKind, signal};
        match (
            signal(SignalKind::terminate()),
            signal(SignalKind::interrupt()),
        ) {
            (Ok(mut sigterm), Ok(mut sigint)) => {
                tokio::select! {
                    _ = sigterm.recv() => {
                        tracing::info!("Received SIGTERM, shutting down gracefully");
                    }
                    _ = sigint.recv() => {
                        tracing::info!("Received SIGINT (Ctrl+C), shutting down gracefully");
                    }
                }
            }
            _ => {
                tracing::error!("Failed to install signal handlers; graceful shutdown disabled");
                std::future::pending::<()>().await;
            }
        }
    }

    #[cfg(not(unix))]
    {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
        tracing::info!("Received Ctrl+C, shutting down gracefully");
    }
}

/// Create the router with all routes and middleware
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health check endpoints
        .route("/health", get(handlers::health::health_check))
        .route("/ready", get(handlers::health::readiness_check))
        .route("/live", get(handlers::health::liveness_check))
        .merge(openapi_routes())
        .merge(api_routes())
        // Middleware (applied in reverse order)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .layer(axum::middleware::from_fn(
            middleware::security_headers_middleware,
        ))
        .layer(axum::middleware::from_fn(
            middleware::request_logging_middleware,
        ))
        .with_state(state)
}

fn openapi_routes() -> Router<AppState> {
    use utoipa_swagger_ui::SwaggerUi;

    Router::new().merge(SwaggerUi::new("/docs").url("/api/openapi.json", openapi::openapi_spec()))
}

fn api_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/api/channels",
            get(handlers::channels::list_channels).post(handlers::channels::create_channel),
        )
        .route(
            "/api/channels/{id}",
            get(handlers::channels::get_channel)
                .put(handlers::channels::update_channel)
                .delete(handlers::channels::delete_channel),
        )
        .route(
            "/api/playlist.m3u",
            get(handlers::playlist::export_playlist),
        )
        .route("/api/devices", get(handlers::devices::list_devices))
        .route("/api/devices/link", post(handlers::devices::link_device))
        .route("/api/auth/login", get(handlers::auth::login))
        .route("/api/auth/callback", get(handlers::auth::callback))
        .route("/api/callback", get(handlers::auth::callback))
        .route("/api/me", get(handlers::auth::me))
        .route("/api/auth/logout", post(handlers::auth::logout))
}
