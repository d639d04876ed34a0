use anyhow::Result;
use clap::Parser;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use iptv_catalog::{
    config::Config,
    database::Database,
    services::seed::default_channels,
    web::{AppState, WebServer},
};

#[derive(Parser)]
#[command(name = "iptv-catalog")]
#[command(version)]
#[command(about = "Personal IPTV channel catalog with M3U export and device linking")]
#[command(long_about = None)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, default_value = "config.toml")]
    config: String,

    /// Listening IP address
    #[arg(short = 'H', long, value_name = "IP")]
    host: Option<String>,

    /// Listening port
    #[arg(short, long, value_name = "PORT")]
    port: Option<u16>,

    /// Database URL (overrides config file)
    #[arg(short = 'd', long, value_name = "URL")]
    database_url: Option<String>,

    /// Log level
    #[arg(short = 'v', long, default_value = "info")]
    log_level: String,

    /// Emit logs as JSON lines
    #[arg(long)]
    log_json: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_filter = if cli.log_level == "trace" {
        format!("iptv_catalog={},tower_http=trace", cli.log_level)
    } else {
        format!("iptv_catalog={}", cli.log_level)
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| log_filter.into()),
        )
        .with(cli.log_json.then(|| tracing_subscriber::fmt::layer().json()))
        .with((!cli.log_json).then(tracing_subscriber::fmt::layer))
        .init();

    info!("Starting IPTV Catalog v{}", env!("CARGO_PKG_VERSION"));

    let mut config = Config::load_from_file(&cli.config)?;
    info!("Configuration loaded from: {}", cli.config);

    if let Some(host) = cli.host {
        config.web.host = host;
    }
    if let Some(port) = cli.port {
        config.web.port = port;
    }
    if let Some(database_url) = cli.database_url {
        config.database.url = database_url;
    }

    let database = Database::new(&config.database).await?;
    database.migrate().await?;
    info!(
        database = database.database_type().as_str(),
        "Database connection established and migrations applied"
    );

    let seed_defaults = config.catalog.seed_defaults;
    let state = AppState::from_config(config, database)?;

    if seed_defaults {
        state.catalog.seed_if_empty(default_channels()).await?;
    }

    let web_server = WebServer::new(state)?;
    let bind_addr = web_server.addr();

    let (server_ready_tx, server_ready_rx) = tokio::sync::oneshot::channel();
    let server_handle = tokio::spawn(async move {
        if let Err(e) = web_server.serve_with_signal(server_ready_tx).await {
            tracing::error!("Web server failed: {}", e);
        }
    });

    match server_ready_rx.await {
        Ok(Ok(())) => {
            info!("Web server listening on http://{}", bind_addr);
        }
        Ok(Err(bind_error)) => {
            tracing::error!("Failed to bind web server: {}", bind_error);
            return Err(bind_error);
        }
        Err(_) => {
            tracing::error!("Web server task completed without signaling");
            return Err(anyhow::anyhow!("Web server failed to start"));
        }
    }

    server_handle.await?;
    info!("Shutdown complete");
    Ok(())
}
