/*****************************************************************************************
 *
 *  PriceDB – In-memory item/price store over HTTP
 *  -----------------------------------------------
 *
 *  /create, /read, /update, /delete keyed by item name. Nothing is persisted.
 *
 *****************************************************************************************/

mod app;
mod config;
mod errors;
mod routes;
mod services;
mod state;

use std::net::SocketAddr;
use std::process::ExitCode;

use axum::serve;
use tokio::net::TcpListener;

use tracing::level_filters::LevelFilter;
use tracing_subscriber::FmtSubscriber;

use crate::config::AppConfig;
use crate::state::item::new_store;

/// The service always listens on this port, on every interface.
const LISTEN_PORT: u16 = 8080;

#[tokio::main]
async fn main() -> ExitCode {
    //
    // ────────────────────────────────────────────────────────
    //  Load configuration (config.json is optional)
    // ────────────────────────────────────────────────────────
    //
    let (cfg, config_path) = match AppConfig::locate_and_load() {
        Ok(loaded) => loaded,
        Err(e) => {
            // Logging is not configured yet.
            eprintln!("Error loading configuration: {e}");
            return ExitCode::FAILURE;
        }
    };

    //
    // ────────────────────────────────────────────────────────
    //  Configure logging
    // ────────────────────────────────────────────────────────
    //
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level_filter(&cfg.log_level))
        .finish();

    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set tracing subscriber: {e}");
        return ExitCode::FAILURE;
    }

    match &config_path {
        Some(path) => tracing::info!("Loaded config.json from {}", path.display()),
        None => tracing::info!("No config.json found, using defaults"),
    }
    tracing::info!("Loaded configuration: {:?}", cfg);

    //
    // ────────────────────────────────────────────────────────
    //  Create the store and build the app
    // ────────────────────────────────────────────────────────
    //
    let store = new_store();
    let app = app::build_app(store, cfg);

    //
    // ────────────────────────────────────────────────────────
    //  Bind server and start listening
    // ────────────────────────────────────────────────────────
    //
    let addr = SocketAddr::from(([0, 0, 0, 0], LISTEN_PORT));
    let listener = match TcpListener::bind(addr).await {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!("Error starting server on {}: {}", addr, e);
            return ExitCode::FAILURE;
        }
    };

    tracing::info!("Server started at http://{}", addr);

    if let Err(e) = serve(listener, app).await {
        tracing::error!("Server error: {}", e);
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}

fn level_filter(level: &str) -> LevelFilter {
    match level.to_lowercase().as_str() {
        "trace" => LevelFilter::TRACE,
        "debug" => LevelFilter::DEBUG,
        "info" => LevelFilter::INFO,
        "warn" => LevelFilter::WARN,
        "error" => LevelFilter::ERROR,
        _ => LevelFilter::INFO,
    }
}
