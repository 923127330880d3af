mod action;
mod app;
mod app_state;
mod component;
mod components;
mod http;
mod theme;
mod widgets;

use std::sync::Arc;

use tokio::sync::mpsc;

use babeo_core::chat::ChatGateway;
use babeo_core::config::Config;
use babeo_core::content::ContentStore;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let data_dir = babeo_core::platform::data_dir();
    std::fs::create_dir_all(&data_dir)?;

    let log_path = data_dir.join("babeo.log");
    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)?;

    // Allow RUST_LOG override; keep HTTP client internals quiet by default.
    let log_filter = std::env::var("RUST_LOG")
        .unwrap_or_else(|_| "debug,hyper_util=warn,reqwest=warn,hyper=warn".to_string());
    tracing_subscriber::fmt()
        .with_writer(log_file)
        .with_env_filter(log_filter.as_str())
        .with_ansi(false)
        .init();

    // Print log path to stderr so the operator can tail it immediately.
    eprintln!("babeo log: {}", log_path.display());

    tracing::info!("babeo starting…");

    // ── Load config ──────────────────────────────────────────────────────────
    let config = Config::load().unwrap_or_else(|e| {
        tracing::warn!("config load failed, using defaults: {:#}", e);
        Config::default()
    });

    // ── Content (fails fast on invalid fixtures) ─────────────────────────────
    let store = Arc::new(ContentStore::load(&config.content)?);
    tracing::info!(
        "content loaded: {} episodes, {} categories, {} articles",
        store.episodes().len(),
        store.categories().len(),
        store.articles().len()
    );

    let gateway = ChatGateway::from_config(&config.chat);

    // ── Channels (HTTP/keys/chat → App, ticker → App) ────────────────────────
    let (app_tx, app_rx) = mpsc::channel::<app::AppMessage>(256);
    let (tick_tx, tick_rx) = mpsc::channel(64);
    let shared = http::SharedViewHandle::default();

    // ── HTTP server ──────────────────────────────────────────────────────────
    if config.http.enabled {
        http::start_server(
            config.http.bind_address.clone(),
            config.http.port,
            http::HttpState {
                store: store.clone(),
                gateway: gateway.clone(),
                view: shared.clone(),
                app_tx: app_tx.clone(),
            },
        );
    }

    // ── Run TUI ──────────────────────────────────────────────────────────────
    let app = app::App::new(store, gateway, shared, app_tx, tick_tx);
    app.run(app_rx, tick_rx).await?;

    Ok(())
}
