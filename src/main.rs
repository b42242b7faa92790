use std::sync::{Arc, Mutex};

use tracing_subscriber::EnvFilter;

use receptionist::config::AppConfig;
use receptionist::db;
use receptionist::services::notify::webhook::WebhookNotifier;
use receptionist::services::notify::{DisabledNotifier, Notifier};
use receptionist::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = AppConfig::from_env();

    let conn = db::init_db(&config.database_url)?;
    db::seed::seed_defaults(&conn, &config)?;

    let notifier: Box<dyn Notifier> = if config.notify_webhook_url.is_empty() {
        tracing::warn!("NOTIFY_WEBHOOK_URL not set, booking notifications disabled");
        Box::new(DisabledNotifier)
    } else {
        tracing::info!("booking notifications via webhook (url: {})", config.notify_webhook_url);
        Box::new(WebhookNotifier::new(
            config.notify_webhook_url.clone(),
            config.notify_webhook_token.clone(),
        )?)
    };

    let state = Arc::new(AppState {
        db: Arc::new(Mutex::new(conn)),
        config: config.clone(),
        notifier,
    });

    let app = receptionist::router(state);

    let addr = format!("0.0.0.0:{}", config.port);
    tracing::info!("starting server on {addr}");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
