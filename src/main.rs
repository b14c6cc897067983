mod app;
mod config;
mod date_format;
mod db;
mod error;
mod state;
mod system;
mod users;

use crate::{config::AppConfig, state::AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let env_filter = std::env::var("RUST_LOG")
        .unwrap_or_else(|_| "usuarios=debug,axum=info,tower_http=info".to_string());
    let json_logs = std::env::var("LOG_FORMAT")
        .map(|v| v == "json")
        .unwrap_or(false);

    if json_logs {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_target(false)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(env_filter).init();
    }

    let config = AppConfig::from_env()?;
    tracing::debug!(
        ?config,
        secret_key_set = !config.secret_key.is_empty(),
        "configuration loaded"
    );
    let (host, port) = (config.host.clone(), config.port);

    let app_state = AppState::init(config);
    app::serve(app::build_app(app_state), &host, port).await
}
