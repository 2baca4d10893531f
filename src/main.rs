use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

use chat_relay::config::AppConfig;
use chat_relay::routes::configure_routes;
use chat_relay::state::AppState;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,chat_relay=debug")),
        )
        .init();

    let config = AppConfig::from_env()?;
    info!(?config, "loaded configuration");

    let state = Arc::new(AppState::from_config(&config)?);
    for route in state.routes() {
        info!("serving persona at /api/{}", route);
    }

    let routes = configure_routes(state);

    info!("Starting server on http://{}", config.bind_addr);
    warp::serve(routes).run(config.bind_addr).await;

    Ok(())
}
