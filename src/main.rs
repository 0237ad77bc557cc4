use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use leafsense::{api, config, state};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .init();

    tracing::info!("{} starting v{}", config::APP_NAME, config::APP_VERSION);

    let cfg = config::Config::from_env();
    let app_state = Arc::new(state::AppState::initialize(&cfg));

    if !app_state.ready() {
        // Startup resource failures block readiness, not the process: the
        // server still answers /health with 503 so orchestrators can see why.
        tracing::error!("classifier resources failed to load; serving 503 until restart");
    }

    if let Err(e) = api::server::serve(app_state, &cfg.bind_addr).await {
        tracing::error!("server error: {e}");
        std::process::exit(1);
    }
}
