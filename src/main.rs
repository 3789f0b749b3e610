use log::{error, info};
use service::{config::Config, logging::Logger, AppState};
use std::sync::Arc;

#[tokio::main]
async fn main() {
    let config = Config::new();
    Logger::init_logger(&config);

    info!(
        "Starting swim school platform [{}] with API version {}",
        config.runtime_env(),
        config.api_version()
    );

    let db = match service::init_database(&config).await {
        Ok(db) => Arc::new(db),
        Err(e) => {
            error!("Failed to establish database connection: {e}");
            std::process::exit(1);
        }
    };

    let app_state = AppState::new(config, &db);

    if let Err(e) = web::init_server(app_state).await {
        error!("Server terminated: {e}");
        std::process::exit(1);
    }
}
