use budeba_backend::app::app::App;
use budeba_backend::util::logger::Logger;
use dotenv::dotenv;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;


#[tokio::main]
async fn main() {
    // Load environment variables from .env file
    let dotenv_result = dotenv();

    let log_dir = std::env::var("LOG_DIR").unwrap_or_else(|_| "logs".to_string());
    let _logger = match Logger::new(&log_dir) {
        Ok(logger) => Some(logger),
        Err(e) => {
            // Console-only fallback
            let env_filter = EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info"));
            let _ = tracing_subscriber::fmt()
                .with_env_filter(env_filter)
                .with_target(true)
                .try_init();
            warn!("File logging unavailable: {}", e);
            None
        }
    };

    info!("🚀 Starting Budeba Backend Application");
    match dotenv_result {
        Ok(_) => info!("✅ Successfully loaded .env file"),
        Err(e) => warn!("⚠️ Failed to load .env file: {} (using system env vars)", e),
    }

    let app = match App::new().await {
        Ok(app) => app,
        Err(e) => {
            error!("Failed to start application: {}", e);
            std::process::exit(1);
        }
    };
    if let Err(e) = app.start().await {
        error!("Server stopped: {}", e);
        std::process::exit(1);
    }
}
