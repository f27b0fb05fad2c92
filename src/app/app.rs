use axum::{Router, http::StatusCode, routing::get, middleware};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_cookies::CookieManagerLayer;
use tracing::{error, info, warn};
use crate::config::{AdminConfig, AppConfig, EmailConfig, MongoConfig, StoreBackend};
use crate::middlewares::admin_middleware::admin_gate;
use crate::repository::memory_quote_repo::InMemoryQuoteRepository;
use crate::repository::quote_repo::{MongoQuoteRepository, QuoteRepository};
use crate::router::auth_router::auth_router;
use crate::router::quote_router::quote_router;
use crate::service::auth_service::AdminAuthService;
use crate::service::quote_service::QuoteServiceImpl;
use crate::util::email::{DisabledNotifier, QuoteNotifier, SmtpEmailService};

#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    #[error("configuration error: {0}")]
    Config(#[from] crate::config::ConfigError),
    #[error("database error: {0}")]
    Database(#[from] mongodb::error::Error),
    #[error("server error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid listen address: {0}")]
    Address(#[from] std::net::AddrParseError),
}

/// Full HTTP surface: quote intake, admin API, session endpoints and the
/// `/admin` gate in front of all of them.
pub fn build_router(quote_service: Arc<QuoteServiceImpl>, auth_service: Arc<AdminAuthService>) -> Router {
    Router::new()
        .merge(quote_router(quote_service))
        .merge(auth_router(auth_service))
        .route("/health", get(|| async { "OK" }))
        .fallback(|| async { (StatusCode::NOT_FOUND, "Not Found") })
        .layer(middleware::from_fn(admin_gate))
        .layer(CookieManagerLayer::new())
}

pub struct App {
    config: AppConfig,
    router: Router,
}

impl App {
    pub async fn new() -> Result<Self, StartupError> {
        let config = AppConfig::from_env()?;

        let quote_repo: Arc<dyn QuoteRepository> = match config.store {
            StoreBackend::Mongo => {
                let mongo_config = MongoConfig::from_env()?;
                Arc::new(MongoQuoteRepository::new(&mongo_config).await?)
            }
            StoreBackend::Memory => {
                warn!("Using in-memory quote store, submissions are lost on restart");
                Arc::new(InMemoryQuoteRepository::new())
            }
        };

        let quote_service = Arc::new(QuoteServiceImpl::new(quote_repo, Self::notifier()));
        let auth_service = Arc::new(AdminAuthService::new(AdminConfig::from_env()));

        let router = build_router(quote_service, auth_service);
        Ok(App { config, router })
    }

    // Email is advisory: without a working configuration quotes are still accepted.
    fn notifier() -> Arc<dyn QuoteNotifier> {
        let email = EmailConfig::from_env()
            .map_err(|e| e.to_string())
            .and_then(|config| SmtpEmailService::new(config).map_err(|e| e.to_string()));
        match email {
            Ok(service) => Arc::new(service),
            Err(reason) => {
                error!("Email notifications disabled: {reason}");
                Arc::new(DisabledNotifier { reason })
            }
        }
    }

    pub async fn start(self) -> Result<(), StartupError> {
        let addr = SocketAddr::new(self.config.host.parse()?, self.config.port);
        info!("🚀 Server running at http://{}", addr);
        let listener = tokio::net::TcpListener::bind(addr).await?;
        axum::serve(listener, self.router).await?;
        Ok(())
    }
}
