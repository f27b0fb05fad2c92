#![allow(dead_code)]

use async_trait::async_trait;
use axum::{body::Body, http::{Request, Response}, Router};
use budeba_backend::app::app::build_router;
use budeba_backend::config::AdminConfig;
use bson::oid::ObjectId;
use budeba_backend::dto::quote_dto::NewQuote;
use budeba_backend::model::quote::{QuoteRequest, QuoteStatus};
use budeba_backend::repository::memory_quote_repo::InMemoryQuoteRepository;
use budeba_backend::repository::quote_repo::QuoteRepository;
use budeba_backend::repository::repository_error::{RepositoryError, RepositoryResult};
use budeba_backend::service::auth_service::AdminAuthService;
use budeba_backend::service::quote_service::QuoteServiceImpl;
use budeba_backend::util::email::{EmailError, QuoteNotifier};
use http_body_util::BodyExt;
use std::sync::{Arc, Mutex};
use tower::ServiceExt;

pub const ADMIN_PASSWORD: &str = "changeme123";
pub const SESSION: &str = "budeba_admin=true";

/// Records every send; optionally fails them all.
#[derive(Default)]
pub struct RecordingNotifier {
    pub fail: bool,
    pub staff: Mutex<Vec<String>>,
    pub customers: Mutex<Vec<String>>,
}

impl RecordingNotifier {
    pub fn failing() -> Self {
        RecordingNotifier { fail: true, ..Default::default() }
    }

    pub fn staff_calls(&self) -> usize {
        self.staff.lock().unwrap().len()
    }

    pub fn customer_calls(&self) -> Vec<String> {
        self.customers.lock().unwrap().clone()
    }
}

#[async_trait]
impl QuoteNotifier for RecordingNotifier {
    async fn notify_staff(&self, quote: &QuoteRequest) -> Result<(), EmailError> {
        self.staff.lock().unwrap().push(quote.id.to_hex());
        if self.fail {
            return Err(EmailError::SmtpError("connection refused".to_string()));
        }
        Ok(())
    }

    async fn confirm_customer(&self, to: &str, _quote: &QuoteRequest) -> Result<(), EmailError> {
        self.customers.lock().unwrap().push(to.to_string());
        if self.fail {
            return Err(EmailError::SmtpError("connection refused".to_string()));
        }
        Ok(())
    }
}

pub struct TestApp {
    pub router: Router,
    pub repo: Arc<InMemoryQuoteRepository>,
    pub notifier: Arc<RecordingNotifier>,
}

pub fn setup_app_with(notifier: RecordingNotifier, admin: AdminConfig) -> TestApp {
    let repo = Arc::new(InMemoryQuoteRepository::new());
    let notifier = Arc::new(notifier);
    let quote_service = Arc::new(QuoteServiceImpl::new(repo.clone(), notifier.clone()));
    let auth_service = Arc::new(AdminAuthService::new(admin));
    TestApp {
        router: build_router(quote_service, auth_service),
        repo,
        notifier,
    }
}

/// Store whose every call fails the way the driver reports a rejected argument.
pub struct BrokenRepository;

#[async_trait]
impl QuoteRepository for BrokenRepository {
    async fn create(&self, _quote: NewQuote) -> RepositoryResult<QuoteRequest> {
        Err(RepositoryError::ValidationError("Invalid argument: document too large".to_string()))
    }

    async fn list_all(&self) -> RepositoryResult<Vec<QuoteRequest>> {
        Err(RepositoryError::ValidationError("Invalid argument: bad sort".to_string()))
    }

    async fn update_status(&self, _id: ObjectId, _status: QuoteStatus) -> RepositoryResult<QuoteRequest> {
        Err(RepositoryError::ValidationError("Invalid argument: bad update".to_string()))
    }

    async fn count(&self) -> RepositoryResult<u64> {
        Ok(0)
    }
}

pub fn setup_router_with_repo(repo: Arc<dyn QuoteRepository>, notifier: Arc<RecordingNotifier>) -> Router {
    let quote_service = Arc::new(QuoteServiceImpl::new(repo, notifier));
    let auth_service = Arc::new(AdminAuthService::new(AdminConfig::with_password(ADMIN_PASSWORD)));
    build_router(quote_service, auth_service)
}

pub fn setup_app() -> TestApp {
    setup_app_with(RecordingNotifier::default(), AdminConfig::with_password(ADMIN_PASSWORD))
}

pub fn post_json(uri: &str, body: serde_json::Value, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json");
    if let Some(cookie) = cookie {
        builder = builder.header("cookie", cookie);
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

pub fn get(uri: &str, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header("cookie", cookie);
    }
    builder.body(Body::empty()).unwrap()
}

pub async fn send(router: &Router, req: Request<Body>) -> Response<Body> {
    router.clone().oneshot(req).await.unwrap()
}

pub async fn body_json(resp: Response<Body>) -> serde_json::Value {
    let bytes = resp.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
