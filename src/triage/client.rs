use crate::dto::quote_dto::{QuoteResponseDto, StatusUpdatedResponse};
use crate::model::quote::QuoteStatus;
use async_trait::async_trait;
use serde_json::json;
use tracing::{debug, error, instrument};

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("server responded {status}: {body}")]
    Status { status: u16, body: String },
}

/// Calls the dashboard needs from the server.
#[async_trait]
pub trait AdminApi: Send + Sync {
    async fn fetch_quotes(&self) -> Result<Vec<QuoteResponseDto>, ClientError>;
    async fn update_status(&self, id: &str, status: QuoteStatus) -> Result<QuoteStatus, ClientError>;
}

/// `AdminApi` over HTTP. Holds the session cookie after [`HttpAdminClient::login`].
pub struct HttpAdminClient {
    base_url: String,
    http: reqwest::Client,
}

impl HttpAdminClient {
    pub fn new(base_url: &str) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder()
            .cookie_store(true)
            .build()?;
        Ok(Self { base_url: base_url.trim_end_matches('/').to_string(), http })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    #[instrument(skip(self, password))]
    pub async fn login(&self, password: &str) -> Result<(), ClientError> {
        let resp = self.http
            .post(self.url("/auth/login"))
            .json(&json!({ "password": password }))
            .send()
            .await?;
        check_status(resp).await.map(|_| ())
    }
}

async fn check_status(resp: reqwest::Response) -> Result<reqwest::Response, ClientError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    let body = resp.text().await.unwrap_or_default();
    error!(status = status.as_u16(), "Admin API call failed");
    Err(ClientError::Status { status: status.as_u16(), body })
}

#[async_trait]
impl AdminApi for HttpAdminClient {
    #[instrument(skip(self))]
    async fn fetch_quotes(&self) -> Result<Vec<QuoteResponseDto>, ClientError> {
        let resp = self.http.get(self.url("/admin/quotes")).send().await?;
        let quotes: Vec<QuoteResponseDto> = check_status(resp).await?.json().await?;
        debug!("Fetched {} quotes", quotes.len());
        Ok(quotes)
    }

    #[instrument(skip(self), fields(id = %id, status = %status))]
    async fn update_status(&self, id: &str, status: QuoteStatus) -> Result<QuoteStatus, ClientError> {
        let resp = self.http
            .post(self.url("/quote/status"))
            .json(&json!({ "id": id, "status": status }))
            .send()
            .await?;
        let body: StatusUpdatedResponse = check_status(resp).await?.json().await?;
        Ok(body.status)
    }
}
