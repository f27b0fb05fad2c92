use crate::dto::quote_dto::NewQuote;
use crate::model::quote::{QuoteRequest, QuoteStatus};
use crate::repository::quote_repo::{new_record, QuoteRepository};
use crate::repository::repository_error::{RepositoryError, RepositoryResult};
use async_trait::async_trait;
use bson::oid::ObjectId;
use std::cmp::Reverse;
use tokio::sync::RwLock;
use tracing::{error, info};

/// Process-local quote store with the same contract as the Mongo one.
#[derive(Default)]
pub struct InMemoryQuoteRepository {
    quotes: RwLock<Vec<QuoteRequest>>,
}

impl InMemoryQuoteRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds records as-is, keeping their ids and timestamps.
    pub fn with_quotes(quotes: Vec<QuoteRequest>) -> Self {
        InMemoryQuoteRepository { quotes: RwLock::new(quotes) }
    }
}

#[async_trait]
impl QuoteRepository for InMemoryQuoteRepository {
    #[tracing::instrument(skip(self, quote), fields(full_name = %quote.full_name))]
    async fn create(&self, quote: NewQuote) -> RepositoryResult<QuoteRequest> {
        let record = new_record(quote);
        self.quotes.write().await.push(record.clone());
        info!(quote_id = %record.id, "Quote request stored in memory");
        Ok(record)
    }

    #[tracing::instrument(skip(self))]
    async fn list_all(&self) -> RepositoryResult<Vec<QuoteRequest>> {
        let mut quotes = self.quotes.read().await.clone();
        quotes.sort_by_key(|q| Reverse((q.created_at, q.id)));
        Ok(quotes)
    }

    #[tracing::instrument(skip(self), fields(id = %id, status = %status))]
    async fn update_status(&self, id: ObjectId, status: QuoteStatus) -> RepositoryResult<QuoteRequest> {
        let mut quotes = self.quotes.write().await;
        match quotes.iter_mut().find(|q| q.id == id) {
            Some(quote) => {
                quote.status = status;
                info!("Quote status updated in memory");
                Ok(quote.clone())
            }
            None => {
                error!("No quote found to update status for ID: {}", id);
                Err(RepositoryError::not_found(format!("No quote found for ID: {}", id)))
            }
        }
    }

    async fn count(&self) -> RepositoryResult<u64> {
        Ok(self.quotes.read().await.len() as u64)
    }
}
