use crate::config::mongo_conf::MongoConfig;
use crate::dto::quote_dto::NewQuote;
use crate::model::quote::{QuoteRequest, QuoteStatus};
use crate::repository::repository_error::{RepositoryError, RepositoryResult};
use async_trait::async_trait;
use bson::{doc, oid::ObjectId};
use futures::stream::TryStreamExt;
use mongodb::options::{FindOneAndUpdateOptions, FindOptions, ReturnDocument};
use tracing::{error, info};

/// Persistence boundary for quote requests. Records are never deleted and only
/// `status` changes after insert.
#[async_trait]
pub trait QuoteRepository: Send + Sync {
    async fn create(&self, quote: NewQuote) -> RepositoryResult<QuoteRequest>;
    /// All records, newest first; ties on `createdAt` fall back to the id, newest first.
    async fn list_all(&self) -> RepositoryResult<Vec<QuoteRequest>>;
    async fn update_status(&self, id: ObjectId, status: QuoteStatus) -> RepositoryResult<QuoteRequest>;
    async fn count(&self) -> RepositoryResult<u64>;
}

/// Builds the record the store inserts: fresh id, current time, status `new`.
pub fn new_record(quote: NewQuote) -> QuoteRequest {
    QuoteRequest {
        id: ObjectId::new(),
        full_name: quote.full_name,
        phone: quote.phone,
        email: quote.email,
        company: quote.company,
        location: quote.location,
        service: quote.service,
        items: quote.items,
        budget: quote.budget,
        delivery_date: quote.delivery_date,
        status: QuoteStatus::New,
        created_at: chrono::Utc::now(),
    }
}

pub struct MongoQuoteRepository {
    collection: mongodb::Collection<QuoteRequest>,
}

impl MongoQuoteRepository {
    /// Create a new MongoQuoteRepository using MongoConfig
    pub async fn new(config: &MongoConfig) -> Result<Self, mongodb::error::Error> {
        use mongodb::{options::{ClientOptions, Credential}, Client};

        let mut client_options = ClientOptions::parse(&config.uri).await?;
        client_options.app_name = Some("BudebaBackend".to_string());
        client_options.max_pool_size = Some(config.pool_size);
        client_options.connect_timeout = Some(std::time::Duration::from_secs(config.connection_timeout_secs));

        if let (Some(ref username), Some(ref password)) = (&config.username, &config.password) {
            client_options.credential = Some(Credential::builder()
                .username(username.clone())
                .password(password.clone())
                .build());
        }

        let client = Client::with_options(client_options)?;
        let db = client.database(&config.database);
        let collection = db.collection::<QuoteRequest>(&config.quote_collection);
        Ok(MongoQuoteRepository { collection })
    }
}

#[async_trait]
impl QuoteRepository for MongoQuoteRepository {

    #[tracing::instrument(skip(self, quote), fields(full_name = %quote.full_name, service = %quote.service))]
    async fn create(&self, quote: NewQuote) -> RepositoryResult<QuoteRequest> {
        info!("Creating new quote request");
        let record = new_record(quote);
        match self.collection.insert_one(&record, None).await {
            Ok(_) => {
                info!(quote_id = %record.id, "Quote request created");
                Ok(record)
            },
            Err(e) => {
                error!("Failed to create quote request: {}", e);
                Err(RepositoryError::from(e))
            }
        }
    }

    #[tracing::instrument(skip(self))]
    async fn list_all(&self) -> RepositoryResult<Vec<QuoteRequest>> {
        info!("Listing all quote requests");
        let options = FindOptions::builder()
            .sort(doc! { "createdAt": -1, "_id": -1 })
            .build();
        let cursor = self.collection.find(None, options).await.map_err(|e| {
            error!("Failed to list quote requests: {}", e);
            RepositoryError::database(format!("Failed to list quote requests: {}", e))
        })?;
        let quotes: Vec<QuoteRequest> = cursor.try_collect().await.map_err(|e| {
            error!("Failed to deserialize quote request: {}", e);
            RepositoryError::serialization(format!("Failed to deserialize quote request: {}", e))
        })?;
        info!("Fetched {} quote requests", quotes.len());
        Ok(quotes)
    }

    #[tracing::instrument(skip(self), fields(id = %id, status = %status))]
    async fn update_status(&self, id: ObjectId, status: QuoteStatus) -> RepositoryResult<QuoteRequest> {
        info!("Updating quote status");
        let filter = doc! { "_id": id };
        let update = doc! { "$set": { "status": status.as_str() } };
        let options = FindOneAndUpdateOptions::builder()
            .return_document(ReturnDocument::After)
            .build();
        match self.collection.find_one_and_update(filter, update, options).await {
            Ok(Some(updated)) => {
                info!("Quote status updated");
                Ok(updated)
            },
            Ok(None) => {
                error!("No quote found to update status for ID: {}", id);
                Err(RepositoryError::not_found(format!("No quote found for ID: {}", id)))
            },
            Err(e) => {
                error!("Failed to update quote status: {}", e);
                Err(RepositoryError::from(e))
            }
        }
    }

    #[tracing::instrument(skip(self))]
    async fn count(&self) -> RepositoryResult<u64> {
        let count = self.collection.count_documents(None, None).await.map_err(|e| {
            error!("Failed to count quote requests: {}", e);
            RepositoryError::from(e)
        })?;
        info!("Total quote requests: {}", count);
        Ok(count)
    }
}
