use tracing::{info, warn, error, instrument};
use crate::dto::quote_dto::CreateQuoteRequest;
use crate::model::quote::{QuoteRequest, QuoteStatus};
use crate::repository::quote_repo::QuoteRepository;
use crate::util::email::QuoteNotifier;
use crate::util::error::ServiceError;
use bson::oid::ObjectId;
use std::sync::Arc;

use async_trait::async_trait;

/// Result of one best-effort notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Delivery {
	Sent,
	Skipped,
	Failed(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationReport {
	pub staff: Delivery,
	pub customer: Delivery,
}

/// A stored quote plus what happened to its notifications.
#[derive(Debug, Clone)]
pub struct QuoteSubmission {
	pub quote: QuoteRequest,
	pub notifications: NotificationReport,
}

#[async_trait]
pub trait QuoteService: Send + Sync {
	async fn submit_quote(&self, request: CreateQuoteRequest) -> Result<QuoteSubmission, ServiceError>;
	async fn list_quotes(&self) -> Result<Vec<QuoteRequest>, ServiceError>;
	async fn update_quote_status(&self, id: &str, status: &str) -> Result<QuoteRequest, ServiceError>;
}

pub struct QuoteServiceImpl {
	pub quote_repo: Arc<dyn QuoteRepository>,
	pub notifier: Arc<dyn QuoteNotifier>,
}

impl QuoteServiceImpl {
	pub fn new(quote_repo: Arc<dyn QuoteRepository>, notifier: Arc<dyn QuoteNotifier>) -> Self {
		Self { quote_repo, notifier }
	}

	/// Sends the staff and customer emails concurrently. Failures are logged and
	/// reported, never returned as errors.
	#[instrument(skip(self, quote), fields(quote_id = %quote.id))]
	pub async fn dispatch_notifications(&self, quote: &QuoteRequest) -> NotificationReport {
		let staff = async {
			match self.notifier.notify_staff(quote).await {
				Ok(()) => Delivery::Sent,
				Err(e) => {
					warn!("Staff notification failed: {e}");
					Delivery::Failed(e.to_string())
				}
			}
		};
		let customer = async {
			let Some(email) = quote.email.as_deref().map(str::trim).filter(|e| !e.is_empty()) else {
				return Delivery::Skipped;
			};
			match self.notifier.confirm_customer(email, quote).await {
				Ok(()) => Delivery::Sent,
				Err(e) => {
					warn!("Customer confirmation failed: {e}");
					Delivery::Failed(e.to_string())
				}
			}
		};
		let (staff, customer) = tokio::join!(staff, customer);
		NotificationReport { staff, customer }
	}
}

#[async_trait]
impl QuoteService for QuoteServiceImpl {
	#[instrument(skip(self, request))]
	async fn submit_quote(&self, request: CreateQuoteRequest) -> Result<QuoteSubmission, ServiceError> {
		let new_quote = request.validated().map_err(|e| {
			warn!("Rejected quote submission: {e}");
			ServiceError::InvalidInput(e.to_string())
		})?;

		let quote = self.quote_repo.create(new_quote).await.map_err(|e| {
			error!("Failed to store quote request: {e}");
			ServiceError::InternalError(e.to_string())
		})?;
		info!(quote_id = %quote.id, "Quote request stored");

		let notifications = self.dispatch_notifications(&quote).await;
		Ok(QuoteSubmission { quote, notifications })
	}

	#[instrument(skip(self))]
	async fn list_quotes(&self) -> Result<Vec<QuoteRequest>, ServiceError> {
		let res = self.quote_repo.list_all().await;
		match &res {
			Ok(quotes) => info!("Fetched {} quotes", quotes.len()),
			Err(e) => error!("Failed to list quotes: {e}"),
		}
		res.map_err(ServiceError::from)
	}

	#[instrument(skip(self), fields(id = %id, status = %status))]
	async fn update_quote_status(&self, id: &str, status: &str) -> Result<QuoteRequest, ServiceError> {
		let status: QuoteStatus = status.parse().map_err(|e| {
			warn!("Rejected status update: {e}");
			ServiceError::InvalidStatus(format!("{e}"))
		})?;
		// An id that cannot be an ObjectId cannot match any record.
		let id = ObjectId::parse_str(id.trim())
			.map_err(|_| ServiceError::NotFound(format!("No quote found for ID: {}", id)))?;

		let res = self.quote_repo.update_status(id, status).await;
		match &res {
			Ok(_) => info!("Quote status updated successfully"),
			Err(e) => error!("Failed to update quote status: {e}"),
		}
		res.map_err(ServiceError::from)
	}
}
