use axum::{extract::{State, rejection::JsonRejection}, response::IntoResponse, Json};
use crate::dto::quote_dto::{
    CreateQuoteRequest, QuoteCreatedResponse, QuoteResponseDto, StatusUpdatedResponse,
    UpdateQuoteStatusRequest, MISSING_STATUS_FIELDS,
};
use crate::service::quote_service::{QuoteServiceImpl, QuoteService};
use crate::util::error::{HandlerError, HandlerErrorKind, ServiceError};
use std::sync::Arc;
use tracing::{error, info};

use validator::Validate;

// Handler: Submit Quote (public)
pub async fn create_quote_handler(
    State(service): State<Arc<QuoteServiceImpl>>,
    payload: Result<Json<CreateQuoteRequest>, JsonRejection>,
) -> Result<impl IntoResponse, HandlerError> {
    let Json(payload) = payload.map_err(|e| {
        error!("[create_quote_handler] Invalid JSON: {}", e);
        HandlerError::new(HandlerErrorKind::BadRequest, format!("Invalid JSON: {}", e))
    })?;

    let submission = service.submit_quote(payload).await.map_err(|e| match e {
        ServiceError::InvalidInput(msg) => HandlerError::new(HandlerErrorKind::Validation, msg),
        other => {
            error!("[create_quote_handler] {}", other);
            HandlerError::new(HandlerErrorKind::Internal, "Something went wrong submitting your quote.")
        }
    })?;
    info!(
        quote_id = %submission.quote.id,
        notifications = ?submission.notifications,
        "[create_quote_handler] Quote submitted"
    );

    Ok(Json(QuoteCreatedResponse { ok: true, id: submission.quote.id.to_hex() }))
}

// Handler: List Quotes (admin only)
pub async fn list_quotes_handler(
    State(service): State<Arc<QuoteServiceImpl>>,
) -> Result<impl IntoResponse, HandlerError> {
    let quotes = service.list_quotes().await.map_err(|e| HandlerError {
        error: HandlerErrorKind::Internal,
        message: "Failed to list quotes".to_string(),
        details: Some(e.to_string()),
    })?;
    let quotes: Vec<QuoteResponseDto> = quotes.into_iter().map(QuoteResponseDto::from).collect();
    Ok(Json(quotes))
}

// Handler: Update Quote Status (admin only)
pub async fn update_quote_status_handler(
    State(service): State<Arc<QuoteServiceImpl>>,
    payload: Result<Json<UpdateQuoteStatusRequest>, JsonRejection>,
) -> Result<impl IntoResponse, HandlerError> {
    let Json(payload) = payload
        .map_err(|e| HandlerError::new(HandlerErrorKind::BadRequest, format!("Invalid JSON: {}", e)))?;
    if payload.validate().is_err() {
        return Err(HandlerError::new(HandlerErrorKind::BadRequest, MISSING_STATUS_FIELDS));
    }
    let (Some(id), Some(status)) = (payload.id, payload.status) else {
        return Err(HandlerError::new(HandlerErrorKind::BadRequest, MISSING_STATUS_FIELDS));
    };

    let updated = service.update_quote_status(&id, &status).await.map_err(|e| match e {
        ServiceError::InvalidStatus(msg) => HandlerError::new(HandlerErrorKind::Validation, msg),
        other => HandlerError {
            error: HandlerErrorKind::Internal,
            message: "Failed to update status".to_string(),
            details: Some(other.to_string()),
        },
    })?;

    Ok(Json(StatusUpdatedResponse { ok: true, status: updated.status }))
}
