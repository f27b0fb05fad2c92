use crate::model::quote::{QuoteRequest, QuoteStatus, DEFAULT_SERVICE};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use validator::Validate;

pub const MISSING_QUOTE_FIELDS: &str = "Missing required fields (fullName, phone, items).";
pub const MISSING_STATUS_FIELDS: &str = "Missing id or status";

// --- Validated DTOs for request validation ---

/// Raw quote form submission. Every field is optional on the wire so that a
/// missing field is reported as a validation error rather than a parse error.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase", default)]
pub struct CreateQuoteRequest {
    #[validate(required, length(min = 1))]
    pub full_name: Option<String>,

    #[validate(required, length(min = 1))]
    pub phone: Option<String>,

    pub email: Option<String>,

    pub company: Option<String>,

    pub location: Option<String>,

    pub service: Option<String>,

    #[validate(required, length(min = 1))]
    pub items: Option<String>,

    pub budget: Option<String>,

    pub delivery_date: Option<String>,
}

/// A submission that passed validation; optional fields are `None` rather than blank.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewQuote {
    pub full_name: String,
    pub phone: String,
    pub email: Option<String>,
    pub company: Option<String>,
    pub location: Option<String>,
    pub service: String,
    pub items: String,
    pub budget: Option<String>,
    pub delivery_date: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissingFields;

impl std::fmt::Display for MissingFields {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(MISSING_QUOTE_FIELDS)
    }
}

impl std::error::Error for MissingFields {}

fn present(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

impl CreateQuoteRequest {
    pub fn validated(self) -> Result<NewQuote, MissingFields> {
        self.validate().map_err(|_| MissingFields)?;
        let (Some(full_name), Some(phone), Some(items)) =
            (present(self.full_name), present(self.phone), present(self.items))
        else {
            return Err(MissingFields);
        };
        Ok(NewQuote {
            full_name,
            phone,
            email: present(self.email).map(|e| e.trim().to_string()),
            company: present(self.company),
            location: present(self.location),
            service: present(self.service).unwrap_or_else(|| DEFAULT_SERVICE.to_string()),
            items,
            budget: present(self.budget),
            delivery_date: present(self.delivery_date),
        })
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct UpdateQuoteStatusRequest {
    #[validate(required, length(min = 1))]
    pub id: Option<String>,

    #[validate(required, length(min = 1))]
    pub status: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuoteCreatedResponse {
    pub ok: bool,
    pub id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusUpdatedResponse {
    pub ok: bool,
    pub status: QuoteStatus,
}

/// Quote as returned to the admin dashboard, with the id as a hex string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteResponseDto {
    pub id: String,
    pub full_name: String,
    pub phone: String,
    pub email: Option<String>,
    pub company: Option<String>,
    pub location: Option<String>,
    pub service: String,
    pub items: String,
    pub budget: Option<String>,
    pub delivery_date: Option<String>,
    #[serde(default)]
    pub status: QuoteStatus,
    pub created_at: DateTime<Utc>,
}

impl From<QuoteRequest> for QuoteResponseDto {
    fn from(quote: QuoteRequest) -> Self {
        QuoteResponseDto {
            id: quote.id.to_hex(),
            full_name: quote.full_name,
            phone: quote.phone,
            email: quote.email,
            company: quote.company,
            location: quote.location,
            service: quote.service,
            items: quote.items,
            budget: quote.budget,
            delivery_date: quote.delivery_date,
            status: quote.status,
            created_at: quote.created_at,
        }
    }
}
