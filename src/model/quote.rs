use bson::oid::ObjectId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Catalog label used when a submission does not name a service.
pub const DEFAULT_SERVICE: &str = "Office Supplies & Stationery";

/// Triage lifecycle of a quote request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuoteStatus {
    #[default]
    New,
    Contacted,
    Delivered,
}

impl QuoteStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            QuoteStatus::New => "new",
            QuoteStatus::Contacted => "contacted",
            QuoteStatus::Delivered => "delivered",
        }
    }
}

impl fmt::Display for QuoteStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownStatus(pub String);

impl fmt::Display for UnknownStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown quote status '{}'", self.0)
    }
}

impl std::error::Error for UnknownStatus {}

impl FromStr for QuoteStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "new" => Ok(QuoteStatus::New),
            "contacted" => Ok(QuoteStatus::Contacted),
            "delivered" => Ok(QuoteStatus::Delivered),
            other => Err(UnknownStatus(other.to_string())),
        }
    }
}

/// A customer quote request as persisted in the `quote_requests` collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteRequest {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub full_name: String,
    pub phone: String,
    pub email: Option<String>,
    pub company: Option<String>,
    pub location: Option<String>,
    pub service: String,
    pub items: String,
    pub budget: Option<String>,
    pub delivery_date: Option<String>,
    // Records written before the field existed read back as `new`.
    #[serde(default)]
    pub status: QuoteStatus,
    #[serde(with = "bson::serde_helpers::chrono_datetime_as_bson_datetime")]
    pub created_at: DateTime<Utc>,
}
