use crate::dto::quote_dto::QuoteResponseDto;
use crate::model::quote::QuoteStatus;
use crate::triage::actions::{phone_for_copy, Clipboard};
use crate::triage::client::{AdminApi, ClientError};
use std::collections::HashSet;
use std::time::Duration;
use tracing::{info, warn};

pub const SAVED_TOAST: &str = "Saved";
pub const SAVE_FAILED_TOAST: &str = "Failed to save. Try again.";
pub const COPY_FAILED_TOAST: &str = "Copy failed. Please copy manually.";

/// Short-lived notice shown above the table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub message: String,
    pub duration: Duration,
}

impl Toast {
    fn saved() -> Self {
        Toast { message: SAVED_TOAST.to_string(), duration: Duration::from_millis(1500) }
    }

    fn failure(message: &str) -> Self {
        Toast { message: message.to_string(), duration: Duration::from_millis(1800) }
    }

    fn copied(label: &str) -> Self {
        Toast { message: format!("{} copied", label), duration: Duration::from_millis(1200) }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatusSummary {
    pub total: usize,
    pub new: usize,
    pub contacted: usize,
    pub delivered: usize,
}

/// A status change that has been requested but not yet acknowledged.
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use]
pub struct PendingUpdate {
    pub id: String,
    pub status: QuoteStatus,
}

#[derive(Debug, Default)]
pub struct TriageBoard {
    quotes: Vec<QuoteResponseDto>,
    saving: HashSet<String>,
    toast: Option<Toast>,
}

impl TriageBoard {
    pub fn new(quotes: Vec<QuoteResponseDto>) -> Self {
        TriageBoard { quotes, ..Default::default() }
    }

    pub async fn load(api: &dyn AdminApi) -> Result<Self, ClientError> {
        let quotes = api.fetch_quotes().await?;
        info!("Triage board loaded {} quotes", quotes.len());
        Ok(Self::new(quotes))
    }

    pub fn quotes(&self) -> &[QuoteResponseDto] {
        &self.quotes
    }

    pub fn toast(&self) -> Option<&Toast> {
        self.toast.as_ref()
    }

    pub fn clear_toast(&mut self) {
        self.toast = None;
    }

    pub fn summary(&self) -> StatusSummary {
        let mut summary = StatusSummary { total: self.quotes.len(), ..Default::default() };
        for quote in &self.quotes {
            match quote.status {
                QuoteStatus::New => summary.new += 1,
                QuoteStatus::Contacted => summary.contacted += 1,
                QuoteStatus::Delivered => summary.delivered += 1,
            }
        }
        summary
    }

    /// Rows whose name, phone, service or items contain `query`, ignoring case.
    pub fn filtered(&self, query: &str) -> Vec<&QuoteResponseDto> {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return self.quotes.iter().collect();
        }
        self.quotes
            .iter()
            .filter(|q| {
                [&q.full_name, &q.phone, &q.service, &q.items]
                    .iter()
                    .any(|field| field.to_lowercase().contains(&query))
            })
            .collect()
    }

    pub fn is_saving(&self, id: &str) -> bool {
        self.saving.contains(id)
    }

    /// Marks the row as saving. Returns `None` if that row already has a
    /// request in flight or does not exist.
    pub fn begin_status_change(&mut self, id: &str, status: QuoteStatus) -> Option<PendingUpdate> {
        if self.is_saving(id) || !self.quotes.iter().any(|q| q.id == id) {
            return None;
        }
        self.saving.insert(id.to_string());
        self.toast = None;
        Some(PendingUpdate { id: id.to_string(), status })
    }

    /// Settles a pending change. The row is patched only when the server
    /// acknowledged it; on failure the previous status stays visible.
    pub fn finish_status_change(&mut self, pending: PendingUpdate, result: Result<QuoteStatus, ClientError>) -> bool {
        self.saving.remove(&pending.id);
        match result {
            Ok(confirmed) => {
                if let Some(quote) = self.quotes.iter_mut().find(|q| q.id == pending.id) {
                    quote.status = confirmed;
                }
                self.toast = Some(Toast::saved());
                true
            }
            Err(e) => {
                warn!(id = %pending.id, "Status update failed: {e}");
                self.toast = Some(Toast::failure(SAVE_FAILED_TOAST));
                false
            }
        }
    }

    /// Issues a single-row status update and applies it once acknowledged.
    pub async fn change_status(&mut self, api: &dyn AdminApi, id: &str, status: QuoteStatus) -> bool {
        let Some(pending) = self.begin_status_change(id, status) else {
            return false;
        };
        let result = api.update_status(&pending.id, pending.status).await;
        self.finish_status_change(pending, result)
    }

    pub fn copy_phone(&mut self, clipboard: &dyn Clipboard, id: &str) -> bool {
        let Some(text) = self.quotes.iter().find(|q| q.id == id).map(phone_for_copy) else {
            return false;
        };
        self.copy(clipboard, "Phone", &text)
    }

    pub fn copy_items(&mut self, clipboard: &dyn Clipboard, id: &str) -> bool {
        let Some(text) = self.quotes.iter().find(|q| q.id == id).map(|q| q.items.clone()) else {
            return false;
        };
        self.copy(clipboard, "Items", &text)
    }

    fn copy(&mut self, clipboard: &dyn Clipboard, label: &str, text: &str) -> bool {
        match clipboard.write_text(text) {
            Ok(()) => {
                self.toast = Some(Toast::copied(label));
                true
            }
            Err(e) => {
                warn!("{e}");
                self.toast = Some(Toast::failure(COPY_FAILED_TOAST));
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::triage::actions::ClipboardError;
    use chrono::Utc;
    use std::cell::RefCell;

    fn quote(id: &str, name: &str, service: &str, status: QuoteStatus) -> QuoteResponseDto {
        QuoteResponseDto {
            id: id.to_string(),
            full_name: name.to_string(),
            phone: "0764111222".to_string(),
            email: None,
            company: None,
            location: None,
            service: service.to_string(),
            items: "10 boxes A4 paper".to_string(),
            budget: None,
            delivery_date: None,
            status,
            created_at: Utc::now(),
        }
    }

    fn board() -> TriageBoard {
        TriageBoard::new(vec![
            quote("a", "Jane Doe", "Office Supplies & Stationery", QuoteStatus::New),
            quote("b", "John Roe", "Construction Materials", QuoteStatus::Contacted),
            quote("c", "Asha M", "Cleaning Supplies", QuoteStatus::Delivered),
            quote("d", "Baraka K", "Office Supplies & Stationery", QuoteStatus::New),
        ])
    }

    #[derive(Default)]
    struct MemoryClipboard {
        text: RefCell<Option<String>>,
        deny: bool,
    }

    impl Clipboard for MemoryClipboard {
        fn write_text(&self, text: &str) -> Result<(), ClipboardError> {
            if self.deny {
                return Err(ClipboardError("permission denied".to_string()));
            }
            *self.text.borrow_mut() = Some(text.to_string());
            Ok(())
        }
    }

    #[test]
    fn test_summary_counts_per_status() {
        let summary = board().summary();
        assert_eq!(summary, StatusSummary { total: 4, new: 2, contacted: 1, delivered: 1 });
    }

    #[test]
    fn test_empty_query_returns_everything() {
        assert_eq!(board().filtered("   ").len(), 4);
    }

    #[test]
    fn test_query_matching_only_service_of_one_row() {
        let board = board();
        let rows = board.filtered("CONSTRUCTION");
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].id, "b");
    }

    #[test]
    fn test_query_matches_any_field() {
        let board = board();
        assert_eq!(board.filtered("a4 paper").len(), 4);
        assert_eq!(board.filtered("jane").len(), 1);
        assert_eq!(board.filtered("0764").len(), 4);
        assert!(board.filtered("cement").is_empty());
    }

    #[test]
    fn test_pending_row_is_disabled_until_settled() {
        let mut board = board();
        let pending = board.begin_status_change("a", QuoteStatus::Contacted).unwrap();
        assert!(board.is_saving("a"));
        assert!(board.begin_status_change("a", QuoteStatus::Delivered).is_none());
        assert!(board.finish_status_change(pending, Ok(QuoteStatus::Contacted)));
        assert!(!board.is_saving("a"));
        assert_eq!(board.quotes()[0].status, QuoteStatus::Contacted);
        assert_eq!(board.toast().unwrap().message, SAVED_TOAST);
    }

    #[test]
    fn test_failed_update_keeps_previous_status() {
        let mut board = board();
        let pending = board.begin_status_change("a", QuoteStatus::Delivered).unwrap();
        let err = ClientError::Status { status: 500, body: "boom".to_string() };
        assert!(!board.finish_status_change(pending, Err(err)));
        assert_eq!(board.quotes()[0].status, QuoteStatus::New);
        assert!(!board.is_saving("a"));
        let toast = board.toast().unwrap();
        assert_eq!(toast.message, SAVE_FAILED_TOAST);
        assert_eq!(toast.duration, Duration::from_millis(1800));
    }

    #[test]
    fn test_unknown_row_cannot_start_update() {
        assert!(board().begin_status_change("zzz", QuoteStatus::New).is_none());
    }

    #[test]
    fn test_copy_phone_uses_normalized_number() {
        let mut board = board();
        let clipboard = MemoryClipboard::default();
        assert!(board.copy_phone(&clipboard, "a"));
        assert_eq!(clipboard.text.borrow().as_deref(), Some("+255764111222"));
        assert_eq!(board.toast().unwrap().message, "Phone copied");
    }

    #[test]
    fn test_copy_denied_shows_failure_toast() {
        let mut board = board();
        let clipboard = MemoryClipboard { deny: true, ..Default::default() };
        assert!(!board.copy_items(&clipboard, "a"));
        assert_eq!(board.toast().unwrap().message, COPY_FAILED_TOAST);
    }
}
