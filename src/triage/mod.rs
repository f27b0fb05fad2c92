//! Admin triage: a client-side view of the quote list.
//!
//! The board keeps a possibly stale copy of the quotes fetched through
//! [`AdminApi`]. Status changes are applied locally only after the server
//! acknowledges them, so a failed save never leaves the board showing a status
//! the store does not have.

pub mod actions;
pub mod board;
pub mod client;

pub use actions::{Clipboard, ClipboardError};
pub use board::{PendingUpdate, StatusSummary, Toast, TriageBoard, COPY_FAILED_TOAST, SAVED_TOAST, SAVE_FAILED_TOAST};
pub use client::{AdminApi, ClientError, HttpAdminClient};
