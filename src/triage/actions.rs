use crate::dto::quote_dto::QuoteResponseDto;
use crate::util::links::{call_link, chat_link};
use crate::util::phone::normalize_phone;

/// Greeting sent through the chat link, quoting what the customer asked for.
pub fn chat_message(quote: &QuoteResponseDto) -> String {
    format!(
        "Hello {name},\n\nThank you for requesting a quote from Budeba General Enterprise.\n\n\
         We received your request for:\n{items}\n\nService: {service}\n\n\
         Please confirm:\n1) Your location for delivery\n2) Quantity/specifications\n3) Preferred delivery date\n\nThank you.",
        name = quote.full_name,
        items = quote.items,
        service = quote.service,
    )
}

pub fn chat_link_for(quote: &QuoteResponseDto) -> String {
    chat_link(&quote.phone, &chat_message(quote))
}

pub fn call_link_for(quote: &QuoteResponseDto) -> String {
    call_link(&quote.phone)
}

/// Text copied by the "Copy Phone" action.
pub fn phone_for_copy(quote: &QuoteResponseDto) -> String {
    normalize_phone(&quote.phone)
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("clipboard unavailable: {0}")]
pub struct ClipboardError(pub String);

/// Platform clipboard. Implementations report denial instead of panicking.
pub trait Clipboard {
    fn write_text(&self, text: &str) -> Result<(), ClipboardError>;
}
