use crate::util::phone::normalize_phone;

const CHAT_LINK_BASE: &str = "https://wa.me/";

/// Click-to-chat deep link: digits only, message URL-encoded.
pub fn chat_link(phone: &str, text: &str) -> String {
    let digits: String = normalize_phone(phone)
        .chars()
        .filter(|c| c.is_ascii_digit())
        .collect();
    format!("{}{}?text={}", CHAT_LINK_BASE, digits, urlencoding::encode(text))
}

pub fn call_link(phone: &str) -> String {
    format!("tel:{}", normalize_phone(phone))
}
