//! Phone number canonicalisation for dialing and messaging links.
//!
//! Numbers are assumed to be Tanzanian unless they already carry a `+`
//! prefix. The conversion is lossy and never fails: unrecognised input falls
//! back to `+<digits>` and input without digits becomes the empty string.

/// Country calling code assumed for local numbers.
pub const DEFAULT_COUNTRY_CODE: &str = "255";

/// Converts a loosely formatted phone number to `+<country><national>` form.
pub fn normalize_phone(phone: &str) -> String {
    let raw = phone.trim();

    if raw.starts_with('+') {
        return raw.chars().filter(|c| !c.is_whitespace()).collect();
    }

    let digits: String = raw.chars().filter(|c| c.is_ascii_digit()).collect();

    if digits.starts_with('0') && digits.len() >= 10 {
        return format!("+{}{}", DEFAULT_COUNTRY_CODE, &digits[1..]);
    }

    if digits.starts_with(DEFAULT_COUNTRY_CODE) {
        return format!("+{}", digits);
    }

    if digits.is_empty() {
        String::new()
    } else {
        format!("+{}", digits)
    }
}
