//! Phone number display formatting
//!
//! The form only stores what the user typed; formatting is for display and
//! goes through a [`PhoneFormatter`] so the implementation can be swapped.

use super::countries;

/// Formats a raw phone number for a country
pub trait PhoneFormatter {
    /// Return the international form of `raw`, or `raw` unchanged when it
    /// cannot be parsed for `country`.
    ///
    /// `country` is an ISO code (`"US"`) or a calling code (`"+1"`).
    fn format(&self, country: &str, raw: &str) -> String;
}

/// Built-in formatter: `+<calling code> <groups of the national number>`
#[derive(Debug, Clone, Copy, Default)]
pub struct InternationalFormatter;

impl InternationalFormatter {
    const MIN_DIGITS: usize = 4;
    const MAX_DIGITS: usize = 15;

    fn calling_code(country: &str) -> Option<&'static str> {
        let country = country.trim();
        if country.starts_with('+') || country.chars().all(|c| c.is_ascii_digit()) {
            countries::by_calling_code(country).map(|c| c.phone)
        } else {
            countries::by_code(country).map(|c| c.phone)
        }
    }

    /// Strip separators; `None` if anything but digits remains
    fn national_digits(raw: &str) -> Option<String> {
        let mut digits = String::with_capacity(raw.len());
        for c in raw.chars() {
            match c {
                '0'..='9' => digits.push(c),
                ' ' | '-' | '.' | '(' | ')' => {}
                _ => return None,
            }
        }
        (Self::MIN_DIGITS..=Self::MAX_DIGITS)
            .contains(&digits.len())
            .then_some(digits)
    }

    /// 3-3-rest grouping, e.g. `555 123 4567`
    fn group(digits: &str) -> String {
        if digits.len() <= 6 {
            return digits.to_string();
        }
        format!("{} {} {}", &digits[..3], &digits[3..6], &digits[6..])
    }
}

impl PhoneFormatter for InternationalFormatter {
    fn format(&self, country: &str, raw: &str) -> String {
        match (Self::calling_code(country), Self::national_digits(raw)) {
            (Some(code), Some(digits)) => format!("{} {}", code, Self::group(&digits)),
            _ => raw.to_string(),
        }
    }
}
