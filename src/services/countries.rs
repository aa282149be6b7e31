//! Country and calling-code reference data
//!
//! Read-only table behind the country and phone selectors, in display order.

/// One row of the reference table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Country {
    /// ISO 3166-1 alpha-2 code, stored as the value of a country field
    pub code: &'static str,
    pub name: &'static str,
    /// Calling code including the leading `+`
    pub phone: &'static str,
}

const fn country(code: &'static str, name: &'static str, phone: &'static str) -> Country {
    Country { code, name, phone }
}

pub static COUNTRIES: &[Country] = &[
    country("AR", "Argentina", "+54"),
    country("AU", "Australia", "+61"),
    country("AT", "Austria", "+43"),
    country("BE", "Belgium", "+32"),
    country("BR", "Brazil", "+55"),
    country("CA", "Canada", "+1"),
    country("CN", "China", "+86"),
    country("DK", "Denmark", "+45"),
    country("EG", "Egypt", "+20"),
    country("FI", "Finland", "+358"),
    country("FR", "France", "+33"),
    country("DE", "Germany", "+49"),
    country("GR", "Greece", "+30"),
    country("IN", "India", "+91"),
    country("ID", "Indonesia", "+62"),
    country("IE", "Ireland", "+353"),
    country("IL", "Israel", "+972"),
    country("IT", "Italy", "+39"),
    country("JP", "Japan", "+81"),
    country("KE", "Kenya", "+254"),
    country("MX", "Mexico", "+52"),
    country("NL", "Netherlands", "+31"),
    country("NZ", "New Zealand", "+64"),
    country("NG", "Nigeria", "+234"),
    country("NO", "Norway", "+47"),
    country("PK", "Pakistan", "+92"),
    country("PL", "Poland", "+48"),
    country("PT", "Portugal", "+351"),
    country("ZA", "South Africa", "+27"),
    country("KR", "South Korea", "+82"),
    country("ES", "Spain", "+34"),
    country("SE", "Sweden", "+46"),
    country("CH", "Switzerland", "+41"),
    country("TR", "Turkey", "+90"),
    country("AE", "United Arab Emirates", "+971"),
    country("GB", "United Kingdom", "+44"),
    country("US", "United States", "+1"),
];

/// Look up a country by ISO code, ignoring case
pub fn by_code(code: &str) -> Option<&'static Country> {
    COUNTRIES.iter().find(|c| c.code.eq_ignore_ascii_case(code))
}

/// First country using the calling code, with or without the `+`
pub fn by_calling_code(phone: &str) -> Option<&'static Country> {
    let digits = phone.trim().trim_start_matches('+');
    COUNTRIES
        .iter()
        .find(|c| c.phone.trim_start_matches('+') == digits)
}
