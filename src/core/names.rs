//! Display names for the most common currencies

use std::collections::HashMap;
use std::sync::LazyLock;

static CURRENCY_NAMES: LazyLock<HashMap<&'static str, &'static str>> = LazyLock::new(|| {
    HashMap::from([
        ("USD", "US Dollar"),
        ("EUR", "Euro"),
        ("GBP", "British Pound"),
        ("JPY", "Japanese Yen"),
        ("CAD", "Canadian Dollar"),
        ("AUD", "Australian Dollar"),
        ("CHF", "Swiss Franc"),
        ("CNY", "Chinese Yuan"),
        ("RUB", "Russian Ruble"),
        ("INR", "Indian Rupee"),
        ("BRL", "Brazilian Real"),
        ("MXN", "Mexican Peso"),
        ("KRW", "South Korean Won"),
        ("SGD", "Singapore Dollar"),
        ("HKD", "Hong Kong Dollar"),
        ("NOK", "Norwegian Krone"),
        ("SEK", "Swedish Krona"),
        ("TRY", "Turkish Lira"),
        ("ZAR", "South African Rand"),
    ])
});

/// Human readable name for `code`, or the code itself when unknown.
pub fn display_name(code: &str) -> &str {
    CURRENCY_NAMES.get(code).copied().unwrap_or(code)
}
