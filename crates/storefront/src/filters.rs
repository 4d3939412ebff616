//! Custom Askama template filters and display helpers.

#![allow(clippy::unnecessary_wraps)]

use std::fmt::Display;

use rust_decimal::Decimal;

use greenmart_core::types::{CurrencyCode, Price};

/// Returns the current year.
///
/// Usage in templates: `{{ ""|current_year }}`
#[askama::filter_fn]
pub fn current_year(_value: impl Display, _env: &dyn askama::Values) -> askama::Result<i32> {
    use chrono::Datelike;
    Ok(chrono::Utc::now().year())
}

/// Format a decimal amount as a dollar price string.
///
/// Always shows two decimal places: `180` becomes `"$180.00"`.
#[must_use]
pub fn format_money(amount: Decimal) -> String {
    Price::new(amount, CurrencyCode::USD).to_string()
}
