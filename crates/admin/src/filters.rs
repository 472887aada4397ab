//! Askama filters for back-office templates.

#![allow(clippy::unnecessary_wraps)]

use std::fmt::Display;

/// Placeholder for optional product fields left blank.
pub const BLANK: &str = "Sin especificar";

/// Year shown in the footer.
///
/// Usage in templates: `{{ ""|current_year }}`
#[askama::filter_fn]
pub fn current_year(_value: impl Display, _env: &dyn askama::Values) -> askama::Result<i32> {
    use chrono::Datelike;
    Ok(chrono::Utc::now().year())
}

/// Replace an empty value (unset brand or sex) with [`BLANK`].
///
/// Usage in templates: `{{ product.brand|or_blank }}`
#[askama::filter_fn]
pub fn or_blank(value: impl Display, _env: &dyn askama::Values) -> askama::Result<String> {
    Ok(or_blank_text(&value.to_string()))
}

fn or_blank_text(value: &str) -> String {
    if value.trim().is_empty() {
        BLANK.to_string()
    } else {
        value.to_string()
    }
}
