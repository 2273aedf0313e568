// crates/worldcities-core/src/model/validate.rs

//! Field rules shared by the create payloads and the patches.

use crate::error::{Result, StoreError};
use crate::text::transliterate;
use rust_decimal::Decimal;

pub(crate) fn required_text(field: &'static str, value: &str) -> Result<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(StoreError::validation(field, "must not be empty"));
    }
    Ok(trimmed.to_string())
}

/// ISO 3166-1 codes: exactly `len` ASCII letters, stored upper case.
pub(crate) fn iso_code(field: &'static str, value: &str, len: usize) -> Result<String> {
    let code = value.trim();
    if code.is_empty() {
        return Err(StoreError::validation(field, "must not be empty"));
    }
    if code.len() != len || !code.chars().all(|c| c.is_ascii_alphabetic()) {
        return Err(StoreError::validation(
            field,
            format!("expected {len} ASCII letters, got {code:?}"),
        ));
    }
    Ok(code.to_ascii_uppercase())
}

/// Empty input derives the ASCII form from `name`.
pub(crate) fn ascii_name(name: &str, value: &str) -> Result<String> {
    let given = value.trim();
    if given.is_empty() {
        let derived = transliterate(name);
        if derived.is_empty() {
            return Err(StoreError::validation(
                "name_ascii",
                format!("cannot derive an ASCII form of {name:?}"),
            ));
        }
        return Ok(derived);
    }
    if !given.is_ascii() {
        return Err(StoreError::validation(
            "name_ascii",
            format!("{given:?} contains non-ASCII characters"),
        ));
    }
    Ok(given.to_string())
}

pub(crate) fn latitude(value: Decimal) -> Result<Decimal> {
    bounded("lat", value, 90)
}

pub(crate) fn longitude(value: Decimal) -> Result<Decimal> {
    bounded("lon", value, 180)
}

fn bounded(field: &'static str, value: Decimal, limit: i64) -> Result<Decimal> {
    let limit = Decimal::from(limit);
    if value < -limit || value > limit {
        return Err(StoreError::validation(
            field,
            format!("{value} is outside [-{limit}, {limit}]"),
        ));
    }
    Ok(value.normalize())
}
