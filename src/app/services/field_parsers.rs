//! Field parsing utilities shared by the catalog and time-series parsers
//!
//! This module provides helper functions for normalizing names and parsing
//! grid numbers, point dates and discharge values with proper error handling.

use crate::constants::{DATE_FORMAT, DATE_PREFIX_LEN};
use crate::{Error, Result};
use chrono::{Datelike, NaiveDate};
use regex::Regex;
use serde_json::Value;
use std::sync::LazyLock;

/// Last run of digits in a gauge reference, ignoring any non-digit tail
static TRAILING_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+)\D*$").expect("valid trailing number pattern"));

/// Normalize a name to title case
///
/// The first letter of each word is upper-cased and every other letter is
/// lower-cased. A word starts after any non-alphabetic character, so
/// `"rhein-main"` becomes `"Rhein-Main"` and `"o'brien"` becomes `"O'Brien"`.
pub fn title_case(value: &str) -> String {
    let mut result = String::with_capacity(value.len());
    let mut previous_is_letter = false;

    for ch in value.chars() {
        if ch.is_alphabetic() {
            if previous_is_letter {
                result.extend(ch.to_lowercase());
            } else {
                result.extend(ch.to_uppercase());
            }
            previous_is_letter = true;
        } else {
            result.push(ch);
            previous_is_letter = false;
        }
    }

    result
}

/// Parse a grid number attribute of the feature at `index`
///
/// Accepts a JSON integer, a JSON float without fractional part, or a string
/// holding an integer (surrounding whitespace ignored).
pub fn parse_grid_number(index: usize, value: &Value) -> Result<i64> {
    match value {
        Value::Number(number) => {
            if let Some(grid_number) = number.as_i64() {
                return Ok(grid_number);
            }
            match number.as_f64() {
                Some(float)
                    if float.fract() == 0.0
                        && float >= i64::MIN as f64
                        && float <= i64::MAX as f64 =>
                {
                    Ok(float as i64)
                }
                _ => Err(Error::grid_number(index, number.to_string())),
            }
        }
        Value::String(text) => text
            .trim()
            .parse::<i64>()
            .map_err(|_| Error::grid_number(index, text.as_str())),
        other => Err(Error::grid_number(index, other.to_string())),
    }
}

/// Parse the `(year, month)` of a point time
///
/// Only the first ten characters (the calendar date) are interpreted; any
/// time-of-day or offset suffix is ignored.
pub fn parse_year_month(time: &str) -> Result<(i32, u32)> {
    let trimmed = time.trim();
    let date_part = match trimmed.char_indices().nth(DATE_PREFIX_LEN) {
        Some((end, _)) => &trimmed[..end],
        None => trimmed,
    };

    let date = NaiveDate::parse_from_str(date_part, DATE_FORMAT)
        .map_err(|e| Error::date_parsing(time, e))?;

    Ok((date.year(), date.month()))
}

/// Parse a discharge value
///
/// An absent, empty or whitespace-only value, or a literal `NaN`, is the
/// missing sentinel (`None`), never zero. Any other text must be a finite
/// decimal.
pub fn parse_discharge(value: Option<&str>) -> Result<Option<f64>> {
    let Some(text) = value.map(str::trim).filter(|s| !s.is_empty()) else {
        return Ok(None);
    };

    let discharge: f64 = text
        .parse()
        .map_err(|e: std::num::ParseFloatError| Error::value_parsing(text, e.to_string()))?;

    if discharge.is_nan() {
        Ok(None)
    } else if discharge.is_infinite() {
        Err(Error::value_parsing(text, "value is not finite"))
    } else {
        Ok(Some(discharge))
    }
}

/// Extract the grid number a gauge reference points at
///
/// References are opaque tokens such as `"2316200"`,
/// `"https://portal.grdc.bafg.de/gauge/2316200"` or `"urn:grdc:2316200"`;
/// the last run of digits is taken as the grid number.
pub fn grid_number_from_reference(reference: &str) -> Option<i64> {
    TRAILING_NUMBER
        .captures(reference.trim())
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse().ok())
}
