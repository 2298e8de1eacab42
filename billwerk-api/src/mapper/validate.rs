//! Field validators applied to outbound values.

use super::FieldValue;

pub fn non_negative(value: &FieldValue) -> Result<(), String> {
    match value {
        FieldValue::Integer(amount) if *amount < 0 => {
            Err(format!("must not be negative, got {amount}"))
        }
        FieldValue::Number(amount) if *amount < 0.0 => {
            Err(format!("must not be negative, got {amount}"))
        }
        _ => Ok(()),
    }
}

/// Collection pages hold between 10 and 100 entries.
pub fn page_size(value: &FieldValue) -> Result<(), String> {
    match value {
        FieldValue::Integer(size) if !(10..=100).contains(size) => {
            Err(format!("page size must be between 10 and 100, got {size}"))
        }
        _ => Ok(()),
    }
}

/// Accepts ISO-8601 durations such as `P1D`, `PT12H` or `P1Y2M10DT2H30M`.
pub fn iso_duration(value: &FieldValue) -> Result<(), String> {
    match value {
        FieldValue::String(duration) if !is_iso_duration(duration) => {
            Err(format!("'{duration}' is not an ISO-8601 duration"))
        }
        _ => Ok(()),
    }
}

fn is_iso_duration(value: &str) -> bool {
    let Some(rest) = value.strip_prefix('P') else {
        return false;
    };
    let (date, time) = match rest.split_once('T') {
        Some((_, "")) => return false,
        Some((date, time)) => (date, time),
        None => (rest, ""),
    };
    if date.is_empty() && time.is_empty() {
        return false;
    }

    components(date, "YMWD") && components(time, "HMS")
}

/// Every designator must be preceded by a number.
fn components(part: &str, designators: &str) -> bool {
    let mut digits = 0;
    for c in part.chars() {
        match c {
            '0'..='9' | '.' | ',' => digits += 1,
            c if designators.contains(c) && digits > 0 => digits = 0,
            _ => return false,
        }
    }
    digits == 0
}
