//! Form validation errors
//!
//! Every form is checked before a request is issued. A failed check names the
//! offending field so the view can show it inline.

use std::sync::OnceLock;

use regex::Regex;
use thiserror::Error;

/// A single failed field check
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{field}: {message}")]
pub struct ValidationError {
    /// Wire name of the field (e.g. `foodName`)
    pub field: &'static str,
    /// Human-readable reason
    pub message: String,
}

impl ValidationError {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }

    pub fn required(field: &'static str) -> Self {
        Self::new(field, "is required")
    }
}

/// Result type for form validation
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Trim a field and reject it when blank
pub(crate) fn required(field: &'static str, value: &str) -> ValidationResult<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err(ValidationError::required(field))
    } else {
        Ok(trimmed.to_string())
    }
}

/// Parse an optional positive number; blank input yields `None`
pub(crate) fn optional_positive(field: &'static str, value: &str) -> ValidationResult<Option<f64>> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    let parsed: f64 = trimmed
        .parse()
        .map_err(|_| ValidationError::new(field, "must be a number"))?;
    if !parsed.is_finite() || parsed <= 0.0 {
        return Err(ValidationError::new(field, "must be greater than zero"));
    }
    Ok(Some(parsed))
}

/// Parse a required non-negative integer
pub(crate) fn non_negative_int(field: &'static str, value: &str) -> ValidationResult<u32> {
    let trimmed = required(field, value)?;
    trimmed
        .parse()
        .map_err(|_| ValidationError::new(field, "must be a whole number of zero or more"))
}

/// Parse an exercise duration into whole minutes.
///
/// Accepts a bare number of minutes (`45`), minutes with a suffix (`45m`,
/// `45 min`), hours (`1h`, `1.5h`) or both (`1h 30m`, `1h30`).
pub fn parse_duration_minutes(input: &str) -> Option<u32> {
    static DURATION_RE: OnceLock<Regex> = OnceLock::new();
    let re = DURATION_RE.get_or_init(|| {
        Regex::new(
            r"^(?:(?P<h>\d+(?:\.\d+)?)\s*h(?:ours?|rs?)?)?\s*(?:(?P<m>\d+)\s*(?:m(?:in(?:utes?|s)?)?)?)?$",
        )
        .expect("duration regex is valid")
    });

    let s = input.trim().to_lowercase();
    if s.is_empty() {
        return None;
    }

    let caps = re.captures(&s)?;
    let hour_minutes: u32 = match caps.name("h") {
        Some(h) => {
            let hours: f64 = h.as_str().parse().ok()?;
            let minutes = (hours * 60.0).round();
            if !minutes.is_finite() || minutes > u32::MAX as f64 {
                return None;
            }
            minutes as u32
        }
        None => 0,
    };
    let minutes: u32 = match caps.name("m") {
        Some(m) => m.as_str().parse().ok()?,
        None => 0,
    };

    match hour_minutes.checked_add(minutes)? {
        0 => None,
        total => Some(total),
    }
}
