//! Clock-time token normalization.
//!
//! Tokens arrive as typed by the user (`645am`, `12pm`, `0815`) and are
//! rewritten into the fixed-width form the chrono format strings expect
//! before they are parsed.

use super::{Result, TimeRangeError};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use log::debug;

/// Format accepted for a normalized 12-hour token, e.g. `0645am`.
const STANDARD_INPUT_FORMAT: &str = "%I%M%p";
/// Format accepted for a 24-hour token, e.g. `0645`.
const MILITARY_INPUT_FORMAT: &str = "%H%M";

/// Pad a 12-hour token out to four digits plus its meridiem suffix.
///
/// The digit run is everything except the last two characters:
///
/// | run length | example  | result    |
/// |------------|----------|-----------|
/// | 1          | `1pm`    | `0100pm`  |
/// | 2          | `11am`   | `1100am`  |
/// | 3          | `645am`  | `0645am`  |
/// | 4          | `1230pm` | `1230pm`  |
///
/// Any other length is returned unchanged and left for the time parser to
/// reject. A colon between hour and minutes (`06:45AM`, the rendered form)
/// is dropped first so rendered output can be parsed again.
pub fn normalize_standard(token: &str) -> String {
    let compact = token.replacen(':', "", 1);
    let (digits, suffix) = split_meridiem(&compact);

    match digits.len() {
        1 => format!("0{digits}00{suffix}"),
        2 => format!("{digits}00{suffix}"),
        3 => format!("0{digits}{suffix}"),
        _ => compact,
    }
}

/// Check that a 24-hour token is exactly four ASCII digits.
pub fn normalize_military(token: &str) -> Result<&str> {
    if token.len() == 4 && token.bytes().all(|b| b.is_ascii_digit()) {
        Ok(token)
    } else {
        Err(TimeRangeError::MalformedToken(token.to_string()))
    }
}

/// Parse a 12-hour token onto the reference date.
pub(super) fn parse_standard_token(token: &str) -> Result<NaiveDateTime> {
    let normalized = normalize_standard(token);
    debug!("Normalized standard token '{}' -> '{}'", token, normalized);
    parse_on_reference_date(normalized, STANDARD_INPUT_FORMAT)
}

/// Parse a 24-hour token onto the reference date.
pub(super) fn parse_military_token(token: &str) -> Result<NaiveDateTime> {
    let normalized = normalize_military(token)?;
    parse_on_reference_date(normalized.to_string(), MILITARY_INPUT_FORMAT)
}

fn parse_on_reference_date(token: String, format: &str) -> Result<NaiveDateTime> {
    match NaiveTime::parse_from_str(&token, format) {
        Ok(time) => Ok(NaiveDate::default().and_time(time)),
        Err(source) => Err(TimeRangeError::InvalidTime { token, source }),
    }
}

// Tokens shorter than the suffix have no digit run at all.
fn split_meridiem(token: &str) -> (&str, &str) {
    match token.len().checked_sub(2) {
        Some(at) if token.is_char_boundary(at) => token.split_at(at),
        _ => ("", token),
    }
}
