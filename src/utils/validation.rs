//! Input checks for the date entry flow.

use anyhow::{anyhow, Result};
use chrono::NaiveDate;

/// Format the date flow accepts, e.g. `01.01.2024`.
pub const DATE_FORMAT: &str = "%d.%m.%Y";

/// Checks that `input` is a real calendar date written as `DD.MM.YYYY`.
///
/// Day and month must be two digits and the year four, so `1.1.2024` and
/// `2024-01-01` are both rejected even though chrono could read the first.
/// Rejecting single-digit day or month is deliberate: the prompt asks for
/// `ДД.ММ.ГГГГ`, and a lenient `strptime`-style parse would accept
/// `1.1.2024` and store it in the sheet in a different shape.
pub fn validate_date(input: &str) -> Result<NaiveDate> {
    let parts: Vec<&str> = input.split('.').collect();
    if parts.len() != 3 {
        return Err(anyhow!("Date must look like DD.MM.YYYY"));
    }

    let widths = [2, 2, 4];
    for (part, width) in parts.iter().zip(widths) {
        if part.len() != width || !part.chars().all(|c| c.is_ascii_digit()) {
            return Err(anyhow!("Date must look like DD.MM.YYYY"));
        }
    }

    NaiveDate::parse_from_str(input, DATE_FORMAT)
        .map_err(|e| anyhow!("Not a calendar date: {e}"))
}
