//! Date based names for new notes, e.g. `2025-06-20 [2ec7].md`.

use chrono::NaiveDate;
use rand::Rng;

/// Random lowercase hex value between `0x1000` and `0xffff`, always four digits.
pub fn random_4_digit_hex() -> String {
    let value: u32 = rand::thread_rng().gen_range(0x1000..=0xffff);
    format!("{:x}", value)
}

/// `<YYYY-MM-DD> [<hex>]<extension>`; the extension keeps its leading dot.
pub fn suggest_date_based_name(date: NaiveDate, extension: &str) -> String {
    format!("{} [{}]{}", date.format("%Y-%m-%d"), random_4_digit_hex(), extension)
}
