use chrono::{DateTime, Datelike, Timelike};

const KB: u64 = 1024;
const MB: u64 = 1024 * 1024;
const GB: u64 = 1024 * 1024 * 1024;

const MONTHS: &[&str] = &[
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Placeholder rendered for an absent or unreadable timestamp.
pub const DATE_PLACEHOLDER: &str = "—";

/// Render a byte count with a unit chosen by powers of 1024.
///
/// Counts below 1 KB render as whole bytes. Exact unit boundaries (1024,
/// 1024², 1024³) roll over to the larger unit. `digits` controls the decimal
/// places, defaulting to 1.
pub fn file_size(size_bytes: u64, digits: Option<usize>) -> String {
    let digits = digits.unwrap_or(1);
    if size_bytes < KB {
        format!("{size_bytes} Bytes")
    } else if size_bytes < MB {
        format!("{:.*} KB", digits, size_bytes as f64 / KB as f64)
    } else if size_bytes < GB {
        format!("{:.*} MB", digits, size_bytes as f64 / MB as f64)
    } else {
        format!("{:.*} GB", digits, size_bytes as f64 / GB as f64)
    }
}

/// Render an ISO-8601 timestamp as `H:MMam/pm, D Mon`.
///
/// Twelve-hour clock with 12 for both noon and midnight, minutes zero-padded.
/// Absent or unparsable input renders as the em-dash placeholder.
pub fn date_time(iso: Option<&str>) -> String {
    let Some(iso) = iso else {
        return DATE_PLACEHOLDER.to_string();
    };
    let Ok(date) = DateTime::parse_from_rfc3339(iso) else {
        return DATE_PLACEHOLDER.to_string();
    };

    let hour = date.hour();
    let period = if hour >= 12 { "pm" } else { "am" };
    let hour = match hour % 12 {
        0 => 12,
        h => h,
    };
    let month = MONTHS[date.month0() as usize];

    format!(
        "{}:{:02}{}, {} {}",
        hour,
        date.minute(),
        period,
        date.day(),
        month
    )
}
