//! Date/time formatting for the pt-BR interface.
//!
//! Values are stored in UTC; display uses the UTC wall clock as well, the
//! same clock the backend writes its naive timestamps in.

use chrono::{DateTime, Utc};

/// "15/03/2024"
pub fn format_date(at: &DateTime<Utc>) -> String {
    at.format("%d/%m/%Y").to_string()
}

/// "15/03/2024 14:02"
pub fn format_datetime(at: &DateTime<Utc>) -> String {
    at.format("%d/%m/%Y %H:%M").to_string()
}

/// "14:02", used beside transcript entries
pub fn format_time(at: &DateTime<Utc>) -> String {
    at.format("%H:%M").to_string()
}

/// ISO text from the dashboard endpoints -> "15/03/2024"; unparseable text is returned as-is
pub fn format_iso_date(text: &str) -> String {
    match contracts::shared::timestamp::parse_timestamp(text) {
        Some(at) => format_date(&at),
        None => match chrono::NaiveDate::parse_from_str(text, "%Y-%m-%d") {
            Ok(date) => date.format("%d/%m/%Y").to_string(),
            Err(_) => text.to_string(),
        },
    }
}

/// "agora", "há 5 min", "há 2 h", "há 3 dias", then the plain date
pub fn format_relative(at: &DateTime<Utc>, now: &DateTime<Utc>) -> String {
    let elapsed = now.signed_duration_since(*at);
    let minutes = elapsed.num_minutes();
    if minutes < 1 {
        "agora".to_string()
    } else if minutes < 60 {
        format!("há {minutes} min")
    } else if elapsed.num_hours() < 24 {
        format!("há {} h", elapsed.num_hours())
    } else if elapsed.num_days() == 1 {
        "ontem".to_string()
    } else if elapsed.num_days() < 7 {
        format!("há {} dias", elapsed.num_days())
    } else {
        format_date(at)
    }
}
