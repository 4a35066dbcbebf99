//! Time utilities: resolve "today" on the caller's calendar.

use anyhow::Result;
use chrono::{Local, NaiveDate, Utc};
use chrono_tz::Tz;

/// Current calendar date, either on the local clock or in an IANA tz like
/// "America/Toronto".
pub fn today_in(tz: Option<&str>) -> Result<NaiveDate> {
    match tz {
        None => Ok(Local::now().date_naive()),
        Some(name) => {
            let tz = parse_tz(name)?;
            Ok(Utc::now().with_timezone(&tz).date_naive())
        }
    }
}

fn parse_tz(name: &str) -> Result<Tz> {
    name.trim()
        .parse()
        .map_err(|_| anyhow::anyhow!("invalid timezone: {name}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_timezone_is_rejected() {
        let err = today_in(Some("Mars/Olympus_Mons")).unwrap_err();
        assert!(err.to_string().contains("invalid timezone"));
    }

    #[test]
    fn test_named_timezone_is_within_a_day_of_utc() {
        let utc = Utc::now().date_naive();
        let toronto = today_in(Some("America/Toronto")).unwrap();
        let diff = (utc - toronto).num_days().abs();
        assert!(diff <= 1, "expected at most one day apart, got {diff}");
    }
}
