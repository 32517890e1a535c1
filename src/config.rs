use chrono::FixedOffset;

use crate::error::{Error, Result};

pub const DEFAULT_API_URL: &str = "https://api.showtimesg.com/api";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
/// Upstream showtimes are Singapore local time.
pub const DEFAULT_UTC_OFFSET_HOURS: i32 = 8;

pub const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
     AppleWebKit/537.36 (KHTML, like Gecko) \
     Chrome/143.0.0.0 Safari/537.36";

#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub api_url: String,
    pub timeout_secs: u64,
    pub utc_offset_hours: i32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            utc_offset_hours: DEFAULT_UTC_OFFSET_HOURS,
        }
    }
}

impl Settings {
    pub fn utc_offset(&self) -> Result<FixedOffset> {
        self.utc_offset_hours
            .checked_mul(3600)
            .and_then(FixedOffset::east_opt)
            .ok_or(Error::InvalidOffset(self.utc_offset_hours))
    }

    /// Base URL without a trailing slash.
    pub fn base_url(&self) -> &str {
        self.api_url.trim_end_matches('/')
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_offset_is_singapore() {
        let offset = Settings::default().utc_offset().unwrap();
        assert_eq!(offset.local_minus_utc(), 8 * 3600);
    }

    #[test]
    fn out_of_range_offset_is_rejected() {
        let settings = Settings {
            utc_offset_hours: 30,
            ..Default::default()
        };
        assert!(matches!(settings.utc_offset(), Err(Error::InvalidOffset(30))));
    }

    #[test]
    fn base_url_drops_trailing_slash() {
        let settings = Settings {
            api_url: "http://localhost:8080/api/".to_string(),
            ..Default::default()
        };
        assert_eq!(settings.base_url(), "http://localhost:8080/api");
    }
}
