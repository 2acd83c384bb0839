//! SAP date and time formatting
//!
//! SAP transfers dates as `yyyyMMdd`, times as `HHmmss` and timestamps as the
//! two concatenated. Those strings carry no offset, so every conversion goes
//! through the time zone the formatter was built with.
//!
//! # Examples
//!
//! ```
//! use sapbridge_domain::utils::dates::SapDateFormatter;
//!
//! let formatter = SapDateFormatter::new(chrono_tz::Europe::Madrid);
//! let parsed = formatter.parse_datetime("20240131", "235959").unwrap();
//! assert_eq!(formatter.format_datetime(&parsed), "20240131235959");
//! ```

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone};
use chrono_tz::Tz;

use crate::config::DateConfig;
use crate::errors::{Result, SapBridgeError};

const DATE_FORMAT: &str = "%Y%m%d";
const TIME_FORMAT: &str = "%H%M%S";
const DATETIME_FORMAT: &str = "%Y%m%d%H%M%S";

/// Converts between SAP date strings and zoned timestamps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SapDateFormatter {
    tz: Tz,
}

impl SapDateFormatter {
    pub fn new(tz: Tz) -> Self {
        Self { tz }
    }

    /// Build from configuration.
    ///
    /// # Errors
    /// Returns `SapBridgeError::Config` if the time zone name is unknown.
    pub fn from_config(config: &DateConfig) -> Result<Self> {
        let tz = config.timezone.parse::<Tz>().map_err(|e| {
            SapBridgeError::Config(format!("Unknown time zone '{}': {}", config.timezone, e))
        })?;
        Ok(Self::new(tz))
    }

    pub fn timezone(&self) -> Tz {
        self.tz
    }

    /// Parse a SAP date (`yyyyMMdd`) and time (`HHmmss`) pair.
    ///
    /// # Errors
    /// Returns `SapBridgeError::InvalidInput` if either part is malformed or
    /// the local time does not exist in the configured zone.
    pub fn parse_datetime(&self, date: &str, time: &str) -> Result<DateTime<Tz>> {
        let naive = NaiveDateTime::parse_from_str(&format!("{date}{time}"), DATETIME_FORMAT)
            .map_err(|e| {
                SapBridgeError::InvalidInput(format!("Invalid SAP datetime '{date}{time}': {e}"))
            })?;
        self.localize(naive)
    }

    /// Parse a SAP date (`yyyyMMdd`) as local midnight.
    ///
    /// # Errors
    /// Returns `SapBridgeError::InvalidInput` if the date is malformed.
    pub fn parse_date(&self, date: &str) -> Result<DateTime<Tz>> {
        let naive = NaiveDate::parse_from_str(date, DATE_FORMAT)
            .map_err(|e| SapBridgeError::InvalidInput(format!("Invalid SAP date '{date}': {e}")))?
            .and_hms_opt(0, 0, 0)
            .ok_or_else(|| SapBridgeError::InvalidInput(format!("Invalid SAP date '{date}'")))?;
        self.localize(naive)
    }

    /// `yyyyMMdd` in the configured zone.
    pub fn format_date<T: TimeZone>(&self, t: &DateTime<T>) -> String {
        t.with_timezone(&self.tz).format(DATE_FORMAT).to_string()
    }

    /// `HHmmss` in the configured zone.
    pub fn format_time<T: TimeZone>(&self, t: &DateTime<T>) -> String {
        t.with_timezone(&self.tz).format(TIME_FORMAT).to_string()
    }

    /// `yyyyMMddHHmmss` in the configured zone.
    pub fn format_datetime<T: TimeZone>(&self, t: &DateTime<T>) -> String {
        t.with_timezone(&self.tz).format(DATETIME_FORMAT).to_string()
    }

    fn localize(&self, naive: NaiveDateTime) -> Result<DateTime<Tz>> {
        // Ambiguous wall-clock times (DST fall-back) resolve to the earlier instant.
        self.tz.from_local_datetime(&naive).earliest().ok_or_else(|| {
            SapBridgeError::InvalidInput(format!(
                "Local time {naive} does not exist in time zone {}",
                self.tz
            ))
        })
    }
}

impl Default for SapDateFormatter {
    fn default() -> Self {
        Self::new(Tz::UTC)
    }
}
