/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 12/8/26
******************************************************************************/

//! Variable-precision timestamp type for HL7 `DTM` values.
//!
//! HL7 timestamps encode their own precision in their length: `2023` is a
//! year, `202306` a month, `20230615120000` a full date-time. [`DtmValue`]
//! carries the parsed instant together with the precision it arrived with,
//! so that encoding reproduces the original text exactly.

use crate::separators::ValueFormats;
use arrayvec::ArrayString;
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Precision of an HL7 timestamp, implied by the length of its text form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum DtmPrecision {
    /// `YYYY` (4 characters).
    Year,
    /// `YYYYMM` (6 characters).
    Month,
    /// `YYYYMMDD` (8 characters).
    Day,
    /// `YYYYMMDDHHMM` (12 characters).
    Minute,
    /// `YYYYMMDDHHMMSS` (14 characters).
    Second,
}

/// An HL7 timestamp with its original precision.
///
/// Components below the stated precision are normalized (January, the 1st,
/// midnight) and are not emitted when the value is formatted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct DtmValue {
    datetime: NaiveDateTime,
    precision: DtmPrecision,
}

impl DtmValue {
    /// Creates a timestamp with an explicit precision.
    #[inline]
    #[must_use]
    pub const fn new(datetime: NaiveDateTime, precision: DtmPrecision) -> Self {
        Self {
            datetime,
            precision,
        }
    }

    /// Creates a day-precision timestamp from a calendar date.
    #[inline]
    #[must_use]
    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            datetime: date.and_time(NaiveTime::MIN),
            precision: DtmPrecision::Day,
        }
    }

    /// Creates a second-precision timestamp from a full date-time.
    #[inline]
    #[must_use]
    pub const fn from_date_time(datetime: NaiveDateTime) -> Self {
        Self {
            datetime,
            precision: DtmPrecision::Second,
        }
    }

    /// Returns the underlying date-time, normalized below the precision.
    #[inline]
    #[must_use]
    pub const fn datetime(&self) -> NaiveDateTime {
        self.datetime
    }

    /// Returns the precision the value was parsed or constructed with.
    #[inline]
    #[must_use]
    pub const fn precision(&self) -> DtmPrecision {
        self.precision
    }

    /// Returns the calendar date portion.
    #[inline]
    #[must_use]
    pub const fn date(&self) -> NaiveDate {
        self.datetime.date()
    }

    /// Parses HL7 timestamp text, inferring precision from its length.
    ///
    /// # Arguments
    /// * `text` - The raw timestamp text
    /// * `formats` - The active format strings
    ///
    /// # Returns
    /// `None` for malformed text or an unsupported length. Callers treat
    /// that as an absent slot rather than an error.
    #[must_use]
    pub fn parse(text: &str, formats: &ValueFormats) -> Option<Self> {
        match text.len() {
            4 => {
                let year: i32 = text.parse().ok()?;
                let date = NaiveDate::from_ymd_opt(year, 1, 1)?;
                Some(Self::new(date.and_time(NaiveTime::MIN), DtmPrecision::Year))
            }
            6 => {
                let year: i32 = text.get(..4)?.parse().ok()?;
                let month: u32 = text.get(4..)?.parse().ok()?;
                let date = NaiveDate::from_ymd_opt(year, month, 1)?;
                Some(Self::new(
                    date.and_time(NaiveTime::MIN),
                    DtmPrecision::Month,
                ))
            }
            8 => {
                let date = NaiveDate::parse_from_str(text, formats.date).ok()?;
                Some(Self::from_date(date))
            }
            12 => {
                let dt = NaiveDateTime::parse_from_str(text, formats.date_minutes).ok()?;
                Some(Self::new(dt, DtmPrecision::Minute))
            }
            14 => {
                let dt = NaiveDateTime::parse_from_str(text, formats.date_seconds).ok()?;
                Some(Self::new(dt, DtmPrecision::Second))
            }
            _ => None,
        }
    }

    /// Formats the timestamp at its own precision.
    ///
    /// The buffer fits every four-digit year at full second precision
    /// (14 characters). Parsed values always satisfy that bound; a value
    /// constructed directly from a chrono date outside years 0000-9999
    /// would not, and is rejected in debug builds.
    #[must_use]
    pub fn format(&self, formats: &ValueFormats) -> ArrayString<16> {
        let fmt = match self.precision {
            DtmPrecision::Year => formats.year,
            DtmPrecision::Month => formats.year_month,
            DtmPrecision::Day => formats.date,
            DtmPrecision::Minute => formats.date_minutes,
            DtmPrecision::Second => formats.date_seconds,
        };
        let mut buf = ArrayString::new();
        let written = std::fmt::write(&mut buf, format_args!("{}", self.datetime.format(fmt)));
        debug_assert!(written.is_ok(), "timestamp overflowed its format buffer");
        buf
    }
}

impl fmt::Display for DtmValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format(&ValueFormats::standard()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn formats() -> ValueFormats {
        ValueFormats::standard()
    }

    #[test]
    fn test_parse_year() {
        let dtm = DtmValue::parse("2023", &formats()).unwrap();
        assert_eq!(dtm.precision(), DtmPrecision::Year);
        assert_eq!(dtm.date(), NaiveDate::from_ymd_opt(2023, 1, 1).unwrap());
    }

    #[test]
    fn test_parse_month() {
        let dtm = DtmValue::parse("202306", &formats()).unwrap();
        assert_eq!(dtm.precision(), DtmPrecision::Month);
        assert_eq!(dtm.date(), NaiveDate::from_ymd_opt(2023, 6, 1).unwrap());
    }

    #[test]
    fn test_parse_day() {
        let dtm = DtmValue::parse("20230615", &formats()).unwrap();
        assert_eq!(dtm.precision(), DtmPrecision::Day);
        assert_eq!(dtm.date(), NaiveDate::from_ymd_opt(2023, 6, 15).unwrap());
    }

    #[test]
    fn test_parse_second() {
        let dtm = DtmValue::parse("20230615120000", &formats()).unwrap();
        assert_eq!(dtm.precision(), DtmPrecision::Second);
        assert_eq!(dtm.format(&formats()).as_str(), "20230615120000");
    }

    #[test]
    fn test_parse_malformed() {
        assert!(DtmValue::parse("", &formats()).is_none());
        assert!(DtmValue::parse("abcd", &formats()).is_none());
        assert!(DtmValue::parse("202313", &formats()).is_none());
        assert!(DtmValue::parse("20230632", &formats()).is_none());
        assert!(DtmValue::parse("2023061", &formats()).is_none());
    }

    #[test]
    fn test_round_trip_every_precision() {
        for text in ["2023", "202306", "20230615", "202306151200", "20230615120000"] {
            let dtm = DtmValue::parse(text, &formats()).unwrap();
            assert_eq!(dtm.format(&formats()).as_str(), text);
        }
    }

    #[test]
    fn test_format_fits_four_digit_years() {
        let date = NaiveDate::from_ymd_opt(9999, 12, 31).unwrap();
        let dtm = DtmValue::new(
            date.and_hms_opt(23, 59, 59).unwrap(),
            DtmPrecision::Second,
        );
        assert_eq!(dtm.format(&formats()).as_str(), "99991231235959");
    }

    #[test]
    fn test_display_uses_own_precision() {
        let dtm = DtmValue::parse("202306", &formats()).unwrap();
        assert_eq!(dtm.to_string(), "202306");
    }
}
