//! Time representation for annotation timestamps
//!
//! Timestamps are plain `f64` seconds relative to the active time source's
//! zero point. Every textual form is derived from those seconds and is never
//! used as the source of truth for ordering or editing.
//!
//! Three display forms are used:
//! - clock: `HH:MM:SS` (CSV `time_formatted`, search target)
//! - compact: `M:SS` or `H:MM:SS` (timer and timeline labels)
//! - precise: `HH:MM:SS.mmm` (editor input, see [`Timecode`])

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{EmoLabelError, Result};

/// Whole seconds for display; negative and non-finite inputs become zero.
fn whole_seconds(seconds: f64) -> u64 {
    if seconds.is_finite() && seconds > 0.0 {
        seconds.floor() as u64
    } else {
        0
    }
}

/// Format seconds as zero-padded `HH:MM:SS`, truncating the fraction.
pub fn format_clock(seconds: f64) -> String {
    let total = whole_seconds(seconds);
    format!(
        "{:02}:{:02}:{:02}",
        total / 3600,
        (total % 3600) / 60,
        total % 60
    )
}

/// Format seconds as `M:SS`, or `H:MM:SS` once past the first hour.
pub fn format_compact(seconds: f64) -> String {
    let total = whole_seconds(seconds);
    let hours = total / 3600;
    let minutes = (total % 3600) / 60;
    let secs = total % 60;
    if hours > 0 {
        format!("{}:{:02}:{:02}", hours, minutes, secs)
    } else {
        format!("{}:{:02}", minutes, secs)
    }
}

/// Format seconds as `HH:MM:SS.mmm`, rounded to the nearest millisecond.
pub fn format_precise(seconds: f64) -> String {
    Timecode::from_seconds(seconds).to_string()
}

/// A millisecond-resolution timestamp used by the editor's text input.
///
/// Converting seconds to a `Timecode` and back never loses more than half a
/// millisecond.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub struct Timecode {
    millis: u64,
}

impl Timecode {
    /// Zero timecode constant.
    pub const ZERO: Self = Self { millis: 0 };

    /// Create a timecode from a millisecond count.
    #[inline]
    pub const fn from_millis(millis: u64) -> Self {
        Self { millis }
    }

    /// Create a timecode from float seconds, rounding to the nearest millisecond.
    /// Negative and non-finite inputs clamp to zero.
    pub fn from_seconds(seconds: f64) -> Self {
        if !seconds.is_finite() || seconds <= 0.0 {
            return Self::ZERO;
        }
        Self {
            millis: (seconds * 1000.0).round() as u64,
        }
    }

    /// Convert to float seconds.
    #[inline]
    pub fn as_seconds(self) -> f64 {
        self.millis as f64 / 1000.0
    }

    /// Total milliseconds.
    #[inline]
    pub fn as_millis(self) -> u64 {
        self.millis
    }

    /// Split into (hours, minutes, seconds, milliseconds).
    pub fn parts(self) -> (u64, u64, u64, u64) {
        let total_secs = self.millis / 1000;
        (
            total_secs / 3600,
            (total_secs % 3600) / 60,
            total_secs % 60,
            self.millis % 1000,
        )
    }
}

impl fmt::Display for Timecode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (h, m, s, ms) = self.parts();
        write!(f, "{:02}:{:02}:{:02}.{:03}", h, m, s, ms)
    }
}

impl FromStr for Timecode {
    type Err = EmoLabelError;

    /// Parse `H:MM:SS` with an optional 1-3 digit fraction (`.5` is 500 ms).
    fn from_str(s: &str) -> Result<Self> {
        let invalid = || EmoLabelError::InvalidTime(s.to_string());
        let trimmed = s.trim();

        let (hms, fraction) = match trimmed.split_once('.') {
            Some((hms, frac)) => (hms, Some(frac)),
            None => (trimmed, None),
        };

        let mut fields = hms.split(':');
        let (Some(h), Some(m), Some(sec), None) =
            (fields.next(), fields.next(), fields.next(), fields.next())
        else {
            return Err(invalid());
        };

        let number = |field: &str| -> Result<u64> {
            if field.is_empty() || !field.bytes().all(|b| b.is_ascii_digit()) {
                return Err(invalid());
            }
            field.parse::<u64>().map_err(|_| invalid())
        };

        let hours = number(h)?;
        let minutes = number(m)?;
        let seconds = number(sec)?;
        if minutes >= 60 || seconds >= 60 {
            return Err(invalid());
        }

        let millis = match fraction {
            None => 0,
            Some(frac) if (1..=3).contains(&frac.len()) => {
                let value = number(frac)?;
                value * 10u64.pow(3 - frac.len() as u32)
            }
            Some(_) => return Err(invalid()),
        };

        let millis = hours
            .checked_mul(3600)
            .and_then(|h| h.checked_add(minutes * 60 + seconds))
            .and_then(|total| total.checked_mul(1000))
            .and_then(|total| total.checked_add(millis))
            .ok_or_else(invalid)?;
        Ok(Self { millis })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_clock_format_truncates() {
        assert_eq!(format_clock(0.0), "00:00:00");
        assert_eq!(format_clock(5.9), "00:00:05");
        assert_eq!(format_clock(3723.4), "01:02:03");
    }

    #[test]
    fn test_compact_format() {
        assert_eq!(format_compact(65.0), "1:05");
        assert_eq!(format_compact(3600.0), "1:00:00");
        assert_eq!(format_compact(-4.0), "0:00");
        assert_eq!(format_compact(f64::NAN), "0:00");
    }

    #[test]
    fn test_precise_format() {
        assert_eq!(format_precise(5.2), "00:00:05.200");
        assert_eq!(format_precise(3723.0456), "01:02:03.046");
    }

    #[test]
    fn test_parse_variants() {
        let tc: Timecode = "00:01:02.5".parse().unwrap();
        assert_eq!(tc.as_millis(), 62_500);

        let tc: Timecode = "1:00:00".parse().unwrap();
        assert_eq!(tc.as_seconds(), 3600.0);

        let tc: Timecode = " 00:00:05.020 ".parse().unwrap();
        assert_eq!(tc.as_millis(), 5_020);
    }

    #[test]
    fn test_parse_rejects_malformed() {
        for bad in ["", "5", "00:05", "00:61:00", "00:00:60", "aa:bb:cc", "00:00:01.1234", "0:0:1:2"] {
            assert!(bad.parse::<Timecode>().is_err(), "{bad} should be rejected");
        }
    }

    #[test]
    fn test_parse_rejects_overflowing_hours() {
        assert!(matches!(
            "9999999999999999:00:00".parse::<Timecode>(),
            Err(EmoLabelError::InvalidTime(_))
        ));
        assert!(matches!(
            "5124095576030431:00:00.000".parse::<Timecode>(),
            Err(EmoLabelError::InvalidTime(_))
        ));
        let tc: Timecode = "1000000:00:00".parse().unwrap();
        assert_eq!(tc.as_millis(), 3_600_000_000_000);
    }

    proptest! {
        #[test]
        fn precise_round_trip_within_a_millisecond(secs in 0.0f64..400_000.0) {
            let text = format_precise(secs);
            let parsed: Timecode = text.parse().unwrap();
            prop_assert!((parsed.as_seconds() - secs).abs() <= 0.0005 + 1e-9);
        }

        #[test]
        fn timecode_text_is_stable(millis in 0u64..400_000_000) {
            let tc = Timecode::from_millis(millis);
            let reparsed: Timecode = tc.to_string().parse().unwrap();
            prop_assert_eq!(reparsed, tc);
        }
    }
}
