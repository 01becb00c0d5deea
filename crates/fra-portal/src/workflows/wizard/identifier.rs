use std::fmt;

use chrono::Utc;
use serde::{Deserialize, Serialize};

/// Short reference handed to the citizen after submitting the wizard.
///
/// The suffix is the last six digits of the submission timestamp in
/// milliseconds, so two submissions landing on the same value modulo
/// one million share an identifier.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ApplicationIdentifier(String);

impl ApplicationIdentifier {
    pub const PREFIX: &'static str = "FRA";
    pub const SUFFIX_DIGITS: usize = 6;

    pub fn from_timestamp_millis(millis: i64) -> Self {
        let suffix = millis.rem_euclid(1_000_000);
        Self(format!(
            "{}{:0width$}",
            Self::PREFIX,
            suffix,
            width = Self::SUFFIX_DIGITS
        ))
    }

    pub fn generate(clock: &impl Clock) -> Self {
        Self::from_timestamp_millis(clock.now_millis())
    }

    /// Accepts `FRA` followed by exactly six ASCII digits, ignoring case and
    /// surrounding whitespace.
    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim().to_ascii_uppercase();
        let suffix = raw.strip_prefix(Self::PREFIX)?;
        if suffix.len() == Self::SUFFIX_DIGITS && suffix.bytes().all(|b| b.is_ascii_digit()) {
            Some(Self(raw))
        } else {
            None
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ApplicationIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Wall-clock source for identifier generation.
pub trait Clock: Send + Sync {
    fn now_millis(&self) -> i64;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_millis(&self) -> i64 {
        Utc::now().timestamp_millis()
    }
}

/// Clock pinned to a single instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub i64);

impl Clock for FixedClock {
    fn now_millis(&self) -> i64 {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_last_six_digits_of_timestamp() {
        let id = ApplicationIdentifier::from_timestamp_millis(1_737_012_345_678);
        assert_eq!(id.as_str(), "FRA345678");
        assert_eq!(id.as_str().len(), 9);
    }

    #[test]
    fn pads_short_timestamps() {
        let id = ApplicationIdentifier::from_timestamp_millis(42);
        assert_eq!(id.as_str(), "FRA000042");
    }

    #[test]
    fn generate_reads_the_clock() {
        let id = ApplicationIdentifier::generate(&FixedClock(1_700_000_123_456));
        assert_eq!(id.to_string(), "FRA123456");
    }

    #[test]
    fn same_millisecond_window_collides() {
        let first = ApplicationIdentifier::from_timestamp_millis(1_700_000_123_456);
        let second = ApplicationIdentifier::from_timestamp_millis(1_700_001_123_456);
        assert_eq!(first, second);
    }

    #[test]
    fn parse_validates_shape() {
        assert_eq!(
            ApplicationIdentifier::parse(" fra789012 ").map(|id| id.to_string()),
            Some("FRA789012".to_string())
        );
        assert!(ApplicationIdentifier::parse("FRA12345").is_none());
        assert!(ApplicationIdentifier::parse("APP123456").is_none());
        assert!(ApplicationIdentifier::parse("FRA12345x").is_none());
    }
}
