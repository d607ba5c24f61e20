//! Quick-select presets for the date-range selector.
//!
//! Presets are independent of calendar state: each resolution recomputes the
//! concrete bounds against "now" through the caller's clock, so a preset
//! chosen at 23:59 and again at 00:01 yields different ranges.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::select::DateRange;

/// Symbolic ids of the quick-select options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuickKey {
    Today,
    Yesterday,
    Last7Days,
    Last30Days,
}

impl QuickKey {
    /// All options in display order.
    pub fn all() -> &'static [QuickKey] {
        &[QuickKey::Today, QuickKey::Yesterday, QuickKey::Last7Days, QuickKey::Last30Days]
    }

    /// Stable id used in serialized form and CLI flags.
    pub fn key(&self) -> &'static str {
        match self {
            QuickKey::Today => "today",
            QuickKey::Yesterday => "yesterday",
            QuickKey::Last7Days => "last7days",
            QuickKey::Last30Days => "last30days",
        }
    }

    /// Human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            QuickKey::Today => "Today",
            QuickKey::Yesterday => "Yesterday",
            QuickKey::Last7Days => "Last 7 days",
            QuickKey::Last30Days => "Last 30 days",
        }
    }

    /// Resolve to concrete bounds relative to `today`.
    ///
    /// The rolling windows are inclusive and end on `today`: "last 7 days"
    /// spans `today - 6 ..= today`.
    pub fn resolve(&self, today: NaiveDate) -> DateRange {
        match self {
            QuickKey::Today => DateRange::single(today),
            QuickKey::Yesterday => DateRange::single(today - chrono::Duration::days(1)),
            QuickKey::Last7Days => DateRange::new(today - chrono::Duration::days(6), today),
            QuickKey::Last30Days => DateRange::new(today - chrono::Duration::days(29), today),
        }
    }
}

impl fmt::Display for QuickKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for QuickKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "today" => Ok(QuickKey::Today),
            "yesterday" => Ok(QuickKey::Yesterday),
            "last7days" => Ok(QuickKey::Last7Days),
            "last30days" => Ok(QuickKey::Last30Days),
            other => Err(format!("unknown preset: {} (expected today|yesterday|last7days|last30days)", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_today_resolves_to_single_day() {
        let range = QuickKey::Today.resolve(d(2024, 10, 3));
        assert_eq!(range.start, d(2024, 10, 3));
        assert_eq!(range.end, d(2024, 10, 3));
    }

    #[test]
    fn test_yesterday() {
        let range = QuickKey::Yesterday.resolve(d(2024, 10, 3));
        assert_eq!(range.start, d(2024, 10, 2));
        assert_eq!(range.end, d(2024, 10, 2));
    }

    #[test]
    fn test_rolling_windows_are_inclusive() {
        let range = QuickKey::Last7Days.resolve(d(2024, 10, 10));
        assert_eq!(range.start, d(2024, 10, 4));
        assert_eq!(range.end, d(2024, 10, 10));
        assert_eq!(range.days(), 7);

        let range = QuickKey::Last30Days.resolve(d(2024, 10, 30));
        assert_eq!(range.start, d(2024, 10, 1));
        assert_eq!(range.days(), 30);
    }

    #[test]
    fn test_resolution_moves_with_today() {
        // Same preset, different "now" - bounds are never stored.
        let a = QuickKey::Last7Days.resolve(d(2024, 10, 10));
        let b = QuickKey::Last7Days.resolve(d(2024, 10, 11));
        assert_ne!(a, b);
    }

    #[test]
    fn test_from_str_round_trip() {
        for key in QuickKey::all() {
            assert_eq!(key.key().parse::<QuickKey>().unwrap(), *key);
        }
        assert!("lastweek".parse::<QuickKey>().is_err());
    }
}
