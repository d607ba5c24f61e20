//! Typed cache-key construction for report queries.
//!
//! Keys render as `"<endpoint>_<start>_<end>"` with ISO dates
//! (e.g. `ads_2024-10-03_2024-10-10`). Building them from [`QueryKey`]
//! instead of ad-hoc string formatting keeps call sites collision-free.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::select::DateRange;

/// The report endpoints a query can target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportKind {
    /// Ads overview: per-day spend and GMV across campaigns.
    AdsOverview,
    /// GMV-Max product report.
    GmvMaxProduct,
}

impl ReportKind {
    /// Short endpoint discriminator used in cache keys.
    pub fn endpoint(&self) -> &'static str {
        match self {
            ReportKind::AdsOverview => "ads",
            ReportKind::GmvMaxProduct => "gmv_max",
        }
    }
}

impl fmt::Display for ReportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.endpoint())
    }
}

/// A fully-specified cache key: endpoint plus normalized date bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct QueryKey {
    pub kind: ReportKind,
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl QueryKey {
    /// Build a key, swapping the bounds if they arrive reversed.
    pub fn new(kind: ReportKind, start: NaiveDate, end: NaiveDate) -> Self {
        if start <= end { Self { kind, start, end } } else { Self { kind, start: end, end: start } }
    }

    /// Build a key from an already-ordered date range.
    pub fn from_range(kind: ReportKind, range: &DateRange) -> Self {
        Self { kind, start: range.start, end: range.end }
    }
}

impl fmt::Display for QueryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}_{}_{}",
            self.kind.endpoint(),
            self.start.format("%Y-%m-%d"),
            self.end.format("%Y-%m-%d")
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_key_format() {
        let key = QueryKey::new(ReportKind::AdsOverview, d(2024, 10, 3), d(2024, 10, 10));
        assert_eq!(key.to_string(), "ads_2024-10-03_2024-10-10");
    }

    #[test]
    fn test_key_normalizes_reversed_bounds() {
        let key = QueryKey::new(ReportKind::GmvMaxProduct, d(2024, 10, 10), d(2024, 10, 3));
        assert_eq!(key.to_string(), "gmv_max_2024-10-03_2024-10-10");
    }

    #[test]
    fn test_key_from_range() {
        let range = DateRange::new(d(2024, 10, 10), d(2024, 10, 3));
        let key = QueryKey::from_range(ReportKind::AdsOverview, &range);
        assert_eq!(key.to_string(), "ads_2024-10-03_2024-10-10");
    }

    #[test]
    fn test_distinct_endpoints_distinct_keys() {
        let a = QueryKey::new(ReportKind::AdsOverview, d(2024, 10, 3), d(2024, 10, 10));
        let b = QueryKey::new(ReportKind::GmvMaxProduct, d(2024, 10, 3), d(2024, 10, 10));
        assert_ne!(a.to_string(), b.to_string());
    }
}
