//! Report query types and validation.

use chrono::NaiveDate;
use serde::Serialize;

use meup_core::select::DateRange;
use meup_core::{QueryKey, ReportKind};

use crate::api::ApiError;

/// A date-bounded report query against one endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportQuery {
    pub kind: ReportKind,
    pub range: DateRange,
}

/// Wire form of the query string: `?start_date=...&end_date=...`.
#[derive(Debug, Serialize)]
pub(crate) struct ReportParams {
    pub start_date: String,
    pub end_date: String,
}

impl ReportQuery {
    /// Build a query from an already-ordered range.
    pub fn new(kind: ReportKind, range: DateRange) -> Self {
        Self { kind, range }
    }

    /// Build a query from ISO `YYYY-MM-DD` strings.
    ///
    /// A reversed pair is swapped rather than rejected, matching the
    /// picker's behavior.
    pub fn from_iso(kind: ReportKind, start: &str, end: &str) -> Result<Self, ApiError> {
        let start = parse_iso_date(start)?;
        let end = parse_iso_date(end)?;
        Ok(Self { kind, range: DateRange::new(start, end) })
    }

    /// Cache key for this query.
    pub fn cache_key(&self) -> QueryKey {
        QueryKey::from_range(self.kind, &self.range)
    }

    pub(crate) fn params(&self) -> ReportParams {
        ReportParams { start_date: self.range.start_iso(), end_date: self.range.end_iso() }
    }
}

/// Parse a strict ISO `YYYY-MM-DD` date.
pub fn parse_iso_date(input: &str) -> Result<NaiveDate, ApiError> {
    let date_regex = regex::Regex::new(r"^\d{4}-\d{2}-\d{2}$").unwrap();
    if !date_regex.is_match(input) {
        return Err(ApiError::InvalidQuery(format!("expected YYYY-MM-DD, got {:?}", input)));
    }
    NaiveDate::parse_from_str(input, "%Y-%m-%d")
        .map_err(|e| ApiError::InvalidQuery(format!("invalid date {:?}: {}", input, e)))
}
