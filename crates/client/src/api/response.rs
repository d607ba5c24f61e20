//! Report response types and normalization.
//!
//! The backend wraps every report in a `{ "data": { "list": [...] } }`
//! envelope of per-day metric records. The envelope is flattened into a
//! stable [`Report`] before it reaches callers or the cache.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Raw response envelope from the backend.
#[derive(Debug, Deserialize)]
pub(crate) struct ApiEnvelope {
    #[serde(default)]
    data: Option<DataList>,
}

#[derive(Debug, Deserialize)]
struct DataList {
    #[serde(default)]
    list: Vec<MetricRecord>,
}

/// One day (or campaign-day) of advertising metrics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricRecord {
    pub date: NaiveDate,
    /// Ad spend.
    #[serde(default)]
    pub cost: f64,
    /// Gross merchandise value attributed to ads.
    #[serde(default)]
    pub gmv: f64,
    #[serde(default)]
    pub impressions: u64,
    #[serde(default)]
    pub clicks: u64,
    #[serde(default)]
    pub orders: u64,
}

impl MetricRecord {
    /// Return on ad spend: GMV over cost, 0 when nothing was spent.
    pub fn roi(&self) -> f64 {
        if self.cost == 0.0 { 0.0 } else { self.gmv / self.cost }
    }
}

/// A normalized report: the flattened record list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub records: Vec<MetricRecord>,
}

/// Column totals across a report.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ReportTotals {
    pub cost: f64,
    pub gmv: f64,
    pub impressions: u64,
    pub clicks: u64,
    pub orders: u64,
    pub roi: f64,
}

impl Report {
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Sum every column; ROI is recomputed from the totals, not averaged.
    pub fn totals(&self) -> ReportTotals {
        let cost: f64 = self.records.iter().map(|r| r.cost).sum();
        let gmv: f64 = self.records.iter().map(|r| r.gmv).sum();
        ReportTotals {
            cost,
            gmv,
            impressions: self.records.iter().map(|r| r.impressions).sum(),
            clicks: self.records.iter().map(|r| r.clicks).sum(),
            orders: self.records.iter().map(|r| r.orders).sum(),
            roi: if cost == 0.0 { 0.0 } else { gmv / cost },
        }
    }
}

impl From<ApiEnvelope> for Report {
    fn from(envelope: ApiEnvelope) -> Self {
        let records = envelope.data.map(|d| d.list).unwrap_or_default();
        Report { records }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(day: u32, cost: f64, gmv: f64) -> MetricRecord {
        MetricRecord {
            date: NaiveDate::from_ymd_opt(2024, 10, day).unwrap(),
            cost,
            gmv,
            impressions: 1000,
            clicks: 50,
            orders: 5,
        }
    }

    #[test]
    fn test_envelope_flattens_to_report() {
        let json = r#"{"data":{"list":[
            {"date":"2024-10-03","cost":10.0,"gmv":35.0,"impressions":1200,"clicks":60,"orders":4},
            {"date":"2024-10-04","cost":12.5,"gmv":20.0}
        ]}}"#;
        let envelope: ApiEnvelope = serde_json::from_str(json).unwrap();
        let report = Report::from(envelope);

        assert_eq!(report.records.len(), 2);
        assert_eq!(report.records[0].impressions, 1200);
        assert_eq!(report.records[1].clicks, 0); // missing fields default
    }

    #[test]
    fn test_empty_envelope() {
        let envelope: ApiEnvelope = serde_json::from_str(r#"{"data":null}"#).unwrap();
        let report = Report::from(envelope);
        assert!(report.is_empty());

        let envelope: ApiEnvelope = serde_json::from_str(r#"{}"#).unwrap();
        assert!(Report::from(envelope).is_empty());
    }

    #[test]
    fn test_roi_zero_cost() {
        let mut r = record(3, 0.0, 100.0);
        assert_eq!(r.roi(), 0.0);
        r.cost = 50.0;
        assert_eq!(r.roi(), 2.0);
    }

    #[test]
    fn test_totals_recompute_roi() {
        let report = Report { records: vec![record(3, 10.0, 40.0), record(4, 30.0, 40.0)] };
        let totals = report.totals();
        assert_eq!(totals.cost, 40.0);
        assert_eq!(totals.gmv, 80.0);
        assert_eq!(totals.impressions, 2000);
        assert_eq!(totals.orders, 10);
        // 80/40, not the average of the per-day ratios (4.0 and 1.33).
        assert_eq!(totals.roi, 2.0);
    }
}
