//! `meup gmv-max`: GMV-Max product metrics for a date range.

use anyhow::Result;

use meup_core::ReportKind;

use crate::commands::{RangeArgs, run_report};

pub async fn run(args: &RangeArgs) -> Result<()> {
    run_report(ReportKind::GmvMaxProduct, args).await
}
