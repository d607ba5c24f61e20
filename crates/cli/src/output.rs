//! Report rendering: table for humans, JSON for pipes.

use serde_json::json;
use tabled::{Table, Tabled};

use meup_client::Report;

#[derive(Tabled)]
struct MetricRow {
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Cost")]
    cost: String,
    #[tabled(rename = "GMV")]
    gmv: String,
    #[tabled(rename = "Impr")]
    impressions: u64,
    #[tabled(rename = "Clicks")]
    clicks: u64,
    #[tabled(rename = "Orders")]
    orders: u64,
    #[tabled(rename = "ROI")]
    roi: String,
}

/// Print a report as an aligned table with a totals line.
pub fn print_table(report: &Report) {
    if report.is_empty() {
        println!("no records for this range");
        return;
    }

    let rows: Vec<MetricRow> = report
        .records
        .iter()
        .map(|r| MetricRow {
            date: r.date.format("%Y-%m-%d").to_string(),
            cost: format!("{:.2}", r.cost),
            gmv: format!("{:.2}", r.gmv),
            impressions: r.impressions,
            clicks: r.clicks,
            orders: r.orders,
            roi: format!("{:.2}", r.roi()),
        })
        .collect();

    println!("{}", Table::new(rows));

    let t = report.totals();
    println!(
        "total: cost {:.2}  gmv {:.2}  impressions {}  clicks {}  orders {}  roi {:.2}",
        t.cost, t.gmv, t.impressions, t.clicks, t.orders, t.roi
    );
}

/// Print a report as a JSON document on stdout.
pub fn print_json(report: &Report) -> anyhow::Result<()> {
    let t = report.totals();
    let doc = json!({
        "records": report.records,
        "totals": t,
    });
    println!("{}", serde_json::to_string_pretty(&doc)?);
    Ok(())
}
