//! Subcommand implementations.
//!
//! Every report command shares the same shape: resolve a date range from
//! flags, build the cached report pipeline from configuration, fetch, and
//! render as a table or JSON.

pub mod gmv_max;
pub mod overview;
pub mod presets;

use anyhow::{Context, Result, bail};
use clap::Args;

use meup_client::api::parse_iso_date;
use meup_client::{ReportQuery, ReportService, ShopClient, ShopConfig};
use meup_core::select::DateRange;
use meup_core::{AppConfig, Clock, Error, QuickKey, ReportKind, SystemClock};

use crate::output;

/// Date-range flags shared by the report subcommands.
#[derive(Args, Debug)]
pub struct RangeArgs {
    /// Quick preset (today, yesterday, last7days, last30days)
    #[arg(long, conflicts_with_all = ["start", "end"])]
    pub preset: Option<QuickKey>,

    /// Range start, inclusive (YYYY-MM-DD)
    #[arg(long, requires = "end")]
    pub start: Option<String>,

    /// Range end, inclusive (YYYY-MM-DD)
    #[arg(long, requires = "start")]
    pub end: Option<String>,

    /// Emit JSON instead of a table
    #[arg(long)]
    pub json: bool,
}

impl RangeArgs {
    /// Resolve the flags into concrete bounds.
    ///
    /// Explicit dates win over presets (clap rejects the combination), out-of
    /// order dates are swapped, and with no flags at all the range defaults to
    /// the last 7 days.
    pub fn resolve(&self) -> Result<DateRange> {
        if let (Some(start), Some(end)) = (&self.start, &self.end) {
            let start = parse_iso_date(start)?;
            let end = parse_iso_date(end)?;
            return Ok(DateRange::new(start, end));
        }

        let today = SystemClock.today();
        let preset = self.preset.unwrap_or(QuickKey::Last7Days);
        Ok(preset.resolve(today))
    }
}

/// Fetch one report through the cached pipeline and render it.
pub async fn run_report(kind: ReportKind, args: &RangeArgs) -> Result<()> {
    let config = AppConfig::load().context("loading configuration")?;
    let range = args.resolve()?;
    let query = ReportQuery::new(kind, range);

    tracing::info!("fetching {} for {}", query.cache_key(), range);

    let client = ShopClient::new(ShopConfig::from(&config))?;
    let service = ReportService::new(client, config.cache_ttl(), config.rate_limit_cooldown());

    match service.report(&query).await {
        Ok(report) => {
            if args.json {
                output::print_json(&report)?;
            } else {
                output::print_table(&report);
            }
            Ok(())
        }
        Err(Error::RateLimited { retry_after_secs }) => {
            bail!("rate limited by the backend; retry in {}s", retry_after_secs)
        }
        Err(e) => Err(e.into()),
    }
}
