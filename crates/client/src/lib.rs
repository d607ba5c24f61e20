//! HTTP clients and the cached report pipeline for the meup dashboard.
//!
//! Three layers:
//!
//! - [`api`]: the analytics backend client ([`ShopClient`]) plus its
//!   request/response/error types.
//! - [`business`]: the TikTok Business API collaborator and its token store.
//! - [`report`]: [`ReportService`], which fronts a [`ReportApi`] with the
//!   TTL cache, per-key single-flight and the 429 cooldown.

pub mod api;
pub mod business;
pub mod report;

pub use api::{ApiError, MetricRecord, Report, ReportQuery, ReportTotals, ShopClient, ShopConfig};
pub use business::{BusinessClient, BusinessConfig, TokenStore};
pub use report::{ReportApi, ReportService};
