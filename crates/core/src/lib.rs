//! Core types and shared functionality for meup.
//!
//! This crate provides:
//! - The headless date-range selection state machine
//! - Response caching, debouncing and single-flight coalescing
//! - Unified error types
//! - Configuration structures

pub mod cache;
pub mod clock;
pub mod config;
pub mod error;
pub mod select;

pub use cache::{Debouncer, QueryKey, ReportKind, ResponseCache, SingleFlight};
pub use clock::{Clock, ManualClock, SystemClock};
pub use config::AppConfig;
pub use error::Error;
pub use select::{DateRange, DateRangeSelector, QuickKey, SelectionMode};
