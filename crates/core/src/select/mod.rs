//! Headless date-range selection widget.
//!
//! [`DateRangeSelector`] is the state machine behind a dual-calendar picker:
//! a frontend feeds it click/hover/navigation events and renders the two
//! month grids it exposes. Committed state and hover preview are held in
//! separate fields so a hover can never leak into the committed selection.
//!
//! ### Gesture contract
//!
//! - In range mode, the first click sets the anchor and the second click
//!   commits `[min, max]` (a reversed pair is swapped, not rejected). A
//!   click while two dates are selected restarts the gesture at that date.
//! - In single mode, every click commits.
//! - Quick options overwrite any in-progress selection and commit
//!   immediately.
//! - A commit is reported exactly once, as the `Some` return of the event
//!   that completed the gesture, and closes the popover.
//! - Closing the popover from outside discards an in-progress pick.

pub mod calendar;
pub mod quick;

pub use calendar::{DayCell, Highlight, MonthGrid, WEEKDAY_LABELS};
pub use quick::QuickKey;

use std::fmt;
use std::sync::Arc;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::clock::{Clock, SystemClock};
use calendar::{add_months, first_of_month, month_grid};

/// An ordered, inclusive pair of dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    /// Build a range, swapping the bounds if they arrive reversed.
    pub fn new(a: NaiveDate, b: NaiveDate) -> Self {
        if a <= b { Self { start: a, end: b } } else { Self { start: b, end: a } }
    }

    /// A range covering exactly one day.
    pub fn single(date: NaiveDate) -> Self {
        Self { start: date, end: date }
    }

    /// Whether `date` falls within the range, bounds included.
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// Number of days covered, bounds included.
    pub fn days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }

    /// Start date as an ISO `YYYY-MM-DD` string.
    pub fn start_iso(&self) -> String {
        self.start.format("%Y-%m-%d").to_string()
    }

    /// End date as an ISO `YYYY-MM-DD` string.
    pub fn end_iso(&self) -> String {
        self.end.format("%Y-%m-%d").to_string()
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} to {}", self.start_iso(), self.end_iso())
    }
}

/// Whether the widget picks one date or an ordered pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SelectionMode {
    Single,
    Range,
}

/// The in-progress selection: what the user has clicked so far.
///
/// Invariant: once both dates are set, `anchor <= end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateSelection {
    pub mode: SelectionMode,
    pub anchor: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

impl DateSelection {
    /// An empty selection in the given mode.
    pub fn empty(mode: SelectionMode) -> Self {
        Self { mode, anchor: None, end: None }
    }

    fn from_range(mode: SelectionMode, range: DateRange) -> Self {
        Self { mode, anchor: Some(range.start), end: Some(range.end) }
    }

    pub fn is_empty(&self) -> bool {
        self.anchor.is_none()
    }

    /// Both dates chosen (in single mode, the one date).
    pub fn is_complete(&self) -> bool {
        match self.mode {
            SelectionMode::Single => self.anchor.is_some(),
            SelectionMode::Range => self.anchor.is_some() && self.end.is_some(),
        }
    }
}

/// State machine for the dual-calendar date-range picker.
pub struct DateRangeSelector {
    mode: SelectionMode,
    committed: Option<DateRange>,
    draft: DateSelection,
    preview: Option<DateRange>,
    /// First day of the left-hand visible month.
    visible: NaiveDate,
    open: bool,
    clock: Arc<dyn Clock>,
}

impl DateRangeSelector {
    /// Create a closed, empty selector using the system clock.
    pub fn new(mode: SelectionMode) -> Self {
        Self::with_clock(mode, Arc::new(SystemClock))
    }

    /// Create a selector with an injected clock.
    pub fn with_clock(mode: SelectionMode, clock: Arc<dyn Clock>) -> Self {
        let visible = first_of_month(clock.today());
        Self { mode, committed: None, draft: DateSelection::empty(mode), preview: None, visible, open: false, clock }
    }

    /// Seed the widget with an existing selection.
    pub fn with_initial(mut self, range: DateRange) -> Self {
        self.committed = Some(range);
        self.draft = DateSelection::from_range(self.mode, range);
        self.visible = first_of_month(range.start);
        self
    }

    /// Last selection reported to the caller.
    pub fn committed(&self) -> Option<DateRange> {
        self.committed
    }

    /// The hover preview, if any.
    pub fn preview(&self) -> Option<DateRange> {
        self.preview
    }

    /// The in-progress selection.
    pub fn draft(&self) -> &DateSelection {
        &self.draft
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// First day of the left-hand visible month.
    pub fn visible_month(&self) -> NaiveDate {
        self.visible
    }

    /// Open the popover, focusing the committed selection's month.
    pub fn open(&mut self) {
        self.open = true;
        let focus = self.committed.map(|r| r.start).unwrap_or_else(|| self.clock.today());
        self.visible = first_of_month(focus);
    }

    /// Close the popover without committing.
    ///
    /// An in-progress pick that has not been reported is discarded; the
    /// committed selection is untouched.
    pub fn close(&mut self) {
        self.open = false;
        self.preview = None;
        self.draft = match self.committed {
            Some(range) => DateSelection::from_range(self.mode, range),
            None => DateSelection::empty(self.mode),
        };
    }

    /// Drop the selection entirely.
    pub fn clear(&mut self) {
        self.committed = None;
        self.draft = DateSelection::empty(self.mode);
        self.preview = None;
    }

    /// Handle a click on a day cell.
    ///
    /// Returns `Some(range)` exactly when the click completes a gesture;
    /// the popover is closed in that case.
    pub fn click_day(&mut self, date: NaiveDate) -> Option<DateRange> {
        self.preview = None;

        match self.mode {
            SelectionMode::Single => Some(self.commit(DateRange::single(date))),
            SelectionMode::Range => match (self.draft.anchor, self.draft.end) {
                (Some(anchor), None) => {
                    // Second click: swap-normalize rather than reject.
                    Some(self.commit(DateRange::new(anchor, date)))
                }
                _ => {
                    // First click, or a restart after a completed pair.
                    self.draft.anchor = Some(date);
                    self.draft.end = None;
                    None
                }
            },
        }
    }

    fn commit(&mut self, range: DateRange) -> DateRange {
        self.draft = DateSelection::from_range(self.mode, range);
        self.committed = Some(range);
        self.open = false;
        tracing::debug!("selection committed: {}", range);
        range
    }

    /// Handle the pointer entering a day cell.
    ///
    /// Only meaningful while exactly one date is picked in range mode; the
    /// preview is purely visual and never touches the committed selection.
    pub fn hover_day(&mut self, date: NaiveDate) {
        self.preview = match (self.mode, self.draft.anchor, self.draft.end) {
            (SelectionMode::Range, Some(anchor), None) => Some(DateRange::new(anchor, date)),
            _ => None,
        };
    }

    /// Handle the pointer leaving the calendar cells.
    pub fn clear_hover(&mut self) {
        self.preview = None;
    }

    /// Apply a quick option: overwrites any in-progress selection, commits
    /// immediately and closes the popover.
    pub fn select_quick(&mut self, key: QuickKey) -> DateRange {
        self.preview = None;
        let range = key.resolve(self.clock.today());
        self.commit(range)
    }

    /// Show the previous month. Never alters the selection.
    pub fn prev_month(&mut self) {
        self.visible = add_months(self.visible, -1);
    }

    /// Show the next month. Never alters the selection.
    pub fn next_month(&mut self) {
        self.visible = add_months(self.visible, 1);
    }

    /// Jump back 12 months.
    pub fn prev_year(&mut self) {
        self.visible = add_months(self.visible, -12);
    }

    /// Jump forward 12 months.
    pub fn next_year(&mut self) {
        self.visible = add_months(self.visible, 12);
    }

    /// The two side-by-side month grids (visible month and the next),
    /// decorated with the current selection and preview.
    pub fn calendars(&self) -> [MonthGrid; 2] {
        let today = self.clock.today();
        let mut left = month_grid(self.visible, today);
        let mut right = month_grid(add_months(self.visible, 1), today);
        for grid in [&mut left, &mut right] {
            for cell in grid.cells_mut() {
                cell.highlight = self.highlight_for(cell.date);
            }
        }
        [left, right]
    }

    fn highlight_for(&self, date: NaiveDate) -> Highlight {
        if self.draft.anchor == Some(date) {
            return Highlight::Anchor;
        }
        if self.draft.end == Some(date) {
            return Highlight::End;
        }
        if let (Some(anchor), Some(end)) = (self.draft.anchor, self.draft.end)
            && anchor < date
            && date < end
        {
            return Highlight::InRange;
        }
        if let Some(preview) = self.preview
            && preview.contains(date)
        {
            return Highlight::Preview;
        }
        Highlight::None
    }
}
