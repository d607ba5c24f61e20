//! Month grid construction for the date-range selector.
//!
//! A grid covers whole weeks (Monday-first): leading and trailing cells are
//! filled with days from the adjacent months and flagged `in_month = false`
//! so frontends render them dimmed and non-interactive.

use chrono::{Datelike, NaiveDate};

/// Weekday header labels, Monday first.
pub const WEEKDAY_LABELS: [&str; 7] = ["Mo", "Tu", "We", "Th", "Fr", "Sa", "Su"];

/// Visual state of a day cell, computed from the selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Highlight {
    #[default]
    None,
    /// First committed or in-progress date.
    Anchor,
    /// Second committed date.
    End,
    /// Strictly between the committed bounds.
    InRange,
    /// Part of the hover preview.
    Preview,
}

/// A single cell in a month grid.
#[derive(Debug, Clone, Copy)]
pub struct DayCell {
    pub date: NaiveDate,
    /// False for filler days from the previous/next month; those cells are
    /// rendered but disabled.
    pub in_month: bool,
    pub today: bool,
    pub highlight: Highlight,
}

/// One rendered month: whole weeks of day cells.
#[derive(Debug, Clone)]
pub struct MonthGrid {
    first: NaiveDate,
    pub weeks: Vec<Vec<DayCell>>,
}

impl MonthGrid {
    pub fn year(&self) -> i32 {
        self.first.year()
    }

    pub fn month(&self) -> u32 {
        self.first.month()
    }

    /// Header label, e.g. "October 2024".
    pub fn label(&self) -> String {
        self.first.format("%B %Y").to_string()
    }

    /// Iterate over every cell in reading order.
    pub fn cells(&self) -> impl Iterator<Item = &DayCell> {
        self.weeks.iter().flatten()
    }

    /// Iterate mutably over every cell in reading order.
    pub fn cells_mut(&mut self) -> impl Iterator<Item = &mut DayCell> {
        self.weeks.iter_mut().flatten()
    }
}

/// First day of the month containing `date`.
pub fn first_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

/// Shift `date` by whole months, clamping to the first of the target month.
pub fn add_months(date: NaiveDate, delta: i32) -> NaiveDate {
    let months0 = date.year() * 12 + date.month() as i32 - 1 + delta;
    let year = months0.div_euclid(12);
    let month = months0.rem_euclid(12) as u32 + 1;
    // Day 1 of any month always exists.
    NaiveDate::from_ymd_opt(year, month, 1).unwrap_or(date)
}

fn days_in_month(first: NaiveDate) -> i64 {
    (add_months(first, 1) - first).num_days()
}

/// Build the grid for the month containing `month`, with no highlights.
pub fn month_grid(month: NaiveDate, today: NaiveDate) -> MonthGrid {
    let first = first_of_month(month);
    let lead = first.weekday().num_days_from_monday() as i64;
    let total = lead + days_in_month(first);
    let weeks_needed = (total + 6) / 7;

    let grid_start = first - chrono::Duration::days(lead);
    let mut weeks = Vec::with_capacity(weeks_needed as usize);
    for week in 0..weeks_needed {
        let mut cells = Vec::with_capacity(7);
        for day in 0..7 {
            let date = grid_start + chrono::Duration::days(week * 7 + day);
            cells.push(DayCell {
                date,
                in_month: date.month() == first.month() && date.year() == first.year(),
                today: date == today,
                highlight: Highlight::None,
            });
        }
        weeks.push(cells);
    }

    MonthGrid { first, weeks }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Weekday;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_october_2024_grid_shape() {
        // Oct 1 2024 is a Tuesday: one leading filler day, 31 days, 5 weeks.
        let grid = month_grid(d(2024, 10, 15), d(2024, 10, 15));
        assert_eq!(grid.weeks.len(), 5);
        assert_eq!(grid.label(), "October 2024");

        let first_cell = grid.weeks[0][0];
        assert_eq!(first_cell.date, d(2024, 9, 30));
        assert!(!first_cell.in_month);

        let second_cell = grid.weeks[0][1];
        assert_eq!(second_cell.date, d(2024, 10, 1));
        assert!(second_cell.in_month);
        assert_eq!(second_cell.date.weekday(), Weekday::Tue);
    }

    #[test]
    fn test_grid_covers_whole_weeks() {
        for month in 1..=12 {
            let grid = month_grid(d(2024, month, 1), d(2024, 1, 1));
            for week in &grid.weeks {
                assert_eq!(week.len(), 7);
            }
            let in_month = grid.cells().filter(|c| c.in_month).count() as i64;
            assert_eq!(in_month, days_in_month(d(2024, month, 1)));
        }
    }

    #[test]
    fn test_today_flag() {
        let grid = month_grid(d(2024, 10, 1), d(2024, 10, 7));
        let todays: Vec<_> = grid.cells().filter(|c| c.today).collect();
        assert_eq!(todays.len(), 1);
        assert_eq!(todays[0].date, d(2024, 10, 7));
    }

    #[test]
    fn test_add_months_forward_across_year() {
        assert_eq!(add_months(d(2024, 12, 15), 1), d(2025, 1, 1));
        assert_eq!(add_months(d(2024, 10, 3), 12), d(2025, 10, 1));
    }

    #[test]
    fn test_add_months_backward_across_year() {
        assert_eq!(add_months(d(2024, 1, 20), -1), d(2023, 12, 1));
        assert_eq!(add_months(d(2024, 3, 1), -12), d(2023, 3, 1));
    }

    #[test]
    fn test_first_of_month() {
        assert_eq!(first_of_month(d(2024, 10, 31)), d(2024, 10, 1));
        assert_eq!(first_of_month(d(2024, 10, 1)), d(2024, 10, 1));
    }
}
