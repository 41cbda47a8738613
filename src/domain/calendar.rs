use super::Selection;
use chrono::{Datelike, Months, NaiveDate, Weekday};
use std::fmt;

// ============================================================================
// View Month
// ============================================================================

/// Month anchoring the left calendar panel. The right panel always shows
/// [`ViewMonth::next`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ViewMonth {
    first: NaiveDate,
}

impl ViewMonth {
    /// `month` is 1-based. Returns `None` for an invalid month or a year
    /// outside chrono's range.
    pub fn new(year: i32, month: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, 1).map(|first| Self { first })
    }

    pub fn of(date: NaiveDate) -> Self {
        Self {
            first: date - chrono::Duration::days(date.day0() as i64),
        }
    }

    pub fn year(&self) -> i32 {
        self.first.year()
    }

    pub fn month(&self) -> u32 {
        self.first.month()
    }

    pub fn first_day(&self) -> NaiveDate {
        self.first
    }

    /// Day before the first of the following month. The last representable
    /// month is December, hence 31.
    pub fn days_in_month(&self) -> u32 {
        self.first
            .checked_add_months(Months::new(1))
            .and_then(|next| next.pred_opt())
            .map(|last| last.day())
            .unwrap_or(31)
    }

    /// Following month; stays put at the end of the representable range.
    pub fn next(&self) -> Self {
        self.shift(1)
    }

    /// Preceding month; stays put at the start of the representable range.
    pub fn prev(&self) -> Self {
        self.shift(-1)
    }

    pub fn shift(&self, months: i32) -> Self {
        let shifted = if months >= 0 {
            self.first.checked_add_months(Months::new(months as u32))
        } else {
            self.first.checked_sub_months(Months::new(months.unsigned_abs()))
        };
        shifted.map(|first| Self { first }).unwrap_or(*self)
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year() && date.month() == self.month()
    }
}

impl fmt::Display for ViewMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year(), self.month())
    }
}

// ============================================================================
// Month Grid
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayCell {
    /// Padding before the first weekday of the month
    Blank,
    Day(NaiveDate),
}

impl DayCell {
    pub fn date(&self) -> Option<NaiveDate> {
        match *self {
            Self::Blank => None,
            Self::Day(date) => Some(date),
        }
    }
}

/// Monday-first layout of `month`: leading blanks, then one cell per day.
pub fn month_grid(month: ViewMonth) -> Vec<DayCell> {
    let first = month.first_day();
    let offset = first.weekday().num_days_from_monday() as usize;

    let mut cells = vec![DayCell::Blank; offset];
    cells.extend(
        (0..month.days_in_month()).map(|i| DayCell::Day(first + chrono::Duration::days(i as i64))),
    );
    cells
}

// ============================================================================
// Day Styling
// ============================================================================

bitflags::bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct DayFlags: u8 {
        /// Before today, not clickable
        const PAST = 0x01;
        /// Saturday or Sunday
        const WEEKEND = 0x02;
        const RANGE_START = 0x04;
        const RANGE_END = 0x08;
        /// Strictly between start and end
        const IN_RANGE = 0x10;
    }
}

impl DayFlags {
    pub fn is_selected(&self) -> bool {
        self.intersects(Self::RANGE_START | Self::RANGE_END)
    }
}

pub fn classify(date: NaiveDate, selection: &Selection, today: NaiveDate) -> DayFlags {
    let mut flags = DayFlags::empty();

    if date < today {
        flags |= DayFlags::PAST;
    }
    if matches!(date.weekday(), Weekday::Sat | Weekday::Sun) {
        flags |= DayFlags::WEEKEND;
    }
    if selection.start() == Some(date) {
        flags |= DayFlags::RANGE_START;
    }
    if selection.end() == Some(date) {
        flags |= DayFlags::RANGE_END;
    }
    if let Selection::Complete { start, end } = *selection {
        if start < date && date < end {
            flags |= DayFlags::IN_RANGE;
        }
    }

    flags
}

/// Flags for a grid cell; blanks carry none.
pub fn classify_cell(cell: DayCell, selection: &Selection, today: NaiveDate) -> Option<DayFlags> {
    cell.date().map(|date| classify(date, selection, today))
}
