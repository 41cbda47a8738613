use chrono::{Days, NaiveDate};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

// ============================================================================
// Trip Presets
// ============================================================================

/// Fixed trip-length shortcut, counted in calendar days from the start date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Preset(pub u32);

impl Preset {
    pub const ALL: [Preset; 4] = [Preset(5), Preset(7), Preset(10), Preset(14)];

    pub fn days(&self) -> u32 {
        self.0
    }
}

/// Accepts only the offered trip lengths.
impl FromStr for Preset {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let days: u32 = s
            .trim()
            .parse()
            .map_err(|_| format!("'{}' is not a number of days", s))?;
        Self::ALL
            .into_iter()
            .find(|preset| preset.days() == days)
            .ok_or_else(|| format!("no {}-day preset, expected one of 5, 7, 10, 14", days))
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} дней", self.0)
    }
}

// ============================================================================
// Selection State Machine
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TripMode {
    OneWay,
    RoundTrip,
}

/// The departure/return pair picked in the calendar.
///
/// `Complete` always holds `start <= end`; the only way to build one is
/// through [`Selection::range`], [`Selection::select_date`] or
/// [`Selection::apply_preset`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Selection {
    #[default]
    Empty,
    Started(NaiveDate),
    Complete { start: NaiveDate, end: NaiveDate },
}

impl Selection {
    /// Build a complete range, or `None` when `end` precedes `start`.
    pub fn range(start: NaiveDate, end: NaiveDate) -> Option<Self> {
        (start <= end).then_some(Self::Complete { start, end })
    }

    pub fn start(&self) -> Option<NaiveDate> {
        match *self {
            Self::Empty => None,
            Self::Started(start) | Self::Complete { start, .. } => Some(start),
        }
    }

    pub fn end(&self) -> Option<NaiveDate> {
        match *self {
            Self::Complete { end, .. } => Some(end),
            _ => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    pub fn is_complete(&self) -> bool {
        matches!(self, Self::Complete { .. })
    }

    pub fn trip_mode(&self) -> TripMode {
        if self.is_complete() {
            TripMode::RoundTrip
        } else {
            TripMode::OneWay
        }
    }

    /// Apply a click on `clicked`. Dates before `today` are ignored.
    pub fn select_date(self, clicked: NaiveDate, today: NaiveDate) -> Self {
        if clicked < today {
            return self;
        }

        match self {
            Self::Empty | Self::Complete { .. } => Self::Started(clicked),
            Self::Started(start) if clicked < start => Self::Started(clicked),
            Self::Started(start) => Self::Complete { start, end: clicked },
        }
    }

    /// Extend from the current start (or `today` when nothing is picked) by
    /// `preset` days. A previous end date is discarded.
    pub fn apply_preset(self, preset: Preset, today: NaiveDate) -> Self {
        let base = self.start().unwrap_or(today);

        match base.checked_add_days(Days::new(preset.days() as u64)) {
            Some(end) => Self::Complete { start: base, end },
            None => self,
        }
    }
}
