use super::{Selection, TripMode};
use chrono::NaiveDate;
use serde::Serialize;

/// What the search bar hands over when "Найти билеты" is pressed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchRequest {
    pub origin: String,
    pub destination: String,
    pub departure: NaiveDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub return_date: Option<NaiveDate>,
    pub trip: TripMode,
}

impl SearchRequest {
    /// `None` while no departure date is picked.
    pub fn from_selection(
        origin: impl Into<String>,
        destination: impl Into<String>,
        selection: &Selection,
    ) -> Option<Self> {
        let departure = selection.start()?;

        Some(Self {
            origin: origin.into(),
            destination: destination.into(),
            departure,
            return_date: selection.end(),
            trip: selection.trip_mode(),
        })
    }
}
