use crate::domain::{Preset, SearchRequest, Selection, ViewMonth, locale};
use chrono::{Duration, NaiveDate};
use log::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Origin,
    Destination,
    Dates,
    Submit,
}

impl Field {
    const ORDER: [Field; 4] = [Field::Origin, Field::Destination, Field::Dates, Field::Submit];

    fn index(self) -> usize {
        Self::ORDER.iter().position(|f| *f == self).unwrap_or(0)
    }

    pub fn next(self) -> Self {
        Self::ORDER[(self.index() + 1) % Self::ORDER.len()]
    }

    pub fn prev(self) -> Self {
        Self::ORDER[(self.index() + Self::ORDER.len() - 1) % Self::ORDER.len()]
    }
}

/// State of one search bar instance. Every user action is a method here;
/// nothing is derived lazily.
#[derive(Debug, Clone)]
pub struct SearchForm {
    origin: String,
    destination: String,
    selection: Selection,
    /// Left calendar panel
    view: ViewMonth,
    /// Keyboard cursor inside the picker
    cursor: NaiveDate,
    focus: Field,
    picker_open: bool,
}

impl SearchForm {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            origin: String::new(),
            destination: String::new(),
            selection: Selection::Empty,
            view: ViewMonth::of(today),
            cursor: today,
            focus: Field::Origin,
            picker_open: false,
        }
    }

    pub fn with_route(mut self, origin: impl Into<String>, destination: impl Into<String>) -> Self {
        self.origin = origin.into();
        self.destination = destination.into();
        self
    }

    pub fn origin(&self) -> &str {
        &self.origin
    }

    pub fn destination(&self) -> &str {
        &self.destination
    }

    pub fn selection(&self) -> Selection {
        self.selection
    }

    pub fn view(&self) -> ViewMonth {
        self.view
    }

    pub fn cursor(&self) -> NaiveDate {
        self.cursor
    }

    pub fn focus(&self) -> Field {
        self.focus
    }

    pub fn is_picker_open(&self) -> bool {
        self.picker_open
    }

    pub fn date_display(&self) -> String {
        locale::format_range(self.selection.start(), self.selection.end())
    }

    pub fn trip_caption(&self) -> &'static str {
        if self.selection.is_complete() {
            locale::ROUND_TRIP
        } else {
            locale::ONE_WAY
        }
    }

    // ------------------------------------------------------------------
    // Text fields
    // ------------------------------------------------------------------

    fn focused_text_mut(&mut self) -> Option<&mut String> {
        match self.focus {
            Field::Origin => Some(&mut self.origin),
            Field::Destination => Some(&mut self.destination),
            _ => None,
        }
    }

    pub fn type_char(&mut self, c: char) {
        if let Some(text) = self.focused_text_mut() {
            text.push(c);
        }
    }

    pub fn backspace(&mut self) {
        if let Some(text) = self.focused_text_mut() {
            text.pop();
        }
    }

    // ------------------------------------------------------------------
    // Focus and dropdown
    // ------------------------------------------------------------------

    pub fn set_focus(&mut self, field: Field) {
        self.focus = field;
        if field == Field::Dates {
            self.open_picker();
        }
    }

    pub fn focus_next(&mut self) {
        self.focus = self.focus.next();
    }

    pub fn focus_prev(&mut self) {
        self.focus = self.focus.prev();
    }

    pub fn open_picker(&mut self) {
        if !self.picker_open {
            debug!("Opening date picker at {}", self.view);
        }
        self.picker_open = true;
        self.focus = Field::Dates;
        if let Some(start) = self.selection.start() {
            self.cursor = start;
        }
        self.ensure_cursor_visible();
    }

    /// Outside click or Esc
    pub fn close_picker(&mut self) {
        self.picker_open = false;
    }

    /// "Выбрать"
    pub fn confirm(&mut self) {
        debug!("Confirmed dates: {}", self.date_display());
        self.picker_open = false;
    }

    // ------------------------------------------------------------------
    // Date selection
    // ------------------------------------------------------------------

    pub fn click_date(&mut self, date: NaiveDate, today: NaiveDate) {
        let next = self.selection.select_date(date, today);
        if next == self.selection && date < today {
            debug!("Ignoring click on past date {}", date);
            return;
        }

        debug!("Selection {:?} -> {:?}", self.selection, next);
        self.selection = next;
        self.cursor = date;
    }

    pub fn click_cursor(&mut self, today: NaiveDate) {
        self.click_date(self.cursor, today);
    }

    pub fn click_preset(&mut self, preset: Preset, today: NaiveDate) {
        self.selection = self.selection.apply_preset(preset, today);
        debug!("Preset {} -> {:?}", preset, self.selection);

        // Show the month the range starts in
        if let Some(start) = self.selection.start() {
            self.view = ViewMonth::of(start);
            self.cursor = self.selection.end().unwrap_or(start);
        }
    }

    /// "Очистить"
    pub fn clear(&mut self) {
        debug!("Clearing selection");
        self.selection = Selection::Empty;
    }

    // ------------------------------------------------------------------
    // Calendar navigation
    // ------------------------------------------------------------------

    /// Not clamped: past months stay browsable even though their days can't
    /// be picked.
    pub fn prev_month(&mut self) {
        self.view = self.view.prev();
        self.clamp_cursor_to_view();
    }

    pub fn next_month(&mut self) {
        self.view = self.view.next();
        self.clamp_cursor_to_view();
    }

    fn clamp_cursor_to_view(&mut self) {
        let first = self.view.first_day();
        let right = self.view.next();
        let last = right.first_day() + Duration::days(right.days_in_month() as i64 - 1);
        self.cursor = self.cursor.clamp(first, last);
    }

    pub fn move_cursor(&mut self, days: i64) {
        if let Some(cursor) = self.cursor.checked_add_signed(Duration::days(days)) {
            self.cursor = cursor;
            self.ensure_cursor_visible();
        }
    }

    /// Shift the pair of panels so the cursor lands in one of them.
    fn ensure_cursor_visible(&mut self) {
        let right = self.view.next();
        if self.view.contains(self.cursor) || right.contains(self.cursor) {
            return;
        }

        let cursor_month = ViewMonth::of(self.cursor);
        self.view = if cursor_month < self.view {
            cursor_month
        } else {
            cursor_month.prev()
        };
    }

    // ------------------------------------------------------------------
    // Submit
    // ------------------------------------------------------------------

    /// Empty route fields fall back to their placeholders.
    pub fn submit(&self) -> Option<SearchRequest> {
        let origin = if self.origin.trim().is_empty() {
            locale::PLACEHOLDER_FROM
        } else {
            self.origin.trim()
        };
        let destination = if self.destination.trim().is_empty() {
            locale::PLACEHOLDER_TO
        } else {
            self.destination.trim()
        };

        SearchRequest::from_selection(origin, destination, &self.selection)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_new_form_is_empty() {
        let today = date(2024, 3, 10);
        let form = SearchForm::new(today);

        assert!(form.selection().is_empty());
        assert_eq!(form.view(), ViewMonth::new(2024, 3).unwrap());
        assert!(!form.is_picker_open());
        assert_eq!(form.date_display(), "Туда — Обратно");
        assert_eq!(form.trip_caption(), "Только туда");
    }

    #[test]
    fn test_preset_reanchors_view() {
        let today = date(2024, 3, 10);
        let mut form = SearchForm::new(today);
        form.click_date(date(2024, 6, 20), today);
        form.next_month();
        form.next_month();
        assert_eq!(form.view(), ViewMonth::new(2024, 5).unwrap());

        form.click_preset(Preset(7), today);
        assert_eq!(form.view(), ViewMonth::new(2024, 6).unwrap());
        assert_eq!(form.selection().end(), Some(date(2024, 6, 27)));
        assert_eq!(form.trip_caption(), "Туда-обратно");
    }

    #[test]
    fn test_preset_without_start_anchors_today() {
        let today = date(2024, 3, 10);
        let mut form = SearchForm::new(today);
        form.prev_month();

        form.click_preset(Preset(14), today);
        assert_eq!(form.view(), ViewMonth::of(today));
        assert_eq!(form.date_display(), "10 мар. — 24 мар.");
    }

    #[test]
    fn test_past_click_keeps_state() {
        let today = date(2024, 3, 10);
        let mut form = SearchForm::new(today);
        form.click_date(date(2024, 3, 12), today);
        let cursor = form.cursor();

        form.click_date(date(2024, 3, 1), today);
        assert_eq!(form.selection(), Selection::Started(date(2024, 3, 12)));
        assert_eq!(form.cursor(), cursor);
    }

    #[test]
    fn test_navigation_into_past_is_allowed() {
        let today = date(2024, 3, 10);
        let mut form = SearchForm::new(today);

        for _ in 0..5 {
            form.prev_month();
        }
        assert_eq!(form.view(), ViewMonth::new(2023, 10).unwrap());
        // Cursor follows into the visible pair
        assert_eq!(form.cursor(), date(2023, 11, 30));
    }

    #[test]
    fn test_cursor_moves_view_pair() {
        let today = date(2024, 3, 10);
        let mut form = SearchForm::new(today);
        form.open_picker();

        // Into the right panel: view stays
        form.move_cursor(30);
        assert_eq!(form.view(), ViewMonth::new(2024, 3).unwrap());

        // Past the right panel: shift by one
        form.move_cursor(30);
        assert_eq!(form.cursor(), date(2024, 5, 9));
        assert_eq!(form.view(), ViewMonth::new(2024, 4).unwrap());

        // Before the left panel
        form.move_cursor(-40);
        assert_eq!(form.view(), ViewMonth::new(2024, 3).unwrap());
    }

    #[test]
    fn test_clear_and_confirm() {
        let today = date(2024, 3, 10);
        let mut form = SearchForm::new(today);
        form.set_focus(Field::Dates);
        assert!(form.is_picker_open());

        form.click_preset(Preset(5), today);
        form.clear();
        assert!(form.selection().is_empty());
        assert!(form.is_picker_open());

        form.confirm();
        assert!(!form.is_picker_open());
    }

    #[test]
    fn test_typing_goes_to_focused_field() {
        let today = date(2024, 3, 10);
        let mut form = SearchForm::new(today);

        "Казань".chars().for_each(|c| form.type_char(c));
        form.focus_next();
        "Сочи!".chars().for_each(|c| form.type_char(c));
        form.backspace();
        form.focus_next();
        form.type_char('x');

        assert_eq!(form.origin(), "Казань");
        assert_eq!(form.destination(), "Сочи");
        assert_eq!(form.focus(), Field::Dates);
        assert_eq!(form.focus().next().next(), Field::Origin);
        assert_eq!(Field::Origin.prev(), Field::Submit);
    }

    #[test]
    fn test_submit() {
        let today = date(2024, 3, 10);
        let mut form = SearchForm::new(today);
        assert!(form.submit().is_none());

        form.click_date(date(2024, 3, 11), today);
        let request = form.submit().unwrap();
        assert_eq!(request.origin, "Москва");
        assert_eq!(request.destination, "Стамбул");
        assert_eq!(request.return_date, None);

        let form = form.with_route(" Казань ", "Сочи");
        let request = form.submit().unwrap();
        assert_eq!(request.origin, "Казань");
        assert_eq!(request.destination, "Сочи");
    }
}
