use super::theme::{ColorPair, Theme};
use crate::domain::{DayCell, Preset, Selection, ViewMonth, classify, locale, month_grid};
use chrono::{Datelike, NaiveDate};

const PANEL_WIDTH: usize = 21;
const PANEL_GAP: &str = "    ";

/// Prints the two-month picker to stdout without taking over the terminal.
pub struct CalendarPrinter {
    theme: Theme,
    color: bool,
}

impl CalendarPrinter {
    /// `color: false` prints bare text, for `--no-color` and pipes
    pub fn new(theme: Theme, color: bool) -> Self {
        Self { theme, color }
    }

    fn paint(&self, text: &str, pair: &ColorPair, bold: bool) -> String {
        match (self.color, bold) {
            (false, _) => text.to_string(),
            (true, true) => pair.colorize_bold(text),
            (true, false) => pair.colorize(text),
        }
    }

    pub fn render_calendar(
        &self,
        view: ViewMonth,
        selection: &Selection,
        today: NaiveDate,
    ) -> String {
        let months = [view, view.next()];
        let mut out = String::new();

        // Titles with the nav arrows on the outer edges
        let titles: Vec<String> = months
            .iter()
            .map(|m| format!("{} {}", locale::month_name(m.month()), m.year()))
            .collect();
        let left = format!("< {:^width$}", titles[0], width = PANEL_WIDTH - 2);
        let right = format!("{:^width$} >", titles[1], width = PANEL_WIDTH - 2);
        out.push_str(&self.paint(&left, &self.theme.colors.header, true));
        out.push_str(PANEL_GAP);
        out.push_str(&self.paint(&right, &self.theme.colors.header, true));
        out.push('\n');

        let weekdays: String = locale::WEEK_DAYS
            .iter()
            .enumerate()
            .map(|(i, day)| {
                let pair = if i >= 5 {
                    &self.theme.colors.weekend
                } else {
                    &self.theme.colors.label
                };
                self.paint(&format!("{:<3}", day), pair, false)
            })
            .collect();
        out.push_str(&weekdays);
        out.push_str(PANEL_GAP);
        out.push_str(&weekdays);
        out.push('\n');

        let grids: Vec<Vec<DayCell>> = months.iter().map(|m| month_grid(*m)).collect();
        let rows = grids.iter().map(|g| g.len().div_ceil(7)).max().unwrap_or(0);

        for row in 0..rows {
            let line: Vec<String> = grids
                .iter()
                .map(|grid| self.render_week(grid, row, selection, today))
                .collect();
            out.push_str(line.join(PANEL_GAP).trim_end());
            out.push('\n');
        }

        out
    }

    fn render_week(
        &self,
        grid: &[DayCell],
        row: usize,
        selection: &Selection,
        today: NaiveDate,
    ) -> String {
        let mut week = String::new();
        for col in 0..7 {
            match grid.get(row * 7 + col).and_then(DayCell::date) {
                Some(date) => {
                    let flags = classify(date, selection, today);
                    let text = format!("{:>2}", date.day());
                    let pair = self.theme.day_colors(flags);
                    week.push_str(&self.paint(&text, pair, flags.is_selected()));
                    week.push(' ');
                }
                None => week.push_str("   "),
            }
        }
        week
    }

    pub fn render_summary(&self, selection: &Selection) -> String {
        let caption = if selection.is_complete() {
            locale::ROUND_TRIP
        } else {
            locale::ONE_WAY
        };
        format!(
            "{}: {} ({})",
            self.paint(locale::LABEL_DATES, &self.theme.colors.label, false),
            locale::format_range(selection.start(), selection.end()),
            caption
        )
    }

    pub fn render_presets(&self) -> String {
        Preset::ALL
            .iter()
            .enumerate()
            .map(|(i, preset)| {
                let label = format!("[{}] {}", i + 1, preset);
                self.paint(&label, &self.theme.colors.preset, false)
            })
            .collect::<Vec<_>>()
            .join("  ")
    }
}
