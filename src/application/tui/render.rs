use super::theme::Theme;
use crate::application::{Field, SearchForm};
use crate::domain::{DayCell, DayFlags, Preset, ViewMonth, classify, locale, month_grid};
use chrono::{Datelike, NaiveDate};
use ratatui::{
    Frame,
    layout::{Alignment, Position, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};

const BAR_HEIGHT: u16 = 3;
const ORIGIN_WIDTH: u16 = 22;
const DESTINATION_WIDTH: u16 = 22;
const DATES_WIDTH: u16 = 28;
const SUBMIT_WIDTH: u16 = 16;
pub const BAR_WIDTH: u16 = ORIGIN_WIDTH + DESTINATION_WIDTH + DATES_WIDTH + SUBMIT_WIDTH;

/// Each day takes two digits plus a gap
const DAY_WIDTH: u16 = 3;
const PANEL_WIDTH: u16 = DAY_WIDTH * 7;
const PANEL_GAP: u16 = 4;
const DROPDOWN_WIDTH: u16 = PANEL_WIDTH * 2 + PANEL_GAP + 4;
pub const DROPDOWN_HEIGHT: u16 = 14;
const HELP_HEIGHT: u16 = 2;

/// Something the user can click on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    Field(Field),
    Day(NaiveDate),
    Preset(Preset),
    PrevMonth,
    NextMonth,
    Clear,
    Confirm,
}

/// Screen regions of the last drawn frame, used to route mouse clicks.
#[derive(Debug, Default, Clone)]
pub struct HitMap {
    targets: Vec<(Rect, Target)>,
    /// Search bar plus open dropdown; clicks elsewhere count as outside
    container: Vec<Rect>,
}

impl HitMap {
    fn push(&mut self, rect: Rect, target: Target) {
        self.targets.push((rect, target));
    }

    pub fn hit(&self, column: u16, row: u16) -> Option<&Target> {
        let position = Position::new(column, row);
        self.targets
            .iter()
            .find(|(rect, _)| rect.contains(position))
            .map(|(_, target)| target)
    }

    pub fn is_inside(&self, column: u16, row: u16) -> bool {
        let position = Position::new(column, row);
        self.container.iter().any(|rect| rect.contains(position))
    }

    /// Where a target was drawn, if it was
    pub fn rect_of(&self, target: &Target) -> Option<Rect> {
        self.targets
            .iter()
            .find(|(_, t)| t == target)
            .map(|(rect, _)| *rect)
    }
}

/// Calculate centered area with both horizontal and vertical centering
fn calculate_centered_area(available: Rect, needed_width: u16, needed_height: u16) -> Rect {
    let width = std::cmp::min(available.width, needed_width);
    let height = std::cmp::min(available.height, needed_height);

    let left_margin = available.width.saturating_sub(width) / 2;
    let top_margin = available.height.saturating_sub(height) / 2;

    Rect {
        x: available.x + left_margin,
        y: available.y + top_margin,
        width,
        height,
    }
}

/// Draw the search bar (and dropdown when open) into `frame`.
pub fn draw_search(
    frame: &mut Frame,
    form: &SearchForm,
    today: NaiveDate,
    theme: &Theme,
    show_help: bool,
) -> HitMap {
    let mut hits = HitMap::default();

    // Reserve room for the dropdown even while closed so the bar doesn't jump
    let total_height = BAR_HEIGHT + DROPDOWN_HEIGHT + if show_help { HELP_HEIGHT } else { 0 };
    let area = calculate_centered_area(frame.area(), BAR_WIDTH, total_height);

    let bar = Rect { height: BAR_HEIGHT.min(area.height), ..area };
    draw_bar(frame, bar, form, theme, &mut hits);
    hits.container.push(bar);

    if form.is_picker_open() {
        let dropdown = Rect {
            x: bar.x + ORIGIN_WIDTH + DESTINATION_WIDTH,
            y: bar.y + bar.height,
            width: DROPDOWN_WIDTH,
            height: DROPDOWN_HEIGHT,
        }
        .intersection(frame.area());
        if !dropdown.is_empty() {
            hits.container.push(dropdown);
            draw_dropdown(frame, dropdown, form, today, theme, &mut hits);
        }
    }

    if show_help {
        let help = Rect {
            y: area.y + area.height.saturating_sub(HELP_HEIGHT),
            height: HELP_HEIGHT,
            ..area
        }
        .intersection(frame.area());
        frame.render_widget(help_text(form, theme), help);
    }

    hits
}

fn draw_bar(frame: &mut Frame, bar: Rect, form: &SearchForm, theme: &Theme, hits: &mut HitMap) {
    let mut x = bar.x;
    let fields = [
        (Field::Origin, ORIGIN_WIDTH),
        (Field::Destination, DESTINATION_WIDTH),
        (Field::Dates, DATES_WIDTH),
        (Field::Submit, SUBMIT_WIDTH),
    ];

    for (field, width) in fields {
        let rect = Rect { x, width, ..bar }.intersection(bar);
        x += width;
        if rect.is_empty() {
            continue;
        }

        let focused = form.focus() == field;
        let widget = match field {
            Field::Submit => Paragraph::new(locale::SUBMIT)
                .alignment(Alignment::Center)
                .style(theme.colors.submit.to_ratatui_with_modifier(Modifier::BOLD))
                .block(field_block(None, focused, theme)),
            _ => Paragraph::new(field_line(form, field, focused, theme))
                .block(field_block(Some(field_label(field)), focused, theme)),
        };

        frame.render_widget(widget, rect);
        hits.push(rect, Target::Field(field));
    }
}

fn field_label(field: Field) -> &'static str {
    match field {
        Field::Origin => locale::LABEL_FROM,
        Field::Destination => locale::LABEL_TO,
        Field::Dates => locale::LABEL_DATES,
        Field::Submit => locale::SUBMIT,
    }
}

fn field_block(title: Option<&'static str>, focused: bool, theme: &Theme) -> Block<'static> {
    let border = if focused {
        &theme.colors.focused_border
    } else {
        &theme.colors.border
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border.to_ratatui());

    match title {
        Some(title) => block
            .title(title)
            .title_style(theme.colors.label.to_ratatui()),
        None => block,
    }
}

fn field_line(form: &SearchForm, field: Field, focused: bool, theme: &Theme) -> Line<'static> {
    let (value, placeholder) = match field {
        Field::Origin => (form.origin().to_string(), locale::PLACEHOLDER_FROM),
        Field::Destination => (form.destination().to_string(), locale::PLACEHOLDER_TO),
        _ => {
            let style = if form.selection().is_empty() {
                theme.colors.placeholder.to_ratatui()
            } else {
                theme.colors.normal_text.to_ratatui()
            };
            return Line::from(Span::styled(form.date_display(), style));
        }
    };

    let mut spans = if value.is_empty() && !focused {
        vec![Span::styled(placeholder, theme.colors.placeholder.to_ratatui())]
    } else {
        vec![Span::styled(value, theme.colors.normal_text.to_ratatui())]
    };
    if focused {
        spans.push(Span::styled("▏", theme.colors.focused_border.to_ratatui()));
    }

    Line::from(spans)
}

fn draw_dropdown(
    frame: &mut Frame,
    area: Rect,
    form: &SearchForm,
    today: NaiveDate,
    theme: &Theme,
    hits: &mut HitMap,
) {
    frame.render_widget(Clear, area);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.colors.focused_border.to_ratatui());
    let inner = block.inner(area);
    frame.render_widget(block, area);

    // One column of padding on each side
    let inner = Rect {
        x: inner.x + 1,
        width: inner.width.saturating_sub(2),
        ..inner
    };
    // Clipped by a small terminal: leave the frame empty
    if inner.height < DROPDOWN_HEIGHT - 2 || inner.width < DROPDOWN_WIDTH - 4 {
        return;
    }

    // Presets
    let mut x = inner.x;
    for preset in Preset::ALL {
        let label = format!(" {} ", preset);
        let width = label.chars().count() as u16;
        let rect = Rect::new(x, inner.y, width, 1).intersection(inner);
        let style = theme.colors.preset.to_ratatui_with_modifier(Modifier::BOLD);
        frame.render_widget(Paragraph::new(label).style(style), rect);
        hits.push(rect, Target::Preset(preset));
        x += width + 1;
    }

    // Calendars
    let left = Rect::new(inner.x, inner.y + 2, PANEL_WIDTH, 8);
    let right = Rect::new(inner.x + PANEL_WIDTH + PANEL_GAP, inner.y + 2, PANEL_WIDTH, 8);
    draw_month(frame, left, form.view(), MonthSide::Left, form, today, theme, hits);
    draw_month(frame, right, form.view().next(), MonthSide::Right, form, today, theme, hits);

    // Footer
    let footer_y = inner.y + inner.height - 1;
    frame.render_widget(
        Paragraph::new(form.trip_caption()).style(theme.colors.label.to_ratatui()),
        Rect::new(inner.x, footer_y, 14, 1).intersection(inner),
    );

    let confirm_label = format!(" {} ", locale::CONFIRM);
    let clear_label = format!(" {} ", locale::CLEAR);
    let confirm_width = confirm_label.chars().count() as u16;
    let clear_width = clear_label.chars().count() as u16;

    let confirm = Rect::new(
        inner.x + inner.width.saturating_sub(confirm_width),
        footer_y,
        confirm_width,
        1,
    );
    let clear = Rect::new(confirm.x.saturating_sub(clear_width + 1), footer_y, clear_width, 1);

    frame.render_widget(
        Paragraph::new(clear_label).style(theme.colors.label.to_ratatui()),
        clear,
    );
    frame.render_widget(
        Paragraph::new(confirm_label)
            .style(theme.colors.submit.to_ratatui_with_modifier(Modifier::BOLD)),
        confirm,
    );
    hits.push(clear, Target::Clear);
    hits.push(confirm, Target::Confirm);
}

#[derive(Clone, Copy, PartialEq)]
enum MonthSide {
    Left,
    Right,
}

#[allow(clippy::too_many_arguments)]
fn draw_month(
    frame: &mut Frame,
    area: Rect,
    month: ViewMonth,
    side: MonthSide,
    form: &SearchForm,
    today: NaiveDate,
    theme: &Theme,
    hits: &mut HitMap,
) {
    // Header: "<" only on the left panel, ">" only on the right one
    let title = format!("{} {}", locale::month_name(month.month()), month.year());
    frame.render_widget(
        Paragraph::new(title)
            .alignment(Alignment::Center)
            .style(theme.colors.header.to_ratatui_with_modifier(Modifier::BOLD)),
        Rect { height: 1, ..area },
    );
    let (nav, nav_x, target) = match side {
        MonthSide::Left => ("<", area.x, Target::PrevMonth),
        MonthSide::Right => (">", area.x + area.width - 1, Target::NextMonth),
    };
    let nav_rect = Rect::new(nav_x, area.y, 1, 1);
    let nav_style = theme.colors.focused_border.to_ratatui_with_modifier(Modifier::BOLD);
    frame.render_widget(Paragraph::new(nav).style(nav_style), nav_rect);
    hits.push(nav_rect, target);

    // Weekday header
    let weekdays: Vec<Span> = locale::WEEK_DAYS
        .iter()
        .enumerate()
        .map(|(i, day)| {
            let pair = if i >= 5 { &theme.colors.weekend } else { &theme.colors.label };
            Span::styled(format!("{:<3}", day), pair.to_ratatui())
        })
        .collect();
    let weekday_row = Rect::new(area.x, area.y + 1, area.width, 1);
    frame.render_widget(Paragraph::new(Line::from(weekdays)), weekday_row);

    // Days
    let selection = form.selection();
    let grid = month_grid(month);
    for (row, week) in grid.chunks(7).enumerate() {
        let y = area.y + 2 + row as u16;
        let spans: Vec<Span> = week
            .iter()
            .enumerate()
            .flat_map(|(col, cell)| {
                let DayCell::Day(date) = *cell else {
                    return vec![Span::raw("   ")];
                };

                let flags = classify(date, &selection, today);
                let mut style = theme.day_style(flags);
                if date == form.cursor() {
                    style = style.add_modifier(Modifier::REVERSED);
                }
                if !flags.contains(DayFlags::PAST) {
                    let rect = Rect::new(area.x + col as u16 * DAY_WIDTH, y, DAY_WIDTH, 1);
                    hits.push(rect, Target::Day(date));
                }

                vec![
                    Span::styled(format!("{:>2}", date.day()), style),
                    Span::raw(" "),
                ]
            })
            .collect();

        let week_row = Rect::new(area.x, y, area.width, 1);
        frame.render_widget(Paragraph::new(Line::from(spans)), week_row);
    }
}

fn help_text(form: &SearchForm, theme: &Theme) -> Paragraph<'static> {
    let keys = if form.is_picker_open() {
        "←→↑↓/hjkl=Day • Enter=Pick • 1-4=Preset • [ ]=Month • Bksp=Clear • s=Confirm • Esc=Close"
    } else {
        "Tab=Next field • Enter=Open/Submit • Esc=Quit • ?=Help"
    };

    Paragraph::new(vec![
        Line::from(Span::styled(keys, theme.colors.help_text.to_ratatui())),
        Line::from(Span::styled(form.date_display(), theme.colors.normal_text.to_ratatui())),
    ])
    .alignment(Alignment::Center)
}
