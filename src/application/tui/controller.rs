use super::render::{HitMap, Target};
use crate::application::{Field, SearchForm};
use crate::domain::{Preset, SearchRequest};
use chrono::NaiveDate;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use log::{debug, info};

/// What the loop should do after an event has been applied to the form.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Continue,
    ToggleHelp,
    Quit,
    Submit(SearchRequest),
}

pub fn handle_key(form: &mut SearchForm, key: KeyEvent, today: NaiveDate) -> Outcome {
    match (key.code, key.modifiers) {
        // Ctrl+C and Ctrl+D
        (KeyCode::Char('c'), KeyModifiers::CONTROL)
        | (KeyCode::Char('d'), KeyModifiers::CONTROL) => Outcome::Quit,
        _ if form.is_picker_open() => handle_picker_key(form, key, today),
        _ => handle_bar_key(form, key),
    }
}

fn handle_picker_key(form: &mut SearchForm, key: KeyEvent, today: NaiveDate) -> Outcome {
    let typing = matches!(form.focus(), Field::Origin | Field::Destination);

    match key.code {
        // A route field clicked while the picker is open keeps the text keys
        KeyCode::Char(c) if typing => form.type_char(c),
        KeyCode::Backspace if typing => form.backspace(),

        KeyCode::Esc => form.close_picker(),

        // Day cursor
        KeyCode::Left | KeyCode::Char('h') => form.move_cursor(-1),
        KeyCode::Right | KeyCode::Char('l') => form.move_cursor(1),
        KeyCode::Up | KeyCode::Char('k') => form.move_cursor(-7),
        KeyCode::Down | KeyCode::Char('j') => form.move_cursor(7),
        KeyCode::Enter | KeyCode::Char(' ') => form.click_cursor(today),

        // Presets by position
        KeyCode::Char(c @ '1'..='4') => {
            let index = c as usize - '1' as usize;
            form.click_preset(Preset::ALL[index], today);
        }

        // Month pair
        KeyCode::Char('[') | KeyCode::PageUp => form.prev_month(),
        KeyCode::Char(']') | KeyCode::PageDown => form.next_month(),

        KeyCode::Backspace | KeyCode::Delete => form.clear(),
        KeyCode::Char('s') => form.confirm(),

        KeyCode::Tab => {
            form.close_picker();
            form.focus_next();
        }
        KeyCode::BackTab => {
            form.close_picker();
            form.focus_prev();
        }
        KeyCode::Char('?') => return Outcome::ToggleHelp,
        _ => {}
    }

    Outcome::Continue
}

fn handle_bar_key(form: &mut SearchForm, key: KeyEvent) -> Outcome {
    let typing = matches!(form.focus(), Field::Origin | Field::Destination);

    match key.code {
        KeyCode::Esc => return Outcome::Quit,
        KeyCode::Tab => form.focus_next(),
        KeyCode::BackTab => form.focus_prev(),
        KeyCode::Enter => return activate(form, form.focus()),
        KeyCode::Backspace => form.backspace(),
        KeyCode::Char(c) if typing => form.type_char(c),
        KeyCode::Char('?') => return Outcome::ToggleHelp,
        KeyCode::Char('q') => return Outcome::Quit,
        _ => {}
    }

    Outcome::Continue
}

/// Enter on a field, or a click on it
fn activate(form: &mut SearchForm, field: Field) -> Outcome {
    match field {
        Field::Origin | Field::Destination => {
            if form.focus() == field {
                form.focus_next();
            } else {
                form.set_focus(field);
            }
        }
        Field::Dates => form.set_focus(Field::Dates),
        Field::Submit => {
            form.set_focus(Field::Submit);
            return submit(form);
        }
    }

    Outcome::Continue
}

fn submit(form: &mut SearchForm) -> Outcome {
    match form.submit() {
        Some(request) => {
            info!(
                "Search submitted: {} -> {} on {}",
                request.origin, request.destination, request.departure
            );
            form.close_picker();
            Outcome::Submit(request)
        }
        None => {
            debug!("Submit ignored, no departure date");
            Outcome::Continue
        }
    }
}

pub fn handle_mouse(
    form: &mut SearchForm,
    hits: &HitMap,
    mouse: MouseEvent,
    today: NaiveDate,
) -> Outcome {
    if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
        return Outcome::Continue;
    }

    let Some(target) = hits.hit(mouse.column, mouse.row) else {
        if form.is_picker_open() && !hits.is_inside(mouse.column, mouse.row) {
            debug!("Click outside at ({}, {}), closing picker", mouse.column, mouse.row);
            form.close_picker();
        }
        return Outcome::Continue;
    };

    match target.clone() {
        Target::Field(field @ (Field::Origin | Field::Destination)) => form.set_focus(field),
        Target::Field(field) => return activate(form, field),
        Target::Day(date) => form.click_date(date, today),
        Target::Preset(preset) => form.click_preset(preset, today),
        Target::PrevMonth => form.prev_month(),
        Target::NextMonth => form.next_month(),
        Target::Clear => form.clear(),
        Target::Confirm => form.confirm(),
    }

    Outcome::Continue
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::tui::{Theme, draw_search};
    use crate::domain::{Selection, ViewMonth};
    use crossterm::event::KeyEventKind;
    use ratatui::{Terminal, backend::TestBackend};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn press(form: &mut SearchForm, codes: &[KeyCode], today: NaiveDate) -> Outcome {
        let mut outcome = Outcome::Continue;
        for code in codes {
            outcome = handle_key(form, key(*code), today);
        }
        outcome
    }

    fn left_click(column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    fn hits_for(form: &SearchForm, today: NaiveDate) -> HitMap {
        let mut terminal = Terminal::new(TestBackend::new(100, 24)).unwrap();
        let theme = Theme::default();
        let mut hits = HitMap::default();
        terminal
            .draw(|frame| hits = draw_search(frame, form, today, &theme, false))
            .unwrap();
        hits
    }

    #[test]
    fn test_keyboard_flow_to_submit() {
        let today = date(2024, 3, 10);
        let mut form = SearchForm::new(today);

        for c in "Казань".chars() {
            handle_key(&mut form, key(KeyCode::Char(c)), today);
        }
        press(&mut form, &[KeyCode::Tab, KeyCode::Char('S'), KeyCode::Tab], today);
        assert_eq!(form.focus(), Field::Dates);

        // Open the picker and pick today + 2 .. today + 4
        press(&mut form, &[KeyCode::Enter], today);
        assert!(form.is_picker_open());
        press(
            &mut form,
            &[
                KeyCode::Right,
                KeyCode::Right,
                KeyCode::Enter,
                KeyCode::Char('l'),
                KeyCode::Char('l'),
                KeyCode::Char(' '),
            ],
            today,
        );
        let expected = Selection::range(date(2024, 3, 12), date(2024, 3, 14)).unwrap();
        assert_eq!(form.selection(), expected);

        press(&mut form, &[KeyCode::Char('s'), KeyCode::Tab], today);
        assert!(!form.is_picker_open());
        assert_eq!(form.focus(), Field::Submit);

        let Outcome::Submit(request) = press(&mut form, &[KeyCode::Enter], today) else {
            panic!("expected a submission");
        };
        assert_eq!(request.origin, "Казань");
        assert_eq!(request.destination, "S");
        assert_eq!(request.return_date, Some(date(2024, 3, 14)));
    }

    #[test]
    fn test_picker_keys() {
        let today = date(2024, 3, 10);
        let mut form = SearchForm::new(today);
        form.open_picker();

        press(&mut form, &[KeyCode::Char('2')], today);
        assert_eq!(form.selection().end(), Some(date(2024, 3, 17)));

        press(&mut form, &[KeyCode::Char(']'), KeyCode::PageDown], today);
        assert_eq!(form.view(), ViewMonth::new(2024, 5).unwrap());
        press(&mut form, &[KeyCode::Char('[')], today);
        assert_eq!(form.view(), ViewMonth::new(2024, 4).unwrap());

        press(&mut form, &[KeyCode::Backspace], today);
        assert!(form.selection().is_empty());

        assert_eq!(press(&mut form, &[KeyCode::Char('?')], today), Outcome::ToggleHelp);
        press(&mut form, &[KeyCode::Esc], today);
        assert!(!form.is_picker_open());
    }

    #[test]
    fn test_cursor_cannot_pick_past_day() {
        let today = date(2024, 3, 10);
        let mut form = SearchForm::new(today);
        form.open_picker();

        press(&mut form, &[KeyCode::Up, KeyCode::Enter], today);
        assert!(form.selection().is_empty());
    }

    #[test]
    fn test_quit_keys() {
        let today = date(2024, 3, 10);
        let mut form = SearchForm::new(today);

        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(handle_key(&mut form, ctrl_c, today), Outcome::Quit);

        // Esc closes the picker first, then quits
        form.open_picker();
        assert_eq!(press(&mut form, &[KeyCode::Esc], today), Outcome::Continue);
        assert_eq!(press(&mut form, &[KeyCode::Esc], today), Outcome::Quit);

        // 'q' is text while typing in a route field
        form.set_focus(Field::Origin);
        assert_eq!(press(&mut form, &[KeyCode::Char('q')], today), Outcome::Continue);
        assert_eq!(form.origin(), "q");
    }

    #[test]
    fn test_submit_without_dates_is_noop() {
        let today = date(2024, 3, 10);
        let mut form = SearchForm::new(today);
        form.set_focus(Field::Submit);

        let mut event = key(KeyCode::Enter);
        event.kind = KeyEventKind::Press;
        assert_eq!(handle_key(&mut form, event, today), Outcome::Continue);
    }

    #[test]
    fn test_mouse_click_selects_days() {
        let today = date(2024, 3, 10);
        let mut form = SearchForm::new(today);

        let hits = hits_for(&form, today);
        let dates = hits.rect_of(&Target::Field(Field::Dates)).unwrap();
        handle_mouse(&mut form, &hits, left_click(dates.x + 2, dates.y + 1), today);
        assert!(form.is_picker_open());

        let hits = hits_for(&form, today);
        let start = hits.rect_of(&Target::Day(date(2024, 3, 20))).unwrap();
        handle_mouse(&mut form, &hits, left_click(start.x, start.y), today);
        let end = hits.rect_of(&Target::Day(date(2024, 4, 2))).unwrap();
        handle_mouse(&mut form, &hits, left_click(end.x + 1, end.y), today);

        let expected = Selection::range(date(2024, 3, 20), date(2024, 4, 2)).unwrap();
        assert_eq!(form.selection(), expected);
        assert_eq!(form.trip_caption(), "Туда-обратно");
    }

    #[test]
    fn test_mouse_buttons_in_dropdown() {
        let today = date(2024, 3, 10);
        let mut form = SearchForm::new(today);
        form.open_picker();

        let hits = hits_for(&form, today);
        let next = hits.rect_of(&Target::NextMonth).unwrap();
        handle_mouse(&mut form, &hits, left_click(next.x, next.y), today);
        assert_eq!(form.view(), ViewMonth::new(2024, 4).unwrap());

        let hits = hits_for(&form, today);
        let prev = hits.rect_of(&Target::PrevMonth).unwrap();
        handle_mouse(&mut form, &hits, left_click(prev.x, prev.y), today);
        handle_mouse(&mut form, &hits, left_click(prev.x, prev.y), today);
        assert_eq!(form.view(), ViewMonth::new(2024, 2).unwrap());

        let hits = hits_for(&form, today);
        let preset = hits.rect_of(&Target::Preset(Preset(10))).unwrap();
        handle_mouse(&mut form, &hits, left_click(preset.x + 1, preset.y), today);
        assert_eq!(form.view(), ViewMonth::new(2024, 3).unwrap());
        assert_eq!(form.selection().end(), Some(date(2024, 3, 20)));

        let clear = hits.rect_of(&Target::Clear).unwrap();
        handle_mouse(&mut form, &hits, left_click(clear.x, clear.y), today);
        assert!(form.selection().is_empty());

        let confirm = hits.rect_of(&Target::Confirm).unwrap();
        handle_mouse(&mut form, &hits, left_click(confirm.x, confirm.y), today);
        assert!(!form.is_picker_open());
    }

    #[test]
    fn test_outside_click_closes_picker() {
        let today = date(2024, 3, 10);
        let mut form = SearchForm::new(today);
        form.open_picker();

        // A past day is inside the dropdown but not a target
        let hits = hits_for(&form, today);
        let month = hits.rect_of(&Target::Day(date(2024, 3, 11))).unwrap();
        handle_mouse(&mut form, &hits, left_click(month.x, month.y - 1), today);
        assert!(form.is_picker_open());

        handle_mouse(&mut form, &hits, left_click(0, 23), today);
        assert!(!form.is_picker_open());

        // Non-left buttons are ignored
        form.open_picker();
        let mut right = left_click(0, 23);
        right.kind = MouseEventKind::Down(MouseButton::Right);
        handle_mouse(&mut form, &hits, right, today);
        assert!(form.is_picker_open());
    }

    #[test]
    fn test_click_on_route_field_keeps_picker_open() {
        let today = date(2024, 3, 10);
        let mut form = SearchForm::new(today);
        form.open_picker();

        let hits = hits_for(&form, today);
        let origin = hits.rect_of(&Target::Field(Field::Origin)).unwrap();
        assert!(hits.is_inside(origin.x + 2, origin.y + 1));
        handle_mouse(&mut form, &hits, left_click(origin.x + 2, origin.y + 1), today);
        assert!(form.is_picker_open());
        assert_eq!(form.focus(), Field::Origin);

        // Text goes to the route field, arrows still drive the calendar
        press(
            &mut form,
            &[KeyCode::Char('О'), KeyCode::Char('м'), KeyCode::Char('x'), KeyCode::Backspace],
            today,
        );
        assert_eq!(form.origin(), "Ом");
        press(&mut form, &[KeyCode::Right, KeyCode::Enter], today);
        assert_eq!(form.selection(), Selection::Started(date(2024, 3, 11)));
        assert!(form.is_picker_open());

        let hits = hits_for(&form, today);
        let destination = hits.rect_of(&Target::Field(Field::Destination)).unwrap();
        handle_mouse(&mut form, &hits, left_click(destination.x + 1, destination.y + 1), today);
        assert!(form.is_picker_open());
        assert_eq!(form.focus(), Field::Destination);
    }
}
