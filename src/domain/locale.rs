//! Fixed Russian strings used by the search bar.

use chrono::{Datelike, NaiveDate};

pub const MONTH_NAMES: [&str; 12] = [
    "Январь", "Февраль", "Март", "Апрель", "Май", "Июнь", "Июль", "Август", "Сентябрь", "Октябрь",
    "Ноябрь", "Декабрь",
];

/// Genitive abbreviations as rendered by the `ru-RU` short month format
const MONTH_SHORT: [&str; 12] = [
    "янв.", "февр.", "мар.", "апр.", "мая", "июн.", "июл.", "авг.", "сент.", "окт.", "нояб.",
    "дек.",
];

pub const WEEK_DAYS: [&str; 7] = ["Пн", "Вт", "Ср", "Чт", "Пт", "Сб", "Вс"];

pub const LABEL_FROM: &str = "Откуда";
pub const LABEL_TO: &str = "Куда";
pub const LABEL_DATES: &str = "Даты";
pub const PLACEHOLDER_FROM: &str = "Москва";
pub const PLACEHOLDER_TO: &str = "Стамбул";
pub const PLACEHOLDER_DATES: &str = "Туда — Обратно";
pub const SUBMIT: &str = "Найти билеты";
pub const CLEAR: &str = "Очистить";
pub const CONFIRM: &str = "Выбрать";
pub const ROUND_TRIP: &str = "Туда-обратно";
pub const ONE_WAY: &str = "Только туда";

pub fn month_name(month: u32) -> &'static str {
    MONTH_NAMES[(month as usize).saturating_sub(1) % 12]
}

/// Day and abbreviated month, e.g. `10 мар.`
pub fn format_short(date: NaiveDate) -> String {
    format!("{} {}", date.day(), MONTH_SHORT[date.month0() as usize])
}

/// Text of the date field for an optional start/end pair.
pub fn format_range(start: Option<NaiveDate>, end: Option<NaiveDate>) -> String {
    match (start, end) {
        (Some(start), Some(end)) => format!("{} — {}", format_short(start), format_short(end)),
        (Some(start), None) => format_short(start),
        _ => PLACEHOLDER_DATES.to_string(),
    }
}
