use crate::domain::DayFlags;
use crossterm::style::{Color as CrosstermColor, Stylize};
use ratatui::style::{Color as RatatuiColor, Modifier, Style as RatatuiStyle};

#[derive(Debug, Clone)]
pub struct Theme {
    pub name: String,
    pub colors: ThemeColors,
}

#[derive(Debug, Clone)]
pub struct ThemeColors {
    // Search bar
    pub border: ColorPair,
    pub focused_border: ColorPair,
    pub label: ColorPair,
    pub placeholder: ColorPair,
    pub submit: ColorPair,

    // Calendar
    pub header: ColorPair,
    pub weekend: ColorPair,
    pub past: ColorPair,
    pub range_edge: ColorPair,
    pub in_range: ColorPair,
    pub preset: ColorPair,

    // Text
    pub normal_text: ColorPair,
    pub help_text: ColorPair,
}

#[derive(Debug, Clone)]
pub struct ColorPair {
    pub fg: CrosstermColor,
    pub bg: Option<CrosstermColor>,
}

impl ColorPair {
    pub fn new(fg: CrosstermColor) -> Self {
        Self { fg, bg: None }
    }

    pub fn with_bg(fg: CrosstermColor, bg: CrosstermColor) -> Self {
        Self { fg, bg: Some(bg) }
    }

    /// Convert to ratatui style
    pub fn to_ratatui(&self) -> RatatuiStyle {
        let mut style = RatatuiStyle::default().fg(self.crossterm_to_ratatui(self.fg));
        if let Some(bg) = self.bg {
            style = style.bg(self.crossterm_to_ratatui(bg));
        }
        style
    }

    pub fn crossterm_to_ratatui(&self, color: CrosstermColor) -> RatatuiColor {
        match color {
            CrosstermColor::Black => RatatuiColor::Black,
            CrosstermColor::DarkRed => RatatuiColor::Red,
            CrosstermColor::DarkGreen => RatatuiColor::Green,
            CrosstermColor::DarkYellow => RatatuiColor::Yellow,
            CrosstermColor::DarkBlue => RatatuiColor::Blue,
            CrosstermColor::DarkMagenta => RatatuiColor::Magenta,
            CrosstermColor::DarkCyan => RatatuiColor::Cyan,
            CrosstermColor::Grey => RatatuiColor::Gray,
            CrosstermColor::DarkGrey => RatatuiColor::DarkGray,
            CrosstermColor::Red => RatatuiColor::LightRed,
            CrosstermColor::Green => RatatuiColor::LightGreen,
            CrosstermColor::Yellow => RatatuiColor::LightYellow,
            CrosstermColor::Blue => RatatuiColor::LightBlue,
            CrosstermColor::Magenta => RatatuiColor::LightMagenta,
            CrosstermColor::Cyan => RatatuiColor::LightCyan,
            CrosstermColor::White => RatatuiColor::White,
            CrosstermColor::Rgb { r, g, b } => RatatuiColor::Rgb(r, g, b),
            CrosstermColor::AnsiValue(v) => RatatuiColor::Indexed(v),
            _ => RatatuiColor::White,
        }
    }

    pub fn to_ratatui_with_modifier(&self, modifier: Modifier) -> RatatuiStyle {
        self.to_ratatui().add_modifier(modifier)
    }

    /// Apply color to text for plain terminal output
    pub fn colorize(&self, text: &str) -> String {
        let mut styled = text.with(self.fg);
        if let Some(bg) = self.bg {
            styled = styled.on(bg);
        }
        format!("{}", styled)
    }

    pub fn colorize_bold(&self, text: &str) -> String {
        let mut styled = text.with(self.fg).bold();
        if let Some(bg) = self.bg {
            styled = styled.on(bg);
        }
        format!("{}", styled)
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}

impl Theme {
    /// Color pair for a calendar day. Range endpoints win over the range
    /// fill, which wins over weekend coloring; past days are always dimmed.
    pub fn day_colors(&self, flags: DayFlags) -> &ColorPair {
        let colors = &self.colors;
        if flags.contains(DayFlags::PAST) {
            &colors.past
        } else if flags.is_selected() {
            &colors.range_edge
        } else if flags.contains(DayFlags::IN_RANGE) {
            &colors.in_range
        } else if flags.contains(DayFlags::WEEKEND) {
            &colors.weekend
        } else {
            &colors.normal_text
        }
    }

    pub fn day_style(&self, flags: DayFlags) -> RatatuiStyle {
        let pair = self.day_colors(flags);
        if flags.contains(DayFlags::PAST) {
            pair.to_ratatui_with_modifier(Modifier::DIM)
        } else if flags.is_selected() {
            pair.to_ratatui_with_modifier(Modifier::BOLD)
        } else {
            pair.to_ratatui()
        }
    }

    pub fn dark() -> Self {
        Self {
            name: "Dark".to_string(),
            colors: ThemeColors {
                border: ColorPair::new(CrosstermColor::DarkGrey),
                focused_border: ColorPair::new(CrosstermColor::Rgb { r: 92, g: 92, b: 255 }),
                label: ColorPair::new(CrosstermColor::Grey),
                placeholder: ColorPair::new(CrosstermColor::DarkGrey),
                submit: ColorPair::with_bg(
                    CrosstermColor::White,
                    CrosstermColor::Rgb { r: 92, g: 92, b: 255 },
                ),

                header: ColorPair::new(CrosstermColor::White),
                weekend: ColorPair::new(CrosstermColor::Rgb { r: 255, g: 110, b: 110 }),
                past: ColorPair::new(CrosstermColor::DarkGrey),
                range_edge: ColorPair::with_bg(
                    CrosstermColor::White,
                    CrosstermColor::Rgb { r: 92, g: 92, b: 255 },
                ),
                in_range: ColorPair::with_bg(
                    CrosstermColor::White,
                    CrosstermColor::Rgb { r: 40, g: 40, b: 80 },
                ),
                preset: ColorPair::with_bg(
                    CrosstermColor::Rgb { r: 130, g: 130, b: 255 },
                    CrosstermColor::Rgb { r: 40, g: 40, b: 40 },
                ),

                normal_text: ColorPair::new(CrosstermColor::White),
                help_text: ColorPair::new(CrosstermColor::DarkGrey),
            },
        }
    }

    pub fn light() -> Self {
        Self {
            name: "Light".to_string(),
            colors: ThemeColors {
                border: ColorPair::new(CrosstermColor::Grey),
                focused_border: ColorPair::new(CrosstermColor::DarkBlue),
                label: ColorPair::new(CrosstermColor::DarkGrey),
                placeholder: ColorPair::new(CrosstermColor::Grey),
                submit: ColorPair::with_bg(CrosstermColor::White, CrosstermColor::DarkBlue),

                header: ColorPair::new(CrosstermColor::Black),
                weekend: ColorPair::new(CrosstermColor::DarkRed),
                past: ColorPair::new(CrosstermColor::Grey),
                range_edge: ColorPair::with_bg(CrosstermColor::White, CrosstermColor::DarkBlue),
                in_range: ColorPair::with_bg(
                    CrosstermColor::Black,
                    CrosstermColor::Rgb { r: 225, g: 225, b: 255 },
                ),
                preset: ColorPair::with_bg(
                    CrosstermColor::Rgb { r: 92, g: 92, b: 255 },
                    CrosstermColor::Rgb { r: 243, g: 244, b: 246 },
                ),

                normal_text: ColorPair::new(CrosstermColor::Black),
                help_text: ColorPair::new(CrosstermColor::DarkBlue),
            },
        }
    }

    pub fn minimal() -> Self {
        Self {
            name: "Minimal".to_string(),
            colors: ThemeColors {
                border: ColorPair::new(CrosstermColor::Grey),
                focused_border: ColorPair::new(CrosstermColor::White),
                label: ColorPair::new(CrosstermColor::Grey),
                placeholder: ColorPair::new(CrosstermColor::DarkGrey),
                submit: ColorPair::with_bg(CrosstermColor::Black, CrosstermColor::White),

                header: ColorPair::new(CrosstermColor::White),
                weekend: ColorPair::new(CrosstermColor::Grey),
                past: ColorPair::new(CrosstermColor::DarkGrey),
                range_edge: ColorPair::with_bg(CrosstermColor::Black, CrosstermColor::White),
                in_range: ColorPair::with_bg(CrosstermColor::White, CrosstermColor::DarkGrey),
                preset: ColorPair::new(CrosstermColor::White),

                normal_text: ColorPair::new(CrosstermColor::White),
                help_text: ColorPair::new(CrosstermColor::Grey),
            },
        }
    }

    pub fn by_name(name: &str) -> Self {
        match name.to_lowercase().as_str() {
            "light" => Self::light(),
            "minimal" => Self::minimal(),
            _ => Self::dark(), // default
        }
    }
}
