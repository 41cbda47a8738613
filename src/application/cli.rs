use crate::application::{CalendarPrinter, SearchApp, SearchForm, test_terminal_setup};
use crate::domain::{Preset, Selection, ViewMonth};
use anyhow::{Context, anyhow};
use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "ticket-search")]
#[command(about = "A terminal flight-ticket search bar with a date-range picker")]
#[command(version)]
pub struct Cli {
    /// Color theme (dark, light, minimal)
    #[arg(long, global = true)]
    pub theme: Option<String>,

    /// Pretend today is this date (YYYY-MM-DD format)
    #[arg(long, global = true)]
    pub today: Option<String>,

    /// Print calendars without ANSI colors
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the interactive search bar (default)
    Tui {
        /// Origin city
        #[arg(long)]
        from: Option<String>,
        /// Destination city
        #[arg(long)]
        to: Option<String>,
    },
    /// Print the two-month calendar
    Calendar {
        /// Left month (YYYY-MM format, defaults to the current month)
        #[arg(short, long)]
        month: Option<String>,
        /// Departure date (YYYY-MM-DD format)
        #[arg(long)]
        start: Option<String>,
        /// Return date (YYYY-MM-DD format)
        #[arg(long, requires = "start")]
        end: Option<String>,
    },
    /// Show the range a trip-length preset produces
    Preset {
        /// Trip length in days (5, 7, 10 or 14)
        days: Preset,
        /// Departure date (YYYY-MM-DD format, defaults to today)
        #[arg(long)]
        start: Option<String>,
    },
    /// Check that the terminal supports the interactive view
    Check,
}

pub fn parse_date(value: &str) -> anyhow::Result<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .with_context(|| format!("Invalid date '{}', expected YYYY-MM-DD", value))
}

pub fn parse_month(value: &str) -> anyhow::Result<ViewMonth> {
    let date = NaiveDate::parse_from_str(&format!("{}-01", value), "%Y-%m-%d")
        .with_context(|| format!("Invalid month '{}', expected YYYY-MM", value))?;
    Ok(ViewMonth::of(date))
}

fn parse_selection(start: Option<&str>, end: Option<&str>) -> anyhow::Result<Selection> {
    let start = start.map(parse_date).transpose()?;
    let end = end.map(parse_date).transpose()?;

    match (start, end) {
        (None, _) => Ok(Selection::Empty),
        (Some(start), None) => Ok(Selection::Started(start)),
        (Some(start), Some(end)) => Selection::range(start, end)
            .ok_or_else(|| anyhow!("Return date {} is before departure {}", end, start)),
    }
}

impl Cli {
    pub fn run() -> anyhow::Result<()> {
        let cli = Self::parse();
        let app = SearchApp::new();

        let fixed_today = cli.today.as_deref().map(parse_date).transpose()?;
        let today = fixed_today.unwrap_or_else(|| Local::now().naive_local().date());
        let theme = app.theme(cli.theme.as_deref());

        match cli.command {
            Some(Commands::Tui { from, to }) => {
                let form = SearchForm::new(today)
                    .with_route(from.unwrap_or_default(), to.unwrap_or_default());
                app.init_logging();
                if let Some(request) = app.run_search(form, fixed_today, theme)? {
                    println!("{}", serde_json::to_string_pretty(&request)?);
                }
            }
            Some(Commands::Calendar { month, start, end }) => {
                let selection = parse_selection(start.as_deref(), end.as_deref())?;
                let view = match month {
                    Some(month) => parse_month(&month)?,
                    None => ViewMonth::of(selection.start().unwrap_or(today)),
                };

                let printer = CalendarPrinter::new(theme, !cli.no_color);
                println!("{}", printer.render_presets());
                println!();
                print!("{}", printer.render_calendar(view, &selection, today));
                println!();
                println!("{}", printer.render_summary(&selection));
            }
            Some(Commands::Preset { days, start }) => {
                let selection = match start {
                    Some(start) => Selection::Started(parse_date(&start)?),
                    None => Selection::Empty,
                };
                let selection = selection.apply_preset(days, today);

                let printer = CalendarPrinter::new(theme, !cli.no_color);
                print!(
                    "{}",
                    printer.render_calendar(
                        ViewMonth::of(selection.start().unwrap_or(today)),
                        &selection,
                        today
                    )
                );
                println!("{}", printer.render_summary(&selection));
            }
            Some(Commands::Check) => {
                test_terminal_setup()?;
            }
            None => {
                // Default: start the search bar
                app.init_logging();
                if let Some(request) = app.run_search(SearchForm::new(today), fixed_today, theme)? {
                    println!("{}", serde_json::to_string_pretty(&request)?);
                }
            }
        }

        Ok(())
    }
}
