use super::controller::{Outcome, handle_key, handle_mouse};
use super::render::{HitMap, draw_search};
use super::theme::Theme;
use crate::application::SearchForm;
use crate::domain::SearchRequest;
use chrono::NaiveDate;
use crossterm::ExecutableCommand;
use crossterm::event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind, poll};
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use crossterm::tty::IsTty;
use log::{debug, info};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{self, Stdout, stdout};

#[derive(Debug, Clone)]
pub enum SearchViewResult {
    /// User left without searching (quit, escape, ctrl+c)
    Exited,
    /// User pressed "Найти билеты" with a departure date set
    Submitted(SearchRequest),
}

pub struct SearchView {
    form: SearchForm,
    /// Fixed "today"; `None` reads the local clock on every event
    today: Option<NaiveDate>,
    terminal: Terminal<CrosstermBackend<Stdout>>,
    /// Click regions of the last frame
    hits: HitMap,
    show_help: bool,
    theme: Theme,
}

impl SearchView {
    pub fn new(form: SearchForm, today: Option<NaiveDate>, theme: Theme) -> io::Result<Self> {
        // First check if we're in a proper terminal
        if !IsTty::is_tty(&std::io::stdout()) {
            return Err(io::Error::new(
                io::ErrorKind::Unsupported,
                "Not running in a TTY, cannot initialize terminal interface",
            ));
        }

        enable_raw_mode()
            .map_err(|e| io::Error::other(format!("Failed to enable raw mode: {}", e)))?;

        stdout().execute(EnterAlternateScreen).map_err(|e| {
            let _ = disable_raw_mode(); // Clean up on failure
            io::Error::other(format!("Failed to enter alternate screen: {}", e))
        })?;

        // Mouse capture stands in for the document-level click listener
        stdout().execute(EnableMouseCapture).map_err(|e| {
            let _ = stdout().execute(LeaveAlternateScreen);
            let _ = disable_raw_mode();
            io::Error::other(format!("Failed to enable mouse capture: {}", e))
        })?;

        let backend = CrosstermBackend::new(stdout());
        let terminal = Terminal::new(backend).map_err(|e| {
            let _ = stdout().execute(DisableMouseCapture);
            let _ = stdout().execute(LeaveAlternateScreen);
            let _ = disable_raw_mode();
            io::Error::other(format!("Failed to create terminal: {}", e))
        })?;

        debug!("Terminal initialized with theme {}", theme.name);

        Ok(Self {
            form,
            today,
            terminal,
            hits: HitMap::default(),
            show_help: false,
            theme,
        })
    }

    fn today(&self) -> NaiveDate {
        self.today.unwrap_or_else(|| chrono::Local::now().date_naive())
    }

    fn apply(&mut self, outcome: Outcome) -> Option<SearchViewResult> {
        match outcome {
            Outcome::Continue => None,
            Outcome::ToggleHelp => {
                self.show_help = !self.show_help;
                None
            }
            Outcome::Quit => Some(SearchViewResult::Exited),
            Outcome::Submit(request) => Some(SearchViewResult::Submitted(request)),
        }
    }

    /// Run the search bar loop until the user quits or submits
    pub fn run(&mut self) -> io::Result<SearchViewResult> {
        let result = loop {
            let today = self.today();
            let form = &self.form;
            let theme = &self.theme;
            let show_help = self.show_help;
            let mut hits = HitMap::default();

            self.terminal.draw(|frame| {
                hits = draw_search(frame, form, today, theme, show_help);
            })?;
            self.hits = hits;

            // Poll with a timeout so "today" is re-read after midnight
            if !poll(std::time::Duration::from_millis(100))? {
                continue;
            }

            let event = event::read()?;
            let today = self.today();
            let outcome = match event {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    handle_key(&mut self.form, key, today)
                }
                Event::Mouse(mouse) => handle_mouse(&mut self.form, &self.hits, mouse, today),
                // Resize and the rest just redraw
                _ => Outcome::Continue,
            };

            if let Some(result) = self.apply(outcome) {
                break result;
            }
        };

        // Ensure proper cleanup before returning
        self.cleanup()?;
        info!("Search view finished: {:?}", result);

        Ok(result)
    }

    /// Explicit cleanup method
    fn cleanup(&mut self) -> io::Result<()> {
        disable_raw_mode()?;
        self.terminal.backend_mut().execute(DisableMouseCapture)?;
        self.terminal.backend_mut().execute(LeaveAlternateScreen)?;
        self.terminal.show_cursor()?;
        Ok(())
    }
}

impl Drop for SearchView {
    fn drop(&mut self) {
        // Fallback cleanup if explicit cleanup wasn't called
        let _ = self.cleanup();
    }
}
