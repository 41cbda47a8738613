use crate::application::{Config, SearchForm, SearchView, SearchViewResult, Theme};
use crate::domain::SearchRequest;
use crate::infrastructure::{HookRegistry, SimpleLoggerHook, init_file_logging};
use chrono::NaiveDate;
use log::{info, warn};

pub struct SearchApp {
    config: Config,
    hooks: HookRegistry,
}

impl SearchApp {
    pub fn new() -> Self {
        Self::with_default_plugins()
    }

    pub fn with_default_plugins() -> Self {
        let config = Config::from_env();

        // Set up hook registry with default plugins
        let mut hooks = HookRegistry::new();
        hooks.register(SimpleLoggerHook);

        Self { config, hooks }
    }

    /// Route `log` output to the configured file. A failure only costs us
    /// the log, so it is reported and otherwise ignored.
    pub fn init_logging(&self) {
        let path = self.config.log_file();
        match init_file_logging(&path, self.config.log_level) {
            Ok(()) => info!("Logging to {}", path.display()),
            Err(e) => eprintln!("Warning: logging disabled: {:#}", e),
        }
    }

    /// `--theme` wins over `TICKET_SEARCH_THEME`
    pub fn theme(&self, name: Option<&str>) -> Theme {
        Theme::by_name(name.unwrap_or(&self.config.theme))
    }

    /// Run the interactive search bar. Returns the request if the user
    /// submitted one.
    pub fn run_search(
        &self,
        form: SearchForm,
        today: Option<NaiveDate>,
        theme: Theme,
    ) -> anyhow::Result<Option<SearchRequest>> {
        info!("Starting search view");

        let result = {
            let mut view = SearchView::new(form, today, theme)?;
            view.run()?
        }; // view is dropped here, restoring the terminal

        match result {
            SearchViewResult::Submitted(request) => {
                if let Err(e) = self.hooks.execute_submit_hooks(&request) {
                    warn!("Submit hooks failed: {}", e);
                }
                Ok(Some(request))
            }
            SearchViewResult::Exited => Ok(None),
        }
    }
}

impl Default for SearchApp {
    fn default() -> Self {
        Self::new()
    }
}
