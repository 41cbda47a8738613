use log::LevelFilter;
use std::path::PathBuf;

pub struct Config {
    pub log_dir: PathBuf,
    pub log_level: LevelFilter,
    pub theme: String,
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let log_dir = lookup("TICKET_SEARCH_LOG_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| {
                dirs::data_local_dir()
                    .unwrap_or_else(|| PathBuf::from("."))
                    .join("ticket-search")
            });

        let log_level = lookup("TICKET_SEARCH_LOG_LEVEL")
            .and_then(|level| level.parse().ok())
            .unwrap_or(LevelFilter::Info);

        let theme = lookup("TICKET_SEARCH_THEME").unwrap_or_else(|| "dark".to_string());

        Self {
            log_dir,
            log_level,
            theme,
        }
    }

    pub fn log_file(&self) -> PathBuf {
        self.log_dir.join("ticket-search.log")
    }
}
