use anyhow::{Context, Result, anyhow};
use env_logger::{Builder, Target};
use log::LevelFilter;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

/// `env_logger` builder that appends to `path`, since stdout belongs to the TUI.
pub fn file_logger(path: &Path, level: LevelFilter) -> Result<Builder> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create log directory {}", parent.display()))?;
    }

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to open log file {}", path.display()))?;

    let mut builder = Builder::new();
    builder
        .filter_level(level)
        .target(Target::Pipe(Box::new(file)))
        .format(|buf, record| {
            writeln!(
                buf,
                "[{}] {:<5} {}: {}",
                chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
                record.level(),
                record.target(),
                record.args()
            )
        });

    Ok(builder)
}

/// Install the file logger globally. Fails if a logger is already set.
pub fn init_file_logging(path: &Path, level: LevelFilter) -> Result<()> {
    file_logger(path, level)?
        .try_init()
        .map_err(|e| anyhow!("Failed to install logger: {}", e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use log::{Level, Log, Record};
    use tempfile::TempDir;

    fn emit(logger: &env_logger::Logger, level: Level, message: &str) {
        logger.log(
            &Record::builder()
                .level(level)
                .target("ticket_search::test")
                .args(format_args!("{}", message))
                .build(),
        );
    }

    #[test]
    fn test_writes_records_at_or_above_level() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("ticket-search.log");
        let logger = file_logger(&path, LevelFilter::Info).unwrap().build();

        emit(&logger, Level::Info, "picker opened");
        emit(&logger, Level::Debug, "cursor moved");
        emit(&logger, Level::Warn, "hook failed");
        logger.flush();

        let content = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("INFO  ticket_search::test: picker opened"));
        assert!(lines[1].contains("WARN  ticket_search::test: hook failed"));
    }

    #[test]
    fn test_appends_to_existing_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("ticket-search.log");
        std::fs::write(&path, "earlier\n").unwrap();

        let logger = file_logger(&path, LevelFilter::Trace).unwrap().build();
        emit(&logger, Level::Trace, "later");
        logger.flush();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.starts_with("earlier\n"));
        assert!(content.contains("later"));
    }

    #[test]
    fn test_missing_directory_is_created() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("a").join("b").join("ticket-search.log");

        assert!(file_logger(&path, LevelFilter::Info).is_ok());
        assert!(path.exists());
    }
}
