pub mod app;
pub mod cli;
pub mod config;
pub mod form;
pub mod tui;

pub use app::*;
pub use cli::*;
pub use config::*;
pub use form::*;
pub use tui::*;
