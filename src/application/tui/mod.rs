pub mod controller;
pub mod printer;
pub mod render;
pub mod search_view;
pub mod theme;
pub mod tui_debug;

pub use controller::*;
pub use printer::*;
pub use render::*;
pub use search_view::*;
pub use theme::*;
pub use tui_debug::*;
