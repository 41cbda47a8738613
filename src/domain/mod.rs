pub mod calendar;
pub mod locale;
pub mod request;
pub mod selection;

pub use calendar::*;
pub use request::*;
pub use selection::*;
