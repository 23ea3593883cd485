pub mod app;
mod calendar_window;
mod context;
pub mod month_pane;

pub use calendar_window::{pane_spans, CalendarWindow};
pub use context::{Context, Theme};
pub use month_pane::{to_lines, MonthPane};
