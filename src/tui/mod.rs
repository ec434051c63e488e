//! TUI module: Terminal User Interface using Ratatui.
//!
//! Provides:
//! - Patient data entry form
//! - Mortality estimate view

mod app;
mod styles;
mod ui;

pub use app::App;
pub use styles::Theme;
