//! Terminal ladder display.

pub mod app;
pub mod run;
pub mod ui;

pub use app::{action_for_key, Action, FrameState, TuiApp};
pub use run::{run_tui, run_with_source};
