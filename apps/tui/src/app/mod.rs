// App module for ratatui_jma-browser
// Handles application state and key dispatch

pub mod actions;
pub mod input;
pub mod state;

pub use actions::AppActions;
pub use input::handle_input;
pub use state::{App, Content, ContentState, PaneFocus, TreeRow};
