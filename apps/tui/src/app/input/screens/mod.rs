use crate::app::state::App;
use crossterm::event::KeyCode;

mod browse;
mod help;

pub fn dispatch_input(app: &mut App, key: KeyCode) {
    if help::handle_help_toggle(app, key) {
        return;
    }

    browse::handle_browse_input(app, key);
}
