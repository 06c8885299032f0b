use crate::app::state::App;
use crossterm::event::KeyCode;

pub fn handle_help_toggle(app: &mut App, key: KeyCode) -> bool {
    if key == KeyCode::F(1) {
        app.show_help = !app.show_help;
        return true;
    }

    if app.show_help {
        if key == KeyCode::Esc {
            app.show_help = false;
        }
        return true;
    }

    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::AppActions;

    #[test]
    fn f1_toggles_and_esc_closes() {
        let mut app = App::new(AppActions::new());

        assert!(handle_help_toggle(&mut app, KeyCode::F(1)));
        assert!(app.show_help);

        // While the overlay is open every key is swallowed.
        assert!(handle_help_toggle(&mut app, KeyCode::Char('q')));
        assert!(app.running);

        assert!(handle_help_toggle(&mut app, KeyCode::Esc));
        assert!(!app.show_help);

        assert!(!handle_help_toggle(&mut app, KeyCode::Char('q')));
    }
}
