use crate::app::state::{App, PaneFocus};
use crossterm::event::KeyCode;

pub fn handle_browse_input(app: &mut App, key: KeyCode) {
    if app.search_active {
        handle_search_input(app, key);
        return;
    }

    // Degraded startup: no hierarchy, only retry and quit are meaningful.
    if !app.hierarchy_loaded {
        match key {
            KeyCode::Char('r') => {
                app.pending_reload = true;
            }
            KeyCode::Char('q') | KeyCode::Esc => {
                app.running = false;
            }
            _ => {}
        }
        return;
    }

    match key {
        KeyCode::Char('q') => {
            app.running = false;
        }
        KeyCode::Char('/') => {
            app.focus = PaneFocus::Sidebar;
            app.start_search();
        }
        KeyCode::Char('r') => {
            if let Some(code) = app.displayed_code() {
                app.pending_fetch = Some(code.to_string());
            }
        }
        KeyCode::Tab => {
            app.focus = match app.focus {
                PaneFocus::Sidebar => PaneFocus::Content,
                PaneFocus::Content => PaneFocus::Sidebar,
            };
        }
        KeyCode::Enter => {
            if app.focus == PaneFocus::Sidebar {
                app.activate_selected();
            }
        }
        KeyCode::Right => {
            if app.focus == PaneFocus::Sidebar {
                app.expand_selected();
            }
        }
        KeyCode::Left => {
            if app.focus == PaneFocus::Sidebar {
                app.collapse_selected();
            }
        }
        KeyCode::Up => match app.focus {
            PaneFocus::Sidebar => app.move_selection_up(),
            PaneFocus::Content => app.scroll_content_up(1),
        },
        KeyCode::Down => match app.focus {
            PaneFocus::Sidebar => app.move_selection_down(),
            PaneFocus::Content => app.scroll_content_down(1),
        },
        KeyCode::PageUp => match app.focus {
            PaneFocus::Sidebar => app.move_selection_page_up(),
            PaneFocus::Content => app.scroll_content_up(10),
        },
        KeyCode::PageDown => match app.focus {
            PaneFocus::Sidebar => app.move_selection_page_down(),
            PaneFocus::Content => app.scroll_content_down(10),
        },
        KeyCode::Home => {
            if app.focus == PaneFocus::Sidebar {
                app.move_selection_home();
            } else {
                app.content_scroll = 0;
            }
        }
        KeyCode::End => {
            if app.focus == PaneFocus::Sidebar {
                app.move_selection_end();
            }
        }
        _ => {}
    }
}

fn handle_search_input(app: &mut App, key: KeyCode) {
    match key {
        KeyCode::Esc => {
            app.clear_search();
        }
        KeyCode::Enter => {
            app.activate_selected();
        }
        KeyCode::Backspace => {
            app.pop_search_char();
        }
        KeyCode::Up => {
            app.move_selection_up();
        }
        KeyCode::Down => {
            app.move_selection_down();
        }
        KeyCode::Char(ch) => {
            app.push_search_char(ch);
        }
        _ => {}
    }
}
