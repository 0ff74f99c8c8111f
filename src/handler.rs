use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::app::{App, AppMode};
use crate::components::help::HelpOverlay;

/// Handle a key event.
pub fn handle_key_event(app: &mut App, key: KeyEvent) {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        app.quit();
        return;
    }

    if app.show_help {
        handle_help_key(app, key);
        return;
    }

    match app.mode {
        AppMode::Browse => handle_browse_key(app, key),
        AppMode::View => handle_view_key(app, key),
    }
}

fn handle_help_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('?') | KeyCode::Char('q') | KeyCode::Esc => {
            app.show_help = false;
            app.help_scroll = 0;
        }
        KeyCode::Char('j') | KeyCode::Down => {
            if app.help_scroll + 1 < HelpOverlay::total_lines() {
                app.help_scroll += 1;
            }
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.help_scroll = app.help_scroll.saturating_sub(1);
        }
        _ => {}
    }
}

fn handle_browse_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('q') => app.quit(),
        KeyCode::Char('j') | KeyCode::Down => app.browser.select_next(),
        KeyCode::Char('k') | KeyCode::Up => app.browser.select_previous(),
        KeyCode::Char('g') | KeyCode::Home => app.browser.select_first(),
        KeyCode::Char('G') | KeyCode::End => app.browser.select_last(),
        KeyCode::Enter | KeyCode::Char('l') | KeyCode::Right => app.open_selected(),
        KeyCode::Char('h') | KeyCode::Left | KeyCode::Backspace => app.browser.go_parent(),
        KeyCode::Char('.') => app.toggle_hidden(),
        KeyCode::Char('?') => app.show_help = true,
        _ => {}
    }
}

fn handle_view_key(app: &mut App, key: KeyEvent) {
    let Some(viewer) = app.viewer.as_mut() else {
        app.close_viewer();
        return;
    };

    // The command line owns every key, including q and Esc.
    if viewer.is_command_mode() {
        viewer.handle_key(key);
        return;
    }

    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => app.close_viewer(),
        KeyCode::Char('?') => app.show_help = true,
        _ => viewer.handle_key(key),
    }
}
