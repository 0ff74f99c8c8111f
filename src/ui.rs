use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::{Modifier, Style},
    widgets::{Block, Borders},
    Frame,
};

use crate::app::{App, AppMode};
use crate::components::browser::BrowserWidget;
use crate::components::frame::AnsiFrame;
use crate::components::help::HelpOverlay;
use crate::components::status_bar::StatusBarWidget;
use crate::fs::listing::format_size;

/// Render the application UI.
pub fn render(app: &mut App, frame: &mut Frame) {
    let viewer_frame = match (app.mode, &app.viewer) {
        (AppMode::View, Some(viewer)) => Some(viewer.render(&app.viewer_style)),
        _ => None,
    };
    match viewer_frame {
        Some(text) => frame.render_widget(AnsiFrame::new(&text), frame.area()),
        None => render_browser(app, frame),
    }

    if app.show_help {
        frame.render_widget(HelpOverlay::new(&app.theme, app.help_scroll), frame.area());
    }
}

fn render_browser(app: &mut App, frame: &mut Frame) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(1)])
        .split(frame.area());

    // Keep the cursor visible inside the bordered list.
    let visible_height = chunks[0].height.saturating_sub(2) as usize;
    app.browser.update_scroll(visible_height);

    let block = Block::default()
        .title(" File Explorer ")
        .title_style(
            Style::default()
                .fg(app.theme.accent_fg)
                .add_modifier(Modifier::BOLD),
        )
        .borders(Borders::ALL)
        .border_style(Style::default().fg(app.theme.border_fg));
    frame.render_widget(
        BrowserWidget::new(&app.browser, &app.theme).block(block),
        chunks[0],
    );

    let path_str = app.browser.current_path.display().to_string();
    let listing_info = listing_info(app);
    let mut status = StatusBarWidget::new(&path_str, &listing_info, &app.theme);
    if let Some((msg, _)) = &app.status_message {
        status = status.status_message(msg, false);
    } else if let Some(err) = &app.browser.error {
        status = status.status_message(err, true);
    }
    frame.render_widget(status, chunks[1]);
}

/// "i/n items", plus the selected file's size.
fn listing_info(app: &App) -> String {
    let total = app.browser.items.len();
    if total == 0 {
        return "0 items".to_string();
    }
    let mut info = format!("{}/{} items", app.browser.cursor + 1, total);
    if let Some(item) = app.browser.selected().filter(|i| !i.is_dir) {
        info.push_str(&format!(" | {}", format_size(item.size)));
    }
    info
}
