use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Widget},
};

use crate::browser::BrowserState;
use crate::fs::listing::{format_size, FileItem};
use crate::theme::ThemeColors;

/// Directory listing widget: one row per entry, cursor row highlighted.
pub struct BrowserWidget<'a> {
    state: &'a BrowserState,
    theme: &'a ThemeColors,
    block: Option<Block<'a>>,
}

impl<'a> BrowserWidget<'a> {
    pub fn new(state: &'a BrowserState, theme: &'a ThemeColors) -> Self {
        Self {
            state,
            theme,
            block: None,
        }
    }

    pub fn block(mut self, block: Block<'a>) -> Self {
        self.block = block.into();
        self
    }

    fn item_label(item: &FileItem) -> String {
        if item.is_dir {
            format!("📁 {}/", item.name)
        } else {
            format!("📄 {} ({})", item.name, format_size(item.size))
        }
    }

    fn item_style(&self, item: &FileItem, is_selected: bool) -> Style {
        if is_selected {
            Style::default()
                .bg(self.theme.browser_selected_bg)
                .fg(self.theme.browser_selected_fg)
                .add_modifier(Modifier::BOLD)
        } else if item.is_hidden() {
            Style::default().fg(self.theme.dim_fg)
        } else if item.is_dir {
            Style::default()
                .fg(self.theme.browser_dir_fg)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(self.theme.browser_file_fg)
        }
    }
}

impl<'a> Widget for BrowserWidget<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let inner_area = if let Some(block) = &self.block {
            let inner = block.inner(area);
            block.clone().render(area, buf);
            inner
        } else {
            area
        };

        if let Some(err) = &self.state.error {
            let line = Line::from(Span::styled(
                format!("Error: {err}"),
                Style::default().fg(self.theme.error_fg),
            ));
            buf.set_line(inner_area.x, inner_area.y, &line, inner_area.width);
            return;
        }

        let items = &self.state.items;
        let visible_height = inner_area.height as usize;
        if items.is_empty() || visible_height == 0 {
            return;
        }

        let visible = items
            .iter()
            .enumerate()
            .skip(self.state.scroll_offset)
            .take(visible_height);

        for (row, (idx, item)) in visible.enumerate() {
            let y = inner_area.y + row as u16;
            let is_selected = idx == self.state.cursor;
            let marker = if is_selected { "> " } else { "  " };
            let style = self.item_style(item, is_selected);
            let line = Line::from(Span::styled(
                format!("{marker}{}", Self::item_label(item)),
                style,
            ));
            // Fill the whole row so the selection highlight spans the width.
            if is_selected {
                buf.set_style(Rect::new(inner_area.x, y, inner_area.width, 1), style);
            }
            buf.set_line(inner_area.x, y, &line, inner_area.width);
        }
    }
}
