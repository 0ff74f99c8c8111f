//! Draws an ANSI-escaped text frame (as produced by the viewer) into a ratatui buffer.
//!
//! The text goes through the `vte` parser; printable characters become
//! styled spans, `\n` starts a new line, and SGR sequences update the
//! current style. Everything else is ignored.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Widget,
};

/// Collects parsed output into lines of styled spans.
#[derive(Default)]
struct LineBuilder {
    lines: Vec<Line<'static>>,
    spans: Vec<Span<'static>>,
    text: String,
    fg: Option<Color>,
    bg: Option<Color>,
    modifiers: Modifier,
}

impl LineBuilder {
    fn style(&self) -> Style {
        let mut style = Style::default().add_modifier(self.modifiers);
        if let Some(fg) = self.fg {
            style = style.fg(fg);
        }
        if let Some(bg) = self.bg {
            style = style.bg(bg);
        }
        style
    }

    /// Close the pending run of text with the current style.
    fn flush_span(&mut self) {
        if !self.text.is_empty() {
            let text = std::mem::take(&mut self.text);
            let style = self.style();
            self.spans.push(Span::styled(text, style));
        }
    }

    fn flush_line(&mut self) {
        self.flush_span();
        let spans = std::mem::take(&mut self.spans);
        self.lines.push(Line::from(spans));
    }

    fn finish(mut self) -> Vec<Line<'static>> {
        self.flush_line();
        self.lines
    }

    fn reset(&mut self) {
        self.fg = None;
        self.bg = None;
        self.modifiers = Modifier::empty();
    }

    /// Handle SGR (Select Graphic Rendition) parameters.
    fn handle_sgr(&mut self, params: &[u16]) {
        if params.is_empty() {
            self.reset();
            return;
        }

        let mut i = 0;
        while i < params.len() {
            match params[i] {
                0 => self.reset(),
                1 => self.modifiers |= Modifier::BOLD,
                2 => self.modifiers |= Modifier::DIM,
                3 => self.modifiers |= Modifier::ITALIC,
                4 => self.modifiers |= Modifier::UNDERLINED,
                7 => self.modifiers |= Modifier::REVERSED,
                9 => self.modifiers |= Modifier::CROSSED_OUT,
                21 | 22 => self.modifiers -= Modifier::BOLD | Modifier::DIM,
                23 => self.modifiers -= Modifier::ITALIC,
                24 => self.modifiers -= Modifier::UNDERLINED,
                27 => self.modifiers -= Modifier::REVERSED,
                29 => self.modifiers -= Modifier::CROSSED_OUT,
                n @ 30..=37 => self.fg = Some(base_color(n - 30)),
                38 => {
                    if let Some((color, used)) = extended_color(&params[i + 1..]) {
                        self.fg = Some(color);
                        i += used;
                    }
                }
                39 => self.fg = None,
                n @ 40..=47 => self.bg = Some(base_color(n - 40)),
                48 => {
                    if let Some((color, used)) = extended_color(&params[i + 1..]) {
                        self.bg = Some(color);
                        i += used;
                    }
                }
                49 => self.bg = None,
                n @ 90..=97 => self.fg = Some(bright_color(n - 90)),
                n @ 100..=107 => self.bg = Some(bright_color(n - 100)),
                _ => {}
            }
            i += 1;
        }
    }
}

fn base_color(n: u16) -> Color {
    match n {
        0 => Color::Black,
        1 => Color::Red,
        2 => Color::Green,
        3 => Color::Yellow,
        4 => Color::Blue,
        5 => Color::Magenta,
        6 => Color::Cyan,
        _ => Color::Gray,
    }
}

fn bright_color(n: u16) -> Color {
    match n {
        0 => Color::DarkGray,
        1 => Color::LightRed,
        2 => Color::LightGreen,
        3 => Color::LightYellow,
        4 => Color::LightBlue,
        5 => Color::LightMagenta,
        6 => Color::LightCyan,
        _ => Color::White,
    }
}

/// `5;N` (256-color) or `2;R;G;B` (truecolor) following a 38/48; returns the
/// color and how many parameters it consumed.
fn extended_color(rest: &[u16]) -> Option<(Color, usize)> {
    match rest {
        [5, n, ..] => Some((Color::Indexed(*n as u8), 2)),
        [2, r, g, b, ..] => Some((Color::Rgb(*r as u8, *g as u8, *b as u8), 4)),
        _ => None,
    }
}

impl vte::Perform for LineBuilder {
    fn print(&mut self, c: char) {
        self.text.push(c);
    }

    fn execute(&mut self, byte: u8) {
        if byte == b'\n' {
            self.flush_line();
        }
    }

    fn csi_dispatch(
        &mut self,
        params: &vte::Params,
        _intermediates: &[u8],
        _ignore: bool,
        action: char,
    ) {
        if action == 'm' {
            let params: Vec<u16> = params.iter().flat_map(|sub| sub.iter().copied()).collect();
            self.flush_span();
            self.handle_sgr(&params);
        }
    }

    fn esc_dispatch(&mut self, _intermediates: &[u8], _ignore: bool, _byte: u8) {}

    fn osc_dispatch(&mut self, _params: &[&[u8]], _bell_terminated: bool) {}

    fn hook(&mut self, _params: &vte::Params, _intermediates: &[u8], _ignore: bool, _action: char) {}

    fn unhook(&mut self) {}

    fn put(&mut self, _byte: u8) {}
}

/// Parse ANSI-escaped text into styled lines, one per `\n`-separated row.
pub fn ansi_to_lines(text: &str) -> Vec<Line<'static>> {
    let mut parser = vte::Parser::new();
    let mut builder = LineBuilder::default();
    for &byte in text.as_bytes() {
        parser.advance(&mut builder, byte);
    }
    builder.finish()
}

/// Widget that draws a pre-rendered ANSI frame, clipped to its area.
pub struct AnsiFrame<'a> {
    text: &'a str,
}

impl<'a> AnsiFrame<'a> {
    pub fn new(text: &'a str) -> Self {
        Self { text }
    }
}

impl<'a> Widget for AnsiFrame<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        for (i, line) in ansi_to_lines(self.text)
            .iter()
            .take(area.height as usize)
            .enumerate()
        {
            buf.set_line(area.x, area.y + i as u16, line, area.width);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line_text(line: &Line<'_>) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn splits_rows_on_newline() {
        let lines = ansi_to_lines("one\ntwo\n\nfour");
        let text: Vec<String> = lines.iter().map(line_text).collect();
        assert_eq!(text, vec!["one", "two", "", "four"]);
    }

    #[test]
    fn basic_colors_and_reset() {
        let lines = ansi_to_lines("a\x1b[31mb\x1b[0mc");
        let spans = &lines[0].spans;
        assert_eq!(spans.len(), 3);
        assert_eq!(spans[0].style.fg, None);
        assert_eq!(spans[1].style.fg, Some(Color::Red));
        assert_eq!(spans[1].content, "b");
        assert_eq!(spans[2].style.fg, None);
    }

    #[test]
    fn truecolor_and_indexed() {
        let lines = ansi_to_lines("\x1b[38;2;10;20;30mx\x1b[48;5;42my");
        let spans = &lines[0].spans;
        assert_eq!(spans[0].style.fg, Some(Color::Rgb(10, 20, 30)));
        assert_eq!(spans[1].style.fg, Some(Color::Rgb(10, 20, 30)));
        assert_eq!(spans[1].style.bg, Some(Color::Indexed(42)));
    }

    #[test]
    fn reverse_video_on_and_off() {
        let lines = ansi_to_lines("a\x1b[7mhit\x1b[27mb");
        let spans = &lines[0].spans;
        assert!(spans[1].style.add_modifier.contains(Modifier::REVERSED));
        assert!(!spans[2].style.add_modifier.contains(Modifier::REVERSED));
    }

    #[test]
    fn style_carries_across_lines_until_reset() {
        let lines = ansi_to_lines("\x1b[1mbold\nstill\x1b[0m\nplain");
        assert!(lines[1].spans[0].style.add_modifier.contains(Modifier::BOLD));
        assert!(!lines[2].spans[0].style.add_modifier.contains(Modifier::BOLD));
    }

    #[test]
    fn non_sgr_sequences_are_dropped() {
        let lines = ansi_to_lines("a\x1b[2Kb\x1b]0;title\x07c");
        assert_eq!(line_text(&lines[0]), "abc");
    }

    #[test]
    fn widget_clips_to_area() {
        let area = Rect::new(0, 0, 4, 2);
        let mut buf = Buffer::empty(area);
        AnsiFrame::new("\x1b[32mabcdef\x1b[0m\nxy\nhidden").render(area, &mut buf);
        let row0: String = (0..4).map(|x| buf.cell((x, 0)).unwrap().symbol().to_string()).collect();
        let row1: String = (0..4).map(|x| buf.cell((x, 1)).unwrap().symbol().to_string()).collect();
        assert_eq!(row0, "abcd");
        assert_eq!(row1, "xy  ");
        assert_eq!(buf.cell((0, 0)).unwrap().fg, Color::Green);
    }

    #[test]
    fn viewer_frame_round_trips_visible_text() {
        use crate::viewer::{ansi, test_support::plain_viewer, ViewerStyle};
        let mut viewer = plain_viewer("fn main() {}\nlet x = 1;", 60, 10);
        viewer.perform_search("main");
        let frame = viewer.render(&ViewerStyle::default());
        let lines = ansi_to_lines(&frame);
        let expected: Vec<String> = frame.split('\n').map(ansi::strip).collect();
        let got: Vec<String> = lines.iter().map(line_text).collect();
        assert_eq!(got, expected);
    }
}
