use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Paragraph, Widget},
};

const LOGO_TEXT: &str = "
 █▄ ▄█ ▄▀▄ ▄▀▀ █▀▄ ▄▀▄
 █ ▀ █ █▀█ ▀▄▄ █▀▄ ▀▄▀
  T R A C K E R";

const SPINNER: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Shown until the first load of logs and target completes.
pub struct LoadingScreen {
    frame: usize,
    api_url: String,
}

impl LoadingScreen {
    #[must_use]
    pub fn new(api_url: impl Into<String>) -> Self {
        Self {
            frame: 0,
            api_url: api_url.into(),
        }
    }

    /// Advances the spinner by one frame.
    pub fn tick(&mut self) {
        self.frame = (self.frame + 1) % SPINNER.len();
    }

    fn spinner(&self) -> &'static str {
        SPINNER[self.frame % SPINNER.len()]
    }
}

impl Widget for &LoadingScreen {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let mut text = Text::from(LOGO_TEXT.trim_matches('\n'))
            .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD));
        text.push_line(Line::from(""));
        text.push_line(Line::from(vec![
            Span::styled(self.spinner(), Style::default().fg(Color::Yellow)),
            Span::raw(" Loading your nutrition data..."),
        ]));
        text.push_line(Line::from(Span::styled(
            self.api_url.as_str(),
            Style::default().fg(Color::DarkGray),
        )));
        let text = text.centered();

        let text_width = u16::try_from(text.lines.iter().map(Line::width).max().unwrap_or(0))
            .unwrap_or(0);
        let text_height = u16::try_from(text.lines.len()).unwrap_or(0);

        let x = area.x + (area.width.saturating_sub(text_width)) / 2;
        let y = area.y + (area.height.saturating_sub(text_height)) / 2;
        let center_area = Rect::new(
            x,
            y,
            text_width.min(area.width),
            text_height.min(area.height),
        );

        Paragraph::new(text).render(center_area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spinner_wraps() {
        let mut screen = LoadingScreen::new("http://localhost:8000");
        let first = screen.spinner();
        for _ in 0..SPINNER.len() {
            screen.tick();
        }
        assert_eq!(screen.spinner(), first);
    }

    #[test]
    fn test_render_shows_backend_url() {
        let screen = LoadingScreen::new("http://box:9000");
        let area = Rect::new(0, 0, 60, 12);
        let mut buf = Buffer::empty(area);

        (&screen).render(area, &mut buf);

        let content: String = (0..area.height)
            .flat_map(|y| (0..area.width).map(move |x| (x, y)))
            .map(|(x, y)| buf[(x, y)].symbol().to_string())
            .collect();
        assert!(content.contains("http://box:9000"));
    }
}
