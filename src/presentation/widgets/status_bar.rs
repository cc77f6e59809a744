//! Status bar widget.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};
use unicode_width::UnicodeWidthStr;

use crate::application::dto::{FailureNotice, FailurePolicy};

/// Status bar severity level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusLevel {
    /// Informational.
    Info,
    /// Success.
    Success,
    /// Warning.
    Warning,
    /// Error.
    Error,
}

impl StatusLevel {
    /// Returns color for level.
    #[must_use]
    pub const fn color(self) -> Color {
        match self {
            Self::Info => Color::Cyan,
            Self::Success => Color::Green,
            Self::Warning => Color::Yellow,
            Self::Error => Color::Red,
        }
    }
}

/// Status bar widget.
#[derive(Debug, Clone)]
pub struct StatusBar {
    message: String,
    hints: String,
    level: StatusLevel,
}

impl StatusBar {
    /// Creates empty status bar.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            message: String::new(),
            hints: String::new(),
            level: StatusLevel::Info,
        }
    }

    /// Sets the message on the left.
    #[must_use]
    pub fn message(mut self, content: impl Into<String>) -> Self {
        self.message = content.into();
        self
    }

    /// Sets the key hints on the right.
    #[must_use]
    pub fn hints(mut self, content: impl Into<String>) -> Self {
        self.hints = content.into();
        self
    }

    /// Sets status level.
    #[must_use]
    pub const fn level(mut self, level: StatusLevel) -> Self {
        self.level = level;
        self
    }

    /// Creates a status bar for a recorded failure.
    ///
    /// Suppressed failures are warnings; surfaced ones are errors.
    #[must_use]
    pub fn failure(notice: &FailureNotice) -> Self {
        let level = match notice.policy() {
            FailurePolicy::Surface => StatusLevel::Error,
            FailurePolicy::Suppress => StatusLevel::Warning,
        };
        Self::new().message(notice.to_string()).level(level)
    }

    /// Returns the message.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.message
    }

    /// Returns the level.
    #[must_use]
    pub const fn current_level(&self) -> StatusLevel {
        self.level
    }
}

impl Default for StatusBar {
    fn default() -> Self {
        Self::new()
    }
}

impl Widget for &StatusBar {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let style = Style::default()
            .fg(self.level.color())
            .add_modifier(Modifier::BOLD);
        let hint_style = Style::default().fg(Color::DarkGray);

        let width = area.width as usize;
        let message_width = self.message.width();
        let hints_width = self.hints.width();

        let mut spans = vec![Span::styled(self.message.as_str(), style)];

        // Hints are dropped first when the message needs the room.
        if message_width + hints_width < width && !self.hints.is_empty() {
            let padding = width - message_width - hints_width;
            spans.push(Span::raw(" ".repeat(padding)));
            spans.push(Span::styled(self.hints.as_str(), hint_style));
        }

        Paragraph::new(Line::from(spans)).render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::dto::Operation;

    #[test]
    fn test_failure_levels() {
        let surfaced = StatusBar::failure(&FailureNotice {
            operation: Operation::AddLog,
            message: "server returned 500: boom".to_string(),
        });
        assert_eq!(surfaced.current_level(), StatusLevel::Error);
        assert_eq!(surfaced.text(), "add log failed: server returned 500: boom");

        let suppressed = StatusBar::failure(&FailureNotice {
            operation: Operation::DeleteLog,
            message: "request timed out".to_string(),
        });
        assert_eq!(suppressed.current_level(), StatusLevel::Warning);
    }

    #[test]
    fn test_render_places_hints_on_the_right() {
        let bar = StatusBar::new().message("ok").hints("q quit");
        let area = Rect::new(0, 0, 20, 1);
        let mut buf = Buffer::empty(area);

        (&bar).render(area, &mut buf);

        let line: String = (0..20).map(|x| buf[(x, 0)].symbol().to_string()).collect();
        assert!(line.starts_with("ok"));
        assert!(line.ends_with("q quit"));
    }
}
