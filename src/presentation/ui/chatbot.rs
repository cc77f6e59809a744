//! AI food assistant panel.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget, Wrap},
};

use crate::presentation::events::EventHandler;
use crate::presentation::widgets::TextInput;

const GREETING: &str =
    "Tell me what you ate, e.g. \"two eggs and toast\", and I'll log it for you.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Speaker {
    User,
    Assistant,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatLine {
    pub speaker: Speaker,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatAction {
    Consumed,
    Ignored,
    Leave,
    Send(String),
}

/// Transcript plus message input.
#[derive(Debug, Clone)]
pub struct ChatPanel {
    transcript: Vec<ChatLine>,
    input: TextInput,
    pending: bool,
}

impl Default for ChatPanel {
    fn default() -> Self {
        Self::new()
    }
}

impl ChatPanel {
    #[must_use]
    pub fn new() -> Self {
        Self {
            transcript: Vec::new(),
            input: TextInput::new(" Message ").placeholder("What did you eat?"),
            pending: false,
        }
    }

    pub fn set_focused(&mut self, focused: bool) {
        self.input.set_focused(focused);
    }

    #[must_use]
    pub fn is_focused(&self) -> bool {
        self.input.is_focused()
    }

    #[must_use]
    pub const fn is_pending(&self) -> bool {
        self.pending
    }

    #[must_use]
    pub fn transcript(&self) -> &[ChatLine] {
        &self.transcript
    }

    /// Records a reply to the pending message.
    pub fn push_reply(&mut self, text: impl Into<String>) {
        self.pending = false;
        self.push(Speaker::Assistant, text.into());
    }

    /// Records a failed send. The message stays in the transcript.
    pub fn push_error(&mut self, text: impl Into<String>) {
        self.pending = false;
        self.push(Speaker::Error, text.into());
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> ChatAction {
        if key.code == KeyCode::Esc {
            return ChatAction::Leave;
        }

        if EventHandler::is_submit_event(&key) {
            let message = self.input.value().trim().to_string();
            if message.is_empty() || self.pending {
                return ChatAction::Consumed;
            }
            self.input.clear();
            self.pending = true;
            self.push(Speaker::User, message.clone());
            return ChatAction::Send(message);
        }

        if self.input.handle_key(key) {
            ChatAction::Consumed
        } else {
            ChatAction::Ignored
        }
    }

    fn push(&mut self, speaker: Speaker, text: String) {
        self.transcript.push(ChatLine { speaker, text });
    }

    fn lines(&self) -> Vec<Line<'_>> {
        if self.transcript.is_empty() {
            return vec![Line::styled(GREETING, Style::default().fg(Color::DarkGray))];
        }

        let mut lines: Vec<Line> = self
            .transcript
            .iter()
            .map(|line| {
                let (prefix, style) = match line.speaker {
                    Speaker::User => ("You: ", Style::default().fg(Color::Cyan)),
                    Speaker::Assistant => ("AI: ", Style::default().fg(Color::Green)),
                    Speaker::Error => ("Error: ", Style::default().fg(Color::Red)),
                };
                Line::from(vec![
                    Span::styled(prefix, style.add_modifier(Modifier::BOLD)),
                    Span::raw(line.text.as_str()),
                ])
            })
            .collect();

        if self.pending {
            lines.push(Line::styled(
                "AI is thinking...",
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::ITALIC),
            ));
        }
        lines
    }
}

impl Widget for &ChatPanel {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let [transcript_area, input_area] =
            Layout::vertical([Constraint::Fill(1), Constraint::Length(3)]).areas(area);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Gray))
            .title(" AI Food Assistant ");
        let inner = block.inner(transcript_area);

        // Keep the newest lines visible; wrapped lines may still push older
        // ones out of view.
        let lines = self.lines();
        let visible = usize::from(inner.height);
        let skip = lines.len().saturating_sub(visible);

        Paragraph::new(lines.into_iter().skip(skip).collect::<Vec<_>>())
            .block(block)
            .wrap(Wrap { trim: false })
            .render(transcript_area, buf);

        self.input.render(input_area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_text(panel: &mut ChatPanel, text: &str) {
        for c in text.chars() {
            panel.handle_key(key(KeyCode::Char(c)));
        }
    }

    #[test]
    fn test_send_trims_and_clears() {
        let mut panel = ChatPanel::new();
        type_text(&mut panel, "  two eggs ");

        assert_eq!(
            panel.handle_key(key(KeyCode::Enter)),
            ChatAction::Send("two eggs".to_string())
        );
        assert!(panel.is_pending());
        assert_eq!(panel.transcript()[0].speaker, Speaker::User);
        assert!(panel.input.value().is_empty());
    }

    #[test]
    fn test_blank_and_pending_messages_are_not_sent() {
        let mut panel = ChatPanel::new();
        assert_eq!(panel.handle_key(key(KeyCode::Enter)), ChatAction::Consumed);

        type_text(&mut panel, "toast");
        panel.handle_key(key(KeyCode::Enter));
        type_text(&mut panel, "more");
        assert_eq!(panel.handle_key(key(KeyCode::Enter)), ChatAction::Consumed);
        assert_eq!(panel.transcript().len(), 1);
    }

    #[test]
    fn test_reply_and_error_end_pending() {
        let mut panel = ChatPanel::new();
        type_text(&mut panel, "toast");
        panel.handle_key(key(KeyCode::Enter));

        panel.push_reply("Logged toast");
        assert!(!panel.is_pending());

        type_text(&mut panel, "soup");
        panel.handle_key(key(KeyCode::Enter));
        panel.push_error("request timed out");

        let speakers: Vec<Speaker> = panel.transcript().iter().map(|l| l.speaker).collect();
        assert_eq!(
            speakers,
            [Speaker::User, Speaker::Assistant, Speaker::User, Speaker::Error]
        );
        assert_eq!(panel.handle_key(key(KeyCode::Esc)), ChatAction::Leave);
    }
}
