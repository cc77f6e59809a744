use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    style::{Color, Style},
    text::Line,
    widgets::{Block, Borders, Paragraph, Widget, Wrap},
};

use crate::domain::MaintenanceCalories;
use crate::presentation::events::EventHandler;
use crate::presentation::widgets::TextInput;

#[derive(Debug, Clone, PartialEq)]
pub enum SettingsAction {
    Consumed,
    Ignored,
    Leave,
    Save(MaintenanceCalories),
}

/// Maintenance calorie target editor.
#[derive(Debug, Clone)]
pub struct SettingsForm {
    input: TextInput,
    error: Option<String>,
    saving: bool,
}

impl Default for SettingsForm {
    fn default() -> Self {
        Self::new()
    }
}

impl SettingsForm {
    #[must_use]
    pub fn new() -> Self {
        Self {
            input: TextInput::new(" Maintenance calories ").numeric(),
            error: None,
            saving: false,
        }
    }

    /// Shows `current` in the input and gives it focus.
    pub fn open(&mut self, current: MaintenanceCalories) {
        self.input.set_value(current.to_string());
        self.input.set_focused(true);
        self.error = None;
    }

    pub fn set_focused(&mut self, focused: bool) {
        self.input.set_focused(focused);
    }

    #[must_use]
    pub fn is_focused(&self) -> bool {
        self.input.is_focused()
    }

    pub fn begin_save(&mut self) {
        self.saving = true;
        self.error = None;
    }

    /// Clears the saving flag. Errors are reported by the status bar.
    pub fn finish_save(&mut self) {
        self.saving = false;
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> SettingsAction {
        if key.code == KeyCode::Esc {
            return SettingsAction::Leave;
        }
        if self.saving {
            return SettingsAction::Ignored;
        }
        if EventHandler::is_submit_event(&key) {
            return match MaintenanceCalories::parse(self.input.value()) {
                Some(calories) => SettingsAction::Save(calories),
                None => {
                    self.error = Some("Enter a non-negative number of calories".to_string());
                    SettingsAction::Consumed
                }
            };
        }
        if self.input.handle_key(key) {
            self.error = None;
            SettingsAction::Consumed
        } else {
            SettingsAction::Ignored
        }
    }
}

/// Settings tab contents; needs the cached target for display.
pub struct SettingsView<'a> {
    pub form: &'a SettingsForm,
    pub current: MaintenanceCalories,
}

impl Widget for SettingsView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Gray))
            .title(" Settings ");
        let inner = block.inner(area);
        block.render(area, buf);

        let [info_area, input_area, message_area] = Layout::vertical([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(2),
        ])
        .areas(inner);

        Paragraph::new(vec![
            Line::from(format!("Current target: {} kcal/day", self.current)),
            Line::styled(
                "Used as the reference line on the weekly chart.",
                Style::default().fg(Color::DarkGray),
            ),
        ])
        .render(info_area, buf);

        let input_area = Layout::horizontal([Constraint::Max(40)])
            .split(input_area)
            .first()
            .copied()
            .unwrap_or(input_area);
        self.form.input.render(input_area, buf);

        let message = if self.form.saving {
            Line::styled("Saving...", Style::default().fg(Color::Yellow))
        } else if let Some(error) = &self.form.error {
            Line::styled(error.as_str(), Style::default().fg(Color::Red))
        } else if self.form.is_focused() {
            Line::styled("Enter save  Esc back", Style::default().fg(Color::DarkGray))
        } else {
            Line::styled("Press i to edit", Style::default().fg(Color::DarkGray))
        };
        Paragraph::new(message)
            .wrap(Wrap { trim: true })
            .render(message_area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_open_prefills_current_target() {
        let mut form = SettingsForm::new();
        form.open(MaintenanceCalories::new(2200.0).unwrap());
        assert!(form.is_focused());
        assert_eq!(
            form.handle_key(key(KeyCode::Enter)),
            SettingsAction::Save(MaintenanceCalories::new(2200.0).unwrap())
        );
    }

    #[test]
    fn test_invalid_value_is_reported() {
        let mut form = SettingsForm::new();
        form.open(MaintenanceCalories::default());
        form.handle_key(KeyEvent::new(KeyCode::Char('u'), KeyModifiers::CONTROL));
        form.handle_key(key(KeyCode::Char('.')));

        assert_eq!(form.handle_key(key(KeyCode::Enter)), SettingsAction::Consumed);
        assert!(form.error.is_some());

        form.handle_key(key(KeyCode::Backspace));
        assert!(form.error.is_none());
    }

    #[test]
    fn test_saving_blocks_edits() {
        let mut form = SettingsForm::new();
        form.open(MaintenanceCalories::default());
        form.begin_save();
        assert_eq!(form.handle_key(key(KeyCode::Char('1'))), SettingsAction::Ignored);
        assert_eq!(form.handle_key(key(KeyCode::Esc)), SettingsAction::Leave);

        form.finish_save();
        assert_eq!(form.handle_key(key(KeyCode::Char('1'))), SettingsAction::Consumed);
    }
}
