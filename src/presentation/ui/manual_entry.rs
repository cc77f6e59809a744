//! Manual food entry form.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    style::{Color, Style},
    text::Line,
    widgets::{Block, Borders, Paragraph, Widget},
};

use crate::domain::NewFoodLog;
use crate::presentation::events::EventHandler;
use crate::presentation::widgets::TextInput;

const NAME: usize = 0;
const CALORIES: usize = 1;
const MACROS: [(usize, &str); 3] = [(2, "protein"), (3, "carbs"), (4, "fat")];

/// Outcome of a key press in the form.
#[derive(Debug, Clone, PartialEq)]
pub enum FormAction {
    /// Key was handled internally.
    Consumed,
    /// Key is not for the form.
    Ignored,
    /// Focus should go back to navigation.
    Leave,
    /// A valid log is ready to submit.
    Submit(NewFoodLog),
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum FormMessage {
    Error(String),
    Success(String),
}

/// Name, calories and macro inputs for a new log.
#[derive(Debug, Clone)]
pub struct ManualEntryForm {
    fields: [TextInput; 5],
    focus: usize,
    focused: bool,
    submitting: bool,
    message: Option<FormMessage>,
}

impl Default for ManualEntryForm {
    fn default() -> Self {
        Self::new()
    }
}

impl ManualEntryForm {
    #[must_use]
    pub fn new() -> Self {
        Self {
            fields: [
                TextInput::new(" Food ").placeholder("e.g. Greek yogurt"),
                TextInput::new(" Calories ").numeric().placeholder("kcal"),
                TextInput::new(" Protein (g) ").numeric(),
                TextInput::new(" Carbs (g) ").numeric(),
                TextInput::new(" Fat (g) ").numeric(),
            ],
            focus: NAME,
            focused: false,
            submitting: false,
            message: None,
        }
    }

    /// Gives or takes keyboard focus.
    pub fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
        self.sync_field_focus();
    }

    #[must_use]
    pub const fn is_focused(&self) -> bool {
        self.focused
    }

    #[must_use]
    pub const fn is_submitting(&self) -> bool {
        self.submitting
    }

    /// Sets a field by index; used by tests and prefill.
    pub fn set_field(&mut self, index: usize, value: &str) {
        if let Some(field) = self.fields.get_mut(index) {
            field.set_value(value);
        }
    }

    /// Builds the log from the current inputs.
    ///
    /// # Errors
    /// Returns a message naming the first invalid field.
    pub fn validate(&self) -> Result<NewFoodLog, String> {
        let name = self.fields[NAME].value().trim();
        if name.is_empty() {
            return Err("Food name is required".to_string());
        }

        let calories = parse_amount(self.fields[CALORIES].value())
            .ok_or_else(|| "Calories must be a number".to_string())?
            .ok_or_else(|| "Calories are required".to_string())?;

        let mut log = NewFoodLog::named(name).with("calories", calories);
        for (index, key) in MACROS {
            match parse_amount(self.fields[index].value()) {
                Some(Some(amount)) => log = log.with(key, amount),
                Some(None) => {}
                None => return Err(format!("{} must be a number", self.fields[index].label().trim())),
            }
        }
        Ok(log)
    }

    /// Marks the form as waiting for the backend.
    pub fn begin_submit(&mut self) {
        self.submitting = true;
        self.message = None;
    }

    /// Applies the result of a submission. Inputs are cleared on success.
    pub fn finish_submit(&mut self, result: Result<String, String>) {
        self.submitting = false;
        match result {
            Ok(name) => {
                for field in &mut self.fields {
                    field.clear();
                }
                self.focus = NAME;
                self.sync_field_focus();
                self.message = Some(FormMessage::Success(format!("Added {name}")));
            }
            Err(error) => self.message = Some(FormMessage::Error(error)),
        }
    }

    /// Returns the inline error, if any.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        match &self.message {
            Some(FormMessage::Error(e)) => Some(e),
            _ => None,
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> FormAction {
        if self.submitting {
            return FormAction::Ignored;
        }

        match key.code {
            KeyCode::Esc => FormAction::Leave,
            KeyCode::Up => {
                self.focus = self.focus.checked_sub(1).unwrap_or(self.fields.len() - 1);
                self.sync_field_focus();
                FormAction::Consumed
            }
            KeyCode::Down => {
                self.focus = (self.focus + 1) % self.fields.len();
                self.sync_field_focus();
                FormAction::Consumed
            }
            _ if EventHandler::is_submit_event(&key) => match self.validate() {
                Ok(log) => FormAction::Submit(log),
                Err(error) => {
                    self.message = Some(FormMessage::Error(error));
                    FormAction::Consumed
                }
            },
            _ => {
                if self.fields[self.focus].handle_key(key) {
                    self.message = None;
                    FormAction::Consumed
                } else {
                    FormAction::Ignored
                }
            }
        }
    }

    fn sync_field_focus(&mut self) {
        let active = self.focused.then_some(self.focus);
        for (i, field) in self.fields.iter_mut().enumerate() {
            field.set_focused(active == Some(i));
        }
    }
}

/// `None` when the text is not a number, `Some(None)` when it is empty.
fn parse_amount(raw: &str) -> Option<Option<f64>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Some(None);
    }
    raw.parse::<f64>()
        .ok()
        .filter(|v| v.is_finite() && *v >= 0.0)
        .map(Some)
}

impl Widget for &ManualEntryForm {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let border_style = if self.focused {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().fg(Color::Gray)
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .title(" Add Food ");
        let inner = block.inner(area);
        block.render(area, buf);

        let [name_area, calories_area, macros_area, message_area] = Layout::vertical([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(1),
        ])
        .areas(inner);

        self.fields[NAME].render(name_area, buf);
        self.fields[CALORIES].render(calories_area, buf);

        let macro_areas: [Rect; 3] = Layout::horizontal([Constraint::Ratio(1, 3); 3]).areas(macros_area);
        for ((index, _), macro_area) in MACROS.iter().zip(macro_areas) {
            self.fields[*index].render(macro_area, buf);
        }

        let message = match (&self.message, self.submitting) {
            (_, true) => Line::styled("Saving...", Style::default().fg(Color::Yellow)),
            (Some(FormMessage::Error(e)), _) => {
                Line::styled(e.as_str(), Style::default().fg(Color::Red))
            }
            (Some(FormMessage::Success(s)), _) => {
                Line::styled(s.as_str(), Style::default().fg(Color::Green))
            }
            (None, _) if self.focused => Line::styled(
                "↑/↓ move  Enter add  Esc back",
                Style::default().fg(Color::DarkGray),
            ),
            (None, _) => Line::styled("Press i to edit", Style::default().fg(Color::DarkGray)),
        };
        Paragraph::new(message).render(message_area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;
    use serde_json::json;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn filled(name: &str, calories: &str) -> ManualEntryForm {
        let mut form = ManualEntryForm::new();
        form.set_field(NAME, name);
        form.set_field(CALORIES, calories);
        form
    }

    #[test]
    fn test_requires_name_and_calories() {
        assert_eq!(
            filled("", "100").validate().unwrap_err(),
            "Food name is required"
        );
        assert_eq!(
            filled("apple", "").validate().unwrap_err(),
            "Calories are required"
        );
        assert_eq!(
            filled("apple", ".").validate().unwrap_err(),
            "Calories must be a number"
        );
    }

    #[test]
    fn test_builds_log_with_optional_macros() {
        let mut form = filled("  apple ", "95");
        form.set_field(2, "0.5");
        form.set_field(4, "");

        let log = form.validate().unwrap();

        assert_eq!(
            serde_json::to_value(&log).unwrap(),
            json!({"name": "apple", "calories": 95.0, "protein": 0.5})
        );
    }

    #[test]
    fn test_invalid_macro_is_named() {
        let mut form = filled("apple", "95");
        form.set_field(3, "1.2.3");
        assert_eq!(form.validate().unwrap_err(), "Carbs (g) must be a number");
    }

    #[test]
    fn test_enter_submits_or_reports() {
        let mut form = ManualEntryForm::new();
        form.set_focused(true);
        assert_eq!(form.handle_key(key(KeyCode::Enter)), FormAction::Consumed);
        assert_eq!(form.error(), Some("Food name is required"));

        for c in "rice".chars() {
            form.handle_key(key(KeyCode::Char(c)));
        }
        assert!(form.error().is_none());
        form.handle_key(key(KeyCode::Down));
        for c in "200".chars() {
            form.handle_key(key(KeyCode::Char(c)));
        }

        let FormAction::Submit(log) = form.handle_key(key(KeyCode::Enter)) else {
            panic!("expected submit");
        };
        assert_eq!(log.fields()["name"], json!("rice"));
        assert_eq!(log.fields()["calories"], json!(200.0));
    }

    #[test]
    fn test_finish_submit() {
        let mut form = filled("apple", "95");
        form.begin_submit();
        assert!(form.is_submitting());
        assert_eq!(form.handle_key(key(KeyCode::Char('x'))), FormAction::Ignored);

        form.finish_submit(Err("server returned 500".to_string()));
        assert_eq!(form.error(), Some("server returned 500"));
        assert!(form.validate().is_ok());

        form.finish_submit(Ok("apple".to_string()));
        assert!(form.error().is_none());
        assert!(form.validate().is_err());
    }

    #[test]
    fn test_focus_wraps() {
        let mut form = ManualEntryForm::new();
        form.set_focused(true);
        form.handle_key(key(KeyCode::Up));
        assert_eq!(form.focus, 4);
        form.handle_key(key(KeyCode::Down));
        assert_eq!(form.focus, NAME);
        assert_eq!(form.handle_key(key(KeyCode::Esc)), FormAction::Leave);
    }
}
