//! Food log table widget.

use std::fmt::{Display, Write as _};

use chrono::{DateTime, Local, NaiveDateTime};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Rect},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Cell, Paragraph, Row, StatefulWidget, Table, TableState, Widget},
};
use serde_json::Value;

use crate::domain::FoodLogEntry;

const NAME_KEYS: &[&str] = &["name", "food_name", "food", "description"];
const TIMESTAMP_KEYS: &[&str] = &["timestamp", "created_at", "logged_at", "date"];

/// Selection state for the log table.
#[derive(Debug, Default)]
pub struct FoodLogTableState {
    table: TableState,
}

impl FoodLogTableState {
    /// Returns the selected row index.
    #[must_use]
    pub fn selected(&self) -> Option<usize> {
        self.table.selected()
    }

    /// Selects the next row, clamped to `len`.
    pub fn select_next(&mut self, len: usize) {
        if len == 0 {
            self.table.select(None);
            return;
        }
        let next = self.table.selected().map_or(0, |i| (i + 1).min(len - 1));
        self.table.select(Some(next));
    }

    /// Selects the previous row.
    pub fn select_previous(&mut self, len: usize) {
        if len == 0 {
            self.table.select(None);
            return;
        }
        let previous = self.table.selected().map_or(0, |i| i.saturating_sub(1));
        self.table.select(Some(previous));
    }

    /// Keeps the selection inside a list of `len` rows.
    pub fn clamp(&mut self, len: usize) {
        match (self.table.selected(), len) {
            (_, 0) => self.table.select(None),
            (None, _) => self.table.select(Some(0)),
            (Some(i), len) if i >= len => self.table.select(Some(len - 1)),
            _ => {}
        }
    }
}

/// Renders food logs as a table.
pub struct FoodLogTable<'a> {
    logs: &'a [FoodLogEntry],
    timestamp_format: &'a str,
    focused: bool,
    title: &'a str,
}

impl<'a> FoodLogTable<'a> {
    #[must_use]
    pub const fn new(logs: &'a [FoodLogEntry], timestamp_format: &'a str) -> Self {
        Self {
            logs,
            timestamp_format,
            focused: false,
            title: " Recent Food Logs ",
        }
    }

    #[must_use]
    pub const fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    #[must_use]
    pub const fn title(mut self, title: &'a str) -> Self {
        self.title = title;
        self
    }

    fn row(&self, log: &FoodLogEntry) -> Row<'a> {
        let time = log
            .text(TIMESTAMP_KEYS)
            .map(|raw| format_timestamp(raw, self.timestamp_format))
            .or_else(|| {
                TIMESTAMP_KEYS
                    .iter()
                    .find_map(|key| log.field(key).and_then(Value::as_i64))
                    .and_then(|secs| DateTime::from_timestamp(secs, 0))
                    .and_then(|dt| render(dt.with_timezone(&Local).format(self.timestamp_format)))
            })
            .unwrap_or_default();

        let name = log
            .text(NAME_KEYS)
            .map_or_else(|| format!("#{}", log.id()), str::to_string);

        Row::new(vec![
            Cell::from(time),
            Cell::from(name),
            Cell::from(format_amount(log.number(&["calories", "kcal"]))),
            Cell::from(format_amount(log.number(&["protein"]))),
            Cell::from(format_amount(log.number(&["carbs", "carbohydrates"]))),
            Cell::from(format_amount(log.number(&["fat", "fats"]))),
        ])
    }
}

impl StatefulWidget for FoodLogTable<'_> {
    type State = FoodLogTableState;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        let border_style = if self.focused {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().fg(Color::Gray)
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .title(self.title);

        if self.logs.is_empty() {
            let inner = block.inner(area);
            block.render(area, buf);
            Paragraph::new(Line::from("No food logs yet. Add one or ask the chatbot."))
                .style(Style::default().fg(Color::DarkGray))
                .render(inner, buf);
            return;
        }

        state.clamp(self.logs.len());

        let header = Row::new(vec!["Time", "Food", "kcal", "Protein", "Carbs", "Fat"])
            .style(Style::default().add_modifier(Modifier::BOLD));
        let rows: Vec<Row> = self.logs.iter().map(|log| self.row(log)).collect();
        let widths = [
            Constraint::Length(12),
            Constraint::Fill(1),
            Constraint::Length(7),
            Constraint::Length(8),
            Constraint::Length(7),
            Constraint::Length(6),
        ];

        let highlight = if self.focused {
            Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        };

        let table = Table::new(rows, widths)
            .header(header)
            .block(block)
            .row_highlight_style(highlight)
            .highlight_symbol("▶ ");

        StatefulWidget::render(table, area, buf, &mut state.table);
    }
}

/// Formats a backend timestamp for display, falling back to the raw text.
///
/// A format the timestamp cannot satisfy (an offset on a naive time, an
/// unknown specifier) also yields the raw text.
#[must_use]
pub fn format_timestamp(raw: &str, format: &str) -> String {
    let formatted = if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        render(dt.with_timezone(&Local).format(format))
    } else {
        ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"]
            .iter()
            .find_map(|pattern| NaiveDateTime::parse_from_str(raw, pattern).ok())
            .and_then(|dt| render(dt.format(format)))
    };
    formatted.unwrap_or_else(|| raw.to_string())
}

/// Writes a chrono formatter out, returning `None` when it fails.
fn render(formatted: impl Display) -> Option<String> {
    let mut out = String::new();
    write!(out, "{formatted}").ok().map(|()| out)
}

/// Formats a macro amount: whole numbers without decimals, otherwise one.
#[must_use]
pub fn format_amount(value: Option<f64>) -> String {
    match value {
        None => "-".to_string(),
        Some(v) if v.fract() == 0.0 => format!("{v:.0}"),
        Some(v) => format!("{v:.1}"),
    }
}
