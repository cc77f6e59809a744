//! Weekly calorie bar chart with the maintenance target as a reference line.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Bar, BarChart, BarGroup, Block, Borders, Paragraph, Widget},
};

use crate::domain::{MaintenanceCalories, WeeklyStat};

const BAR_WIDTH: u16 = 7;
const BAR_GAP: u16 = 2;

/// Colors for bars relative to the target.
pub struct WeeklyChartStyle {
    pub under_target: Style,
    pub over_target: Style,
    pub reference: Style,
    pub border: Style,
}

impl Default for WeeklyChartStyle {
    fn default() -> Self {
        Self {
            under_target: Style::default().fg(Color::Green),
            over_target: Style::default().fg(Color::Red),
            reference: Style::default().fg(Color::Yellow),
            border: Style::default().fg(Color::Gray),
        }
    }
}

pub struct WeeklyChart<'a> {
    stats: &'a [WeeklyStat],
    target: MaintenanceCalories,
    style: WeeklyChartStyle,
}

impl<'a> WeeklyChart<'a> {
    #[must_use]
    pub fn new(stats: &'a [WeeklyStat], target: MaintenanceCalories) -> Self {
        Self {
            stats,
            target,
            style: WeeklyChartStyle::default(),
        }
    }

    #[must_use]
    pub const fn style(mut self, style: WeeklyChartStyle) -> Self {
        self.style = style;
        self
    }

    /// Upper bound of the value axis; always leaves room for the target.
    fn axis_max(&self) -> u64 {
        let highest = self
            .stats
            .iter()
            .filter_map(WeeklyStat::calories)
            .fold(self.target.value(), f64::max);
        to_bar_value(highest).max(1)
    }

    fn bars(&self) -> Vec<Bar<'a>> {
        self.stats
            .iter()
            .enumerate()
            .map(|(i, stat)| {
                let calories = stat.calories().unwrap_or(0.0);
                let style = if calories > self.target.value() {
                    self.style.over_target
                } else {
                    self.style.under_target
                };
                let label = stat
                    .label()
                    .map_or_else(|| format!("#{}", i + 1), |label| truncate_label(&label));
                Bar::default()
                    .value(to_bar_value(calories))
                    .label(Line::from(label))
                    .text_value(format!("{calories:.0}"))
                    .style(style)
                    .value_style(style.add_modifier(Modifier::REVERSED))
            })
            .collect()
    }

    /// Row of the chart area where the target falls, if it fits.
    fn reference_row(&self, inner: Rect, max: u64) -> Option<u16> {
        // The bottom row holds the labels.
        let bar_height = inner.height.checked_sub(1)?;
        if bar_height == 0 {
            return None;
        }
        #[allow(clippy::cast_precision_loss)]
        let ratio = self.target.value() / max as f64;
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let filled = (ratio * f64::from(bar_height)).round() as u16;
        let baseline = inner.y + bar_height;
        baseline.checked_sub(filled.max(1))
    }
}

impl Widget for WeeklyChart<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let title = Line::from(vec![
            Span::raw(" Weekly Calories "),
            Span::styled(
                format!("┄ target {} kcal ", self.target),
                self.style.reference,
            ),
        ]);
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(self.style.border)
            .title(title);
        let inner = block.inner(area);

        if self.stats.is_empty() {
            block.render(area, buf);
            Paragraph::new("No weekly data yet. Press g to generate the chart.")
                .style(Style::default().fg(Color::DarkGray))
                .render(inner, buf);
            return;
        }

        let max = self.axis_max();
        let bars = self.bars();
        BarChart::default()
            .block(block)
            .data(BarGroup::default().bars(&bars))
            .bar_width(BAR_WIDTH)
            .bar_gap(BAR_GAP)
            .max(max)
            .render(area, buf);

        if let Some(row) = self.reference_row(inner, max) {
            for x in inner.left()..inner.right() {
                let cell = &mut buf[(x, row)];
                if cell.symbol() == " " {
                    cell.set_symbol("┄").set_style(self.style.reference);
                }
            }
        }
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn to_bar_value(calories: f64) -> u64 {
    if calories.is_finite() && calories > 0.0 {
        calories.round() as u64
    } else {
        0
    }
}

fn truncate_label(label: &str) -> String {
    label.chars().take(usize::from(BAR_WIDTH)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn stats() -> Vec<WeeklyStat> {
        serde_json::from_value(json!([
            {"day": "Monday", "calories": 1800},
            {"day": "Tue", "calories": 2600.4},
            {"calories": null}
        ]))
        .unwrap()
    }

    #[test]
    fn test_axis_leaves_room_for_target() {
        let stats = stats();
        let target = MaintenanceCalories::new(3000.0).unwrap();
        assert_eq!(WeeklyChart::new(&stats, target).axis_max(), 3000);

        let target = MaintenanceCalories::new(1000.0).unwrap();
        assert_eq!(WeeklyChart::new(&stats, target).axis_max(), 2600);
    }

    #[test]
    fn test_bar_values_and_labels() {
        let stats = stats();
        let bars = WeeklyChart::new(&stats, MaintenanceCalories::default()).bars();
        assert_eq!(bars.len(), 3);
        assert_eq!(to_bar_value(2600.4), 2600);
        assert_eq!(to_bar_value(f64::NAN), 0);
        assert_eq!(truncate_label("Wednesday"), "Wednesd");
    }

    #[test]
    fn test_reference_row_scales_with_target() {
        let stats = stats();
        let chart = WeeklyChart::new(&stats, MaintenanceCalories::new(1000.0).unwrap());
        let inner = Rect::new(1, 1, 40, 11);

        // 10 bar rows, target at half the axis.
        assert_eq!(chart.reference_row(inner, 2000), Some(6));
        assert_eq!(chart.reference_row(Rect::new(0, 0, 10, 1), 2000), None);
    }

    #[test]
    fn test_render_empty_hint() {
        let area = Rect::new(0, 0, 60, 5);
        let mut buf = Buffer::empty(area);

        WeeklyChart::new(&[], MaintenanceCalories::default()).render(area, &mut buf);

        let row: String = (1..59).map(|x| buf[(x, 1)].symbol().to_string()).collect();
        assert!(row.contains("No weekly data yet"));
    }
}
