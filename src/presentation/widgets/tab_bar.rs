use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Tabs, Widget},
};

use crate::domain::Tab;

pub struct TabBarStyle {
    pub app_name: Style,
    pub tagline: Style,
    pub tab: Style,
    pub active_tab: Style,
}

impl Default for TabBarStyle {
    fn default() -> Self {
        Self {
            app_name: Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
            tagline: Style::default().fg(Color::DarkGray),
            tab: Style::default().fg(Color::Gray),
            active_tab: Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
        }
    }
}

/// Header line plus the tab selector.
pub struct TabBar<'a> {
    app_name: &'a str,
    tagline: &'a str,
    active: Tab,
    style: TabBarStyle,
}

impl<'a> TabBar<'a> {
    #[must_use]
    pub fn new(app_name: &'a str, active: Tab) -> Self {
        Self {
            app_name,
            tagline: "",
            active,
            style: TabBarStyle::default(),
        }
    }

    #[must_use]
    pub const fn tagline(mut self, tagline: &'a str) -> Self {
        self.tagline = tagline;
        self
    }

    #[must_use]
    pub const fn style(mut self, style: TabBarStyle) -> Self {
        self.style = style;
        self
    }

    fn titles() -> Vec<Line<'static>> {
        Tab::ALL
            .iter()
            .enumerate()
            .map(|(i, tab)| Line::from(format!("{} {} {}", i + 1, tab.icon(), tab.name())))
            .collect()
    }
}

impl Widget for TabBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let [header_area, tabs_area] =
            Layout::vertical([Constraint::Length(1), Constraint::Length(1)]).areas(area);

        let header = Line::from(vec![
            Span::styled(self.app_name, self.style.app_name),
            Span::raw("  "),
            Span::styled(self.tagline, self.style.tagline),
        ]);
        Paragraph::new(header).render(header_area, buf);

        Tabs::new(Self::titles())
            .select(self.active.index())
            .style(self.style.tab)
            .highlight_style(self.style.active_tab)
            .divider("│")
            .render(tabs_area, buf);
    }
}
