//! Tab definitions.

use serde::{Deserialize, Serialize};

/// Top-level view selector.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum Tab {
    /// Quick add, chatbot and recent logs.
    #[default]
    Dashboard,
    /// Manual food entry form.
    #[serde(rename = "manual")]
    #[value(name = "manual")]
    ManualEntry,
    /// AI food assistant.
    Chatbot,
    /// Weekly calorie chart.
    #[serde(rename = "chart")]
    #[value(name = "chart")]
    WeeklyChart,
    /// Maintenance calorie settings.
    Settings,
}

impl Tab {
    /// All tabs in display order.
    pub const ALL: [Self; 5] = [
        Self::Dashboard,
        Self::ManualEntry,
        Self::Chatbot,
        Self::WeeklyChart,
        Self::Settings,
    ];

    /// Returns the stable identifier.
    #[must_use]
    pub const fn id(self) -> &'static str {
        match self {
            Self::Dashboard => "dashboard",
            Self::ManualEntry => "manual",
            Self::Chatbot => "chatbot",
            Self::WeeklyChart => "chart",
            Self::Settings => "settings",
        }
    }

    /// Returns the display name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Dashboard => "Dashboard",
            Self::ManualEntry => "Manual Entry",
            Self::Chatbot => "AI Chatbot",
            Self::WeeklyChart => "Weekly Chart",
            Self::Settings => "Settings",
        }
    }

    /// Returns the tab icon.
    #[must_use]
    pub const fn icon(self) -> &'static str {
        match self {
            Self::Dashboard => "📊",
            Self::ManualEntry => "✏️",
            Self::Chatbot => "🤖",
            Self::WeeklyChart => "📈",
            Self::Settings => "⚙️",
        }
    }

    /// Returns the position in [`Tab::ALL`].
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::Dashboard => 0,
            Self::ManualEntry => 1,
            Self::Chatbot => 2,
            Self::WeeklyChart => 3,
            Self::Settings => 4,
        }
    }

    /// Returns the tab at `index`, if any.
    #[must_use]
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Looks a tab up by its identifier.
    #[must_use]
    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|tab| tab.id() == id)
    }

    /// Returns the next tab, wrapping around.
    #[must_use]
    pub const fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    /// Returns the previous tab, wrapping around.
    #[must_use]
    pub const fn previous(self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

impl std::fmt::Display for Tab {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.id())
    }
}
