mod food_log_table;
mod input;
mod status_bar;
mod tab_bar;
mod weekly_chart;

pub use food_log_table::{FoodLogTable, FoodLogTableState, format_amount, format_timestamp};
pub use input::TextInput;
pub use status_bar::{StatusBar, StatusLevel};
pub use tab_bar::{TabBar, TabBarStyle};
pub use weekly_chart::{WeeklyChart, WeeklyChartStyle};
