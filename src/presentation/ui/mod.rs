//! UI screens.

mod app;
mod chatbot;
mod loading_screen;
mod main_screen;
mod manual_entry;
mod settings_form;

pub use app::App;
pub use chatbot::{ChatAction, ChatLine, ChatPanel, Speaker};
pub use loading_screen::LoadingScreen;
pub use main_screen::{Focus, MainKeyResult, MainScreen, MainScreenState};
pub use manual_entry::{FormAction, ManualEntryForm};
pub use settings_form::{SettingsAction, SettingsForm, SettingsView};
