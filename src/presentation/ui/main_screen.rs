//! Tabbed main screen.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Flex, Layout, Rect},
    widgets::{StatefulWidget, Widget},
};

use crate::application::{SyncError, ViewState};
use crate::domain::{ChatReply, FoodLogEntry, LogId, MaintenanceCalories, NewFoodLog, Tab};
use crate::presentation::events::EventHandler;
use crate::presentation::widgets::{
    FoodLogTable, FoodLogTableState, StatusBar, StatusLevel, TabBar, WeeklyChart,
};

use super::chatbot::{ChatAction, ChatPanel};
use super::manual_entry::{FormAction, ManualEntryForm};
use super::settings_form::{SettingsAction, SettingsForm, SettingsView};

const APP_NAME: &str = "Macro Tracker";
const TAGLINE: &str = "track meals, macros and your weekly trend";
const LOG_NAME_KEYS: &[&str] = &["name", "food_name", "food", "description"];

/// Which part of the screen receives keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    /// Global shortcuts are active.
    Navigation,
    /// Food entry form (dashboard quick add or manual entry tab).
    Form,
    /// Chat input.
    Chat,
    /// Maintenance target input.
    Settings,
}

/// What the app should do after a key press.
#[derive(Debug, Clone, PartialEq)]
pub enum MainKeyResult {
    Consumed,
    Ignored,
    Quit,
    SelectTab(Tab),
    AddLog(NewFoodLog),
    DeleteLog(LogId),
    ClearAllLogs,
    SendChat(String),
    UpdateMaintenance(MaintenanceCalories),
    GenerateChart,
    Refresh,
    DismissFailure,
}

/// UI-only state of the main screen. Backend data lives in [`ViewState`].
pub struct MainScreenState {
    focus: Focus,
    logs: FoodLogTableState,
    form: ManualEntryForm,
    chat: ChatPanel,
    settings: SettingsForm,
    status: StatusBar,
    confirm_clear: bool,
    timestamp_format: String,
}

impl MainScreenState {
    #[must_use]
    pub fn new(timestamp_format: impl Into<String>) -> Self {
        Self {
            focus: Focus::Navigation,
            logs: FoodLogTableState::default(),
            form: ManualEntryForm::new(),
            chat: ChatPanel::new(),
            settings: SettingsForm::new(),
            status: StatusBar::new(),
            confirm_clear: false,
            timestamp_format: timestamp_format.into(),
        }
    }

    #[must_use]
    pub const fn focus(&self) -> Focus {
        self.focus
    }

    #[must_use]
    pub const fn status(&self) -> &StatusBar {
        &self.status
    }

    /// Sets focus for the tab being entered.
    pub fn enter_tab(&mut self, tab: Tab, view: &ViewState) {
        self.confirm_clear = false;
        let focus = match tab {
            Tab::ManualEntry => Focus::Form,
            Tab::Chatbot => Focus::Chat,
            Tab::Settings => {
                self.settings.open(view.maintenance_calories());
                Focus::Settings
            }
            Tab::Dashboard | Tab::WeeklyChart => Focus::Navigation,
        };
        self.set_focus(focus);
    }

    pub fn handle_key(&mut self, key: KeyEvent, view: &ViewState) -> MainKeyResult {
        if EventHandler::is_force_quit(&key) {
            return MainKeyResult::Quit;
        }

        let active = view.active_tab();
        if let Some(tab) = EventHandler::tab_switch(&key, active, self.focus == Focus::Navigation)
        {
            if tab == active {
                return MainKeyResult::Consumed;
            }
            self.enter_tab(tab, view);
            return MainKeyResult::SelectTab(tab);
        }

        if self.confirm_clear {
            self.confirm_clear = false;
            if matches!(key.code, KeyCode::Char('y' | 'Y')) {
                self.status = StatusBar::new().message("Clearing all logs...");
                return MainKeyResult::ClearAllLogs;
            }
            self.status = StatusBar::new().message("Clear cancelled");
            return MainKeyResult::Consumed;
        }

        match self.focus {
            Focus::Form => match self.form.handle_key(key) {
                FormAction::Submit(log) => {
                    self.form.begin_submit();
                    MainKeyResult::AddLog(log)
                }
                FormAction::Leave => self.leave_input(),
                FormAction::Consumed => MainKeyResult::Consumed,
                FormAction::Ignored => MainKeyResult::Ignored,
            },
            Focus::Chat => match self.chat.handle_key(key) {
                ChatAction::Send(message) => MainKeyResult::SendChat(message),
                ChatAction::Leave => self.leave_input(),
                ChatAction::Consumed => MainKeyResult::Consumed,
                ChatAction::Ignored => MainKeyResult::Ignored,
            },
            Focus::Settings => match self.settings.handle_key(key) {
                SettingsAction::Save(calories) => {
                    self.settings.begin_save();
                    MainKeyResult::UpdateMaintenance(calories)
                }
                SettingsAction::Leave => self.leave_input(),
                SettingsAction::Consumed => MainKeyResult::Consumed,
                SettingsAction::Ignored => MainKeyResult::Ignored,
            },
            Focus::Navigation => self.handle_navigation_key(key, view),
        }
    }

    fn handle_navigation_key(&mut self, key: KeyEvent, view: &ViewState) -> MainKeyResult {
        if EventHandler::is_quit_event(&key) {
            return MainKeyResult::Quit;
        }

        let log_count = view.logs().len();
        match (view.active_tab(), key.code) {
            (_, KeyCode::Char('r')) => {
                self.status = StatusBar::new().message("Reloading...");
                MainKeyResult::Refresh
            }
            (_, KeyCode::Char('x')) if view.last_failure().is_some() => {
                MainKeyResult::DismissFailure
            }
            (Tab::Dashboard, KeyCode::Down | KeyCode::Char('j')) => {
                self.logs.select_next(log_count);
                MainKeyResult::Consumed
            }
            (Tab::Dashboard, KeyCode::Up | KeyCode::Char('k')) => {
                self.logs.select_previous(log_count);
                MainKeyResult::Consumed
            }
            (Tab::Dashboard, KeyCode::Char('d') | KeyCode::Delete) => self
                .logs
                .selected()
                .and_then(|i| view.logs().get(i))
                .map_or(MainKeyResult::Consumed, |log| {
                    MainKeyResult::DeleteLog(log.id().clone())
                }),
            (Tab::Dashboard, KeyCode::Char('C')) => {
                if log_count > 0 {
                    self.confirm_clear = true;
                    self.status = StatusBar::new()
                        .message(format!("Delete all {log_count} logs? Press y to confirm"))
                        .level(StatusLevel::Warning);
                }
                MainKeyResult::Consumed
            }
            (Tab::Dashboard, KeyCode::Char('a'))
            | (Tab::ManualEntry, KeyCode::Char('i') | KeyCode::Enter) => {
                self.set_focus(Focus::Form);
                MainKeyResult::Consumed
            }
            (Tab::Dashboard, KeyCode::Char('c'))
            | (Tab::Chatbot, KeyCode::Char('i') | KeyCode::Enter) => {
                self.set_focus(Focus::Chat);
                MainKeyResult::Consumed
            }
            (Tab::Settings, KeyCode::Char('i') | KeyCode::Enter) => {
                self.settings.open(view.maintenance_calories());
                self.set_focus(Focus::Settings);
                MainKeyResult::Consumed
            }
            (Tab::WeeklyChart, KeyCode::Char('g')) => {
                self.status = StatusBar::new().message("Generating weekly chart...");
                MainKeyResult::GenerateChart
            }
            _ => MainKeyResult::Ignored,
        }
    }

    fn leave_input(&mut self) -> MainKeyResult {
        self.set_focus(Focus::Navigation);
        MainKeyResult::Consumed
    }

    fn set_focus(&mut self, focus: Focus) {
        self.focus = focus;
        self.form.set_focused(focus == Focus::Form);
        self.chat.set_focused(focus == Focus::Chat);
        self.settings.set_focused(focus == Focus::Settings);
    }

    pub fn on_log_added(&mut self, result: &Result<FoodLogEntry, SyncError>) {
        match result {
            Ok(created) => {
                let name = created
                    .text(LOG_NAME_KEYS)
                    .map_or_else(|| format!("log #{}", created.id()), str::to_string);
                self.form.finish_submit(Ok(name.clone()));
                self.success(format!("Added {name}"));
            }
            Err(e) => self.form.finish_submit(Err(e.api_error().to_string())),
        }
    }

    pub fn on_log_deleted(&mut self, result: &Result<(), SyncError>) {
        if result.is_ok() {
            self.success("Log deleted");
        }
    }

    pub fn on_logs_cleared(&mut self, result: &Result<(), SyncError>) {
        if result.is_ok() {
            self.success("All logs cleared");
        }
    }

    pub fn on_chat_reply(&mut self, result: &Result<ChatReply, SyncError>) {
        match result {
            Ok(reply) => self.chat.push_reply(reply.display_text()),
            Err(e) => self.chat.push_error(e.api_error().to_string()),
        }
    }

    pub fn on_maintenance_updated(
        &mut self,
        result: &Result<MaintenanceCalories, SyncError>,
    ) {
        self.settings.finish_save();
        if let Ok(calories) = result {
            self.success(format!("Maintenance target set to {calories} kcal"));
        }
    }

    pub fn on_weekly_stats(&mut self, result: &Result<(), SyncError>) {
        if result.is_ok() {
            self.success("Weekly chart updated");
        }
    }

    pub fn on_refreshed(&mut self, result: &Result<(), SyncError>) {
        if result.is_ok() {
            self.success("Up to date");
        }
    }

    fn success(&mut self, message: impl Into<String>) {
        self.status = StatusBar::new()
            .message(message)
            .level(StatusLevel::Success);
    }

    fn status_bar(&self, view: &ViewState) -> StatusBar {
        let status = match view.last_failure() {
            Some(failure) if !self.confirm_clear => StatusBar::failure(failure),
            _ => self.status.clone(),
        };
        status.hints(self.hints(view))
    }

    fn hints(&self, view: &ViewState) -> &'static str {
        match (self.focus, view.active_tab()) {
            (Focus::Navigation, _) if view.last_failure().is_some() => {
                "x dismiss  r reload  1-5 tabs  q quit"
            }
            (Focus::Navigation, Tab::Dashboard) => {
                "↑/↓ select  a add  c chat  d delete  C clear  r reload  q quit"
            }
            (Focus::Navigation, Tab::WeeklyChart) => "g generate  r reload  1-5 tabs  q quit",
            (Focus::Navigation, _) => "i edit  r reload  1-5 tabs  q quit",
            _ => "Esc back  Tab next tab  Ctrl-C quit",
        }
    }
}

/// Renders the tab bar, the active tab and the status bar.
pub struct MainScreen<'a> {
    view: &'a ViewState,
}

impl<'a> MainScreen<'a> {
    #[must_use]
    pub const fn new(view: &'a ViewState) -> Self {
        Self { view }
    }
}

impl StatefulWidget for MainScreen<'_> {
    type State = MainScreenState;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        let [header_area, body_area, status_area] = Layout::vertical([
            Constraint::Length(2),
            Constraint::Fill(1),
            Constraint::Length(1),
        ])
        .areas(area);

        TabBar::new(APP_NAME, self.view.active_tab())
            .tagline(TAGLINE)
            .render(header_area, buf);

        match self.view.active_tab() {
            Tab::Dashboard => render_dashboard(self.view, body_area, buf, state),
            Tab::ManualEntry => {
                let [form_area] = Layout::horizontal([Constraint::Max(64)])
                    .flex(Flex::Center)
                    .areas(body_area);
                let [form_area] = Layout::vertical([Constraint::Length(14)]).areas(form_area);
                (&state.form).render(form_area, buf);
            }
            Tab::Chatbot => (&state.chat).render(body_area, buf),
            Tab::WeeklyChart => {
                WeeklyChart::new(
                    self.view.weekly_stats(),
                    self.view.maintenance_calories(),
                )
                .render(body_area, buf);
            }
            Tab::Settings => SettingsView {
                form: &state.settings,
                current: self.view.maintenance_calories(),
            }
            .render(body_area, buf),
        }

        (&state.status_bar(self.view)).render(status_area, buf);
    }
}

fn render_dashboard(view: &ViewState, area: Rect, buf: &mut Buffer, state: &mut MainScreenState) {
    let [left_area, logs_area] =
        Layout::horizontal([Constraint::Percentage(40), Constraint::Fill(1)]).areas(area);
    let [form_area, chat_area] =
        Layout::vertical([Constraint::Length(14), Constraint::Fill(1)]).areas(left_area);

    (&state.form).render(form_area, buf);
    (&state.chat).render(chat_area, buf);

    FoodLogTable::new(view.logs(), &state.timestamp_format)
        .focused(state.focus == Focus::Navigation)
        .render(logs_area, buf, &mut state.logs);
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::application::ViewStateSynchronizer;
    use crate::application::dto::Operation;
    use crate::domain::errors::ApiError;
    use crate::domain::ports::mocks::MockNutritionApi;
    use crossterm::event::KeyModifiers;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    async fn loaded_view(names: &[&str]) -> ViewState {
        let sync = ViewStateSynchronizer::new(Arc::new(MockNutritionApi::new().with_logs(names)));
        sync.initial_load().await.unwrap();
        sync.snapshot()
    }

    #[test]
    fn test_quit_only_from_navigation() {
        let view = ViewState::new(Tab::Chatbot);
        let mut screen = MainScreenState::new("%H:%M");
        screen.enter_tab(Tab::Chatbot, &view);

        assert_eq!(screen.focus(), Focus::Chat);
        assert_eq!(screen.handle_key(key(KeyCode::Char('q')), &view), MainKeyResult::Consumed);
        assert_eq!(screen.handle_key(key(KeyCode::Esc), &view), MainKeyResult::Consumed);
        assert_eq!(screen.focus(), Focus::Navigation);
        assert_eq!(screen.handle_key(key(KeyCode::Char('q')), &view), MainKeyResult::Quit);
    }

    #[test]
    fn test_ctrl_c_always_quits() {
        let view = ViewState::new(Tab::ManualEntry);
        let mut screen = MainScreenState::new("%H:%M");
        screen.enter_tab(Tab::ManualEntry, &view);

        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(screen.handle_key(ctrl_c, &view), MainKeyResult::Quit);
    }

    #[test]
    fn test_tab_switching_sets_focus() {
        let view = ViewState::new(Tab::Dashboard);
        let mut screen = MainScreenState::new("%H:%M");

        assert_eq!(
            screen.handle_key(key(KeyCode::Char('5')), &view),
            MainKeyResult::SelectTab(Tab::Settings)
        );
        assert_eq!(screen.focus(), Focus::Settings);

        // Digits are input while the settings field has focus.
        let view = ViewState::new(Tab::Settings);
        assert_eq!(
            screen.handle_key(key(KeyCode::Char('1')), &view),
            MainKeyResult::Consumed
        );
        assert_eq!(screen.focus(), Focus::Settings);
        assert_eq!(
            screen.handle_key(key(KeyCode::BackTab), &view),
            MainKeyResult::SelectTab(Tab::WeeklyChart)
        );
        assert_eq!(screen.focus(), Focus::Navigation);
    }

    #[tokio::test]
    async fn test_delete_selected_log() {
        let view = loaded_view(&["apple", "pear"]).await;
        let mut screen = MainScreenState::new("%H:%M");

        assert_eq!(screen.handle_key(key(KeyCode::Char('d')), &view), MainKeyResult::Consumed);

        screen.handle_key(key(KeyCode::Down), &view);
        screen.handle_key(key(KeyCode::Down), &view);
        assert_eq!(
            screen.handle_key(key(KeyCode::Char('d')), &view),
            MainKeyResult::DeleteLog(LogId::Number(2))
        );
    }

    #[tokio::test]
    async fn test_clear_requires_confirmation() {
        let view = loaded_view(&["apple"]).await;
        let mut screen = MainScreenState::new("%H:%M");

        assert_eq!(screen.handle_key(key(KeyCode::Char('C')), &view), MainKeyResult::Consumed);
        assert_eq!(screen.status().current_level(), StatusLevel::Warning);
        assert_eq!(screen.handle_key(key(KeyCode::Char('n')), &view), MainKeyResult::Consumed);
        assert_eq!(screen.status().text(), "Clear cancelled");

        screen.handle_key(key(KeyCode::Char('C')), &view);
        assert_eq!(
            screen.handle_key(key(KeyCode::Char('y')), &view),
            MainKeyResult::ClearAllLogs
        );
    }

    #[test]
    fn test_clear_ignored_without_logs() {
        let view = ViewState::new(Tab::Dashboard);
        let mut screen = MainScreenState::new("%H:%M");

        screen.handle_key(key(KeyCode::Char('C')), &view);
        assert_eq!(screen.handle_key(key(KeyCode::Char('y')), &view), MainKeyResult::Ignored);
    }

    #[test]
    fn test_quick_add_submits_form() {
        let view = ViewState::new(Tab::Dashboard);
        let mut screen = MainScreenState::new("%H:%M");

        screen.handle_key(key(KeyCode::Char('a')), &view);
        assert_eq!(screen.focus(), Focus::Form);
        for c in "tea".chars() {
            screen.handle_key(key(KeyCode::Char(c)), &view);
        }
        screen.handle_key(key(KeyCode::Down), &view);
        screen.handle_key(key(KeyCode::Char('5')), &view);

        let MainKeyResult::AddLog(log) = screen.handle_key(key(KeyCode::Enter), &view) else {
            panic!("expected add");
        };
        assert_eq!(log.fields()["name"], "tea");

        screen.on_log_added(&Err(SyncError::new(
            Operation::AddLog,
            ApiError::status(422, "calories must be positive"),
        )));
        assert_eq!(screen.form.error(), Some("server returned 422: calories must be positive"));
    }

    #[test]
    fn test_chart_generation_key() {
        let view = ViewState::new(Tab::WeeklyChart);
        let mut screen = MainScreenState::new("%H:%M");
        assert_eq!(
            screen.handle_key(key(KeyCode::Char('g')), &view),
            MainKeyResult::GenerateChart
        );
        assert_eq!(screen.handle_key(key(KeyCode::Char('r')), &view), MainKeyResult::Refresh);
    }

    #[tokio::test]
    async fn test_render_each_tab() {
        let sync = ViewStateSynchronizer::new(Arc::new(
            MockNutritionApi::new()
                .with_logs(&["apple"])
                .with_weekly(vec![serde_json::json!({"day": "Mon", "calories": 2100})]),
        ));
        sync.initial_load().await.unwrap();
        sync.refresh_weekly_stats().await.unwrap();
        let mut screen = MainScreenState::new("%H:%M");
        let area = Rect::new(0, 0, 100, 30);

        for tab in Tab::ALL {
            sync.set_active_tab(tab);
            let view = sync.snapshot();
            screen.enter_tab(tab, &view);
            let mut buf = Buffer::empty(area);
            MainScreen::new(&view).render(area, &mut buf, &mut screen);

            let header: String = (0..13).map(|x| buf[(x, 0)].symbol().to_string()).collect();
            assert_eq!(header, APP_NAME);
        }
    }
}
