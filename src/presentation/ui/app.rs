//! Main application orchestrator.

use std::future::Future;
use std::time::Duration;

use crossterm::event::{Event, EventStream, KeyEvent, KeyEventKind};
use futures_util::StreamExt;
use ratatui::{DefaultTerminal, Frame};
use tokio::sync::mpsc;
use tokio::time::interval;
use tracing::{debug, info};

use crate::application::{SyncError, ViewStateSynchronizer};
use crate::domain::{ChatReply, FoodLogEntry, MaintenanceCalories, Tab};
use crate::presentation::events::{EventHandler, EventResult};
use crate::presentation::ui::{LoadingScreen, MainKeyResult, MainScreen, MainScreenState};

const SPINNER_TICK_RATE: Duration = Duration::from_millis(80);

/// Completion of a spawned synchronizer operation.
#[derive(Debug)]
enum Action {
    InitialLoad(Result<(), SyncError>),
    Refreshed(Result<(), SyncError>),
    WeeklyStats(Result<(), SyncError>),
    LogAdded(Result<FoodLogEntry, SyncError>),
    LogDeleted(Result<(), SyncError>),
    LogsCleared(Result<(), SyncError>),
    ChatReplied(Result<ChatReply, SyncError>),
    MaintenanceUpdated(Result<MaintenanceCalories, SyncError>),
}

pub struct App {
    sync: ViewStateSynchronizer,
    screen: MainScreenState,
    loading: LoadingScreen,
    action_tx: mpsc::UnboundedSender<Action>,
    action_rx: mpsc::UnboundedReceiver<Action>,
    exiting: bool,
}

impl App {
    #[must_use]
    pub fn new(
        sync: ViewStateSynchronizer,
        api_url: impl Into<String>,
        timestamp_format: impl Into<String>,
    ) -> Self {
        let (action_tx, action_rx) = mpsc::unbounded_channel();
        let mut screen = MainScreenState::new(timestamp_format);
        sync.with_state(|view| screen.enter_tab(view.active_tab(), view));

        Self {
            sync,
            screen,
            loading: LoadingScreen::new(api_url),
            action_tx,
            action_rx,
            exiting: false,
        }
    }

    /// # Errors
    /// Returns error if drawing to the terminal fails.
    pub async fn run(mut self, terminal: &mut DefaultTerminal) -> color_eyre::Result<()> {
        let sync = self.sync.clone();
        self.spawn(async move { sync.initial_load().await }, Action::InitialLoad);

        self.run_event_loop(terminal).await?;

        info!("Application exiting normally");
        Ok(())
    }

    async fn run_event_loop(&mut self, terminal: &mut DefaultTerminal) -> color_eyre::Result<()> {
        let mut terminal_events = EventStream::new();
        let mut spinner_interval = interval(SPINNER_TICK_RATE);

        terminal.draw(|frame| self.render(frame))?;

        while !self.exiting {
            tokio::select! {
                Some(action) = self.action_rx.recv() => {
                    self.handle_action(action);
                    terminal.draw(|frame| self.render(frame))?;
                }

                _ = spinner_interval.tick() => {
                    if self.sync.with_state(|view| view.is_loading()) {
                        self.loading.tick();
                        terminal.draw(|frame| self.render(frame))?;
                    }
                }

                Some(event) = terminal_events.next() => {
                    if let EventResult::Exit = self.handle_terminal_event(event?) {
                        self.exiting = true;
                    }
                    terminal.draw(|frame| self.render(frame))?;
                }
            }
        }

        Ok(())
    }

    fn handle_terminal_event(&mut self, event: Event) -> EventResult {
        match event {
            Event::Key(key) if key.kind == KeyEventKind::Press => self.handle_key(key),
            Event::Resize(..) => EventResult::Consumed,
            _ => EventResult::Continue,
        }
    }

    fn render(&mut self, frame: &mut Frame) {
        let view = self.sync.snapshot();
        if view.is_loading() {
            frame.render_widget(&self.loading, frame.area());
        } else {
            frame.render_stateful_widget(MainScreen::new(&view), frame.area(), &mut self.screen);
        }
    }

    fn handle_key(&mut self, key: KeyEvent) -> EventResult {
        let view = self.sync.snapshot();
        if view.is_loading() {
            return if EventHandler::is_quit_event(&key) {
                EventResult::Exit
            } else {
                EventResult::Continue
            };
        }

        let sync = self.sync.clone();
        match self.screen.handle_key(key, &view) {
            MainKeyResult::Quit => return EventResult::Exit,
            MainKeyResult::SelectTab(tab) => self.select_tab(tab),
            MainKeyResult::AddLog(log) => {
                debug!("Submitting food log");
                self.spawn(async move { sync.add_log(&log).await }, Action::LogAdded);
            }
            MainKeyResult::DeleteLog(id) => {
                debug!(log_id = %id, "Deleting food log");
                self.spawn(async move { sync.delete_log(&id).await }, Action::LogDeleted);
            }
            MainKeyResult::ClearAllLogs => {
                self.spawn(async move { sync.clear_all_logs().await }, Action::LogsCleared);
            }
            MainKeyResult::SendChat(message) => {
                self.spawn(
                    async move { sync.chat_submit(&message).await },
                    Action::ChatReplied,
                );
            }
            MainKeyResult::UpdateMaintenance(calories) => {
                self.spawn(
                    async move {
                        sync.update_maintenance_calories(calories)
                            .await
                            .map(|()| calories)
                    },
                    Action::MaintenanceUpdated,
                );
            }
            MainKeyResult::GenerateChart => {
                self.spawn(
                    async move { sync.refresh_weekly_stats().await },
                    Action::WeeklyStats,
                );
            }
            MainKeyResult::Refresh => {
                self.spawn(async move { sync.refresh().await }, Action::Refreshed);
            }
            MainKeyResult::DismissFailure => self.sync.dismiss_failure(),
            MainKeyResult::Consumed => return EventResult::Consumed,
            MainKeyResult::Ignored => {}
        }

        EventResult::Continue
    }

    fn select_tab(&self, tab: Tab) {
        self.sync.set_active_tab(tab);
    }

    /// Runs `operation` on the runtime and reports its result as an action.
    fn spawn<F, T>(&self, operation: F, into_action: fn(T) -> Action)
    where
        F: Future<Output = T> + Send + 'static,
        T: Send + 'static,
    {
        let tx = self.action_tx.clone();
        tokio::spawn(async move {
            let result = operation.await;
            // The receiver only goes away when the app is exiting.
            let _ = tx.send(into_action(result));
        });
    }

    fn handle_action(&mut self, action: Action) {
        match action {
            Action::InitialLoad(result) => {
                if result.is_ok() {
                    info!("Initial load complete");
                }
                // Prefill inputs with the loaded values.
                self.sync
                    .with_state(|view| self.screen.enter_tab(view.active_tab(), view));
            }
            Action::Refreshed(result) => self.screen.on_refreshed(&result),
            Action::WeeklyStats(result) => self.screen.on_weekly_stats(&result),
            Action::LogAdded(result) => self.screen.on_log_added(&result),
            Action::LogDeleted(result) => self.screen.on_log_deleted(&result),
            Action::LogsCleared(result) => self.screen.on_logs_cleared(&result),
            Action::ChatReplied(result) => self.screen.on_chat_reply(&result),
            Action::MaintenanceUpdated(result) => self.screen.on_maintenance_updated(&result),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::domain::ports::mocks::{Endpoint, MockNutritionApi};
    use crossterm::event::{KeyCode, KeyModifiers};

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn app(api: MockNutritionApi, tab: Tab) -> (Arc<MockNutritionApi>, App) {
        let api = Arc::new(api);
        let sync = ViewStateSynchronizer::with_tab(api.clone(), tab);
        (api, App::new(sync, "http://test", "%H:%M"))
    }

    async fn next_action(app: &mut App) {
        let action = app.action_rx.recv().await.unwrap();
        app.handle_action(action);
    }

    #[tokio::test]
    async fn test_keys_are_ignored_while_loading() {
        let (api, mut app) = app(MockNutritionApi::new(), Tab::Dashboard);

        assert_eq!(app.handle_key(key(KeyCode::Char('r'))), EventResult::Continue);
        assert_eq!(api.total_calls(), 0);
        assert_eq!(app.handle_key(key(KeyCode::Char('q'))), EventResult::Exit);
    }

    #[tokio::test]
    async fn test_delete_runs_through_synchronizer() {
        let (api, mut app) = app(MockNutritionApi::new().with_logs(&["apple"]), Tab::Dashboard);
        app.sync.initial_load().await.unwrap();

        app.handle_key(key(KeyCode::Down));
        app.handle_key(key(KeyCode::Char('d')));
        next_action(&mut app).await;

        assert!(app.sync.snapshot().logs().is_empty());
        assert_eq!(api.calls(Endpoint::DeleteLog), 1);
        assert_eq!(app.screen.status().text(), "Log deleted");
    }

    #[tokio::test]
    async fn test_chat_reply_reaches_transcript() {
        let (_api, mut app) = app(MockNutritionApi::new(), Tab::Chatbot);
        app.sync.initial_load().await.unwrap();

        for c in "soup".chars() {
            app.handle_key(key(KeyCode::Char(c)));
        }
        app.handle_key(key(KeyCode::Enter));
        next_action(&mut app).await;

        assert_eq!(app.sync.snapshot().logs().len(), 1);
    }

    #[tokio::test]
    async fn test_tab_key_switches_active_tab() {
        let (_api, mut app) = app(MockNutritionApi::new(), Tab::Dashboard);
        app.sync.initial_load().await.unwrap();

        app.handle_key(key(KeyCode::Char('4')));
        assert_eq!(app.sync.snapshot().active_tab(), Tab::WeeklyChart);

        app.handle_key(key(KeyCode::Char('g')));
        next_action(&mut app).await;
        assert_eq!(app.screen.status().text(), "Weekly chart updated");
    }

    #[tokio::test]
    async fn test_failed_maintenance_update_is_dismissable() {
        let (api, mut app) = app(MockNutritionApi::new(), Tab::Settings);
        app.sync.initial_load().await.unwrap();
        api.fail(Endpoint::UpdateMaintenance);

        app.handle_key(key(KeyCode::Enter));
        next_action(&mut app).await;
        assert!(app.sync.snapshot().last_failure().is_some());

        app.handle_key(key(KeyCode::Esc));
        app.handle_key(key(KeyCode::Char('x')));
        assert!(app.sync.snapshot().last_failure().is_none());
    }
}
