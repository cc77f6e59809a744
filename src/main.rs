use std::sync::Arc;

use clap::Parser;
use color_eyre::eyre::Result;
use tracing::{info, warn};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use macrotrack::application::ViewStateSynchronizer;
use macrotrack::infrastructure::{AppConfig, CliArgs, NutritionApiClient, StorageManager};
use macrotrack::presentation::App;

fn init_logging(config: &AppConfig) -> Result<()> {
    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::from_level(config.log_level.to_tracing_level()).into())
        .from_env_lossy();

    // The terminal belongs to the UI, so without a log file nothing is written.
    if let Some(log_path) = config.effective_log_path() {
        if let Some(parent) = log_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_path)?;

        let file_layer = fmt::layer()
            .with_writer(file)
            .with_ansi(false)
            .with_target(true)
            .with_thread_ids(false);

        tracing_subscriber::registry()
            .with(filter)
            .with(file_layer)
            .init();

        info!(path = %log_path.display(), "Logging initialized");
    } else {
        tracing_subscriber::registry().with(filter).init();
    }

    Ok(())
}

fn load_config() -> Result<AppConfig> {
    let args = CliArgs::parse();
    let storage = StorageManager::new()?;
    let mut config = storage.load_config(args.config.as_deref())?;
    config.merge_with_args(args);
    Ok(config)
}

fn create_app() -> Result<App> {
    let config = load_config()?;

    init_logging(&config)?;
    for message in &config.load_warnings {
        warn!("{message}");
        // The UI takes over the screen next; this stays visible after exit.
        eprintln!("macrotrack: {message}");
    }

    info!(
        version = macrotrack::VERSION,
        api_url = %config.api_url,
        "Starting {}",
        macrotrack::NAME
    );

    let client = Arc::new(NutritionApiClient::new(
        config.api_url.clone(),
        config.request_timeout(),
    )?);
    let sync = ViewStateSynchronizer::with_tab(client, config.ui.default_tab);

    Ok(App::new(sync, config.api_url, config.ui.timestamp_format))
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    dotenvy::dotenv().ok();

    let app = create_app()?;

    let mut terminal = ratatui::init();

    let result = app.run(&mut terminal).await;

    ratatui::restore();

    result
}
