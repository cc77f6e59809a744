use super::app_config::LogLevel;
use crate::domain::Tab;
use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Default, Parser)]
#[command(
    name = "macrotrack",
    version,
    about = "A terminal client for the Macro Tracker nutrition API",
    long_about = None
)]
pub struct CliArgs {
    /// Configuration file path.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Base URL of the nutrition API.
    #[arg(long, value_name = "URL", env = "MACROTRACK_API_URL")]
    pub api_url: Option<String>,

    /// Request timeout in seconds.
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Tab to open on startup.
    #[arg(long, value_enum)]
    pub tab: Option<Tab>,

    /// Log file path.
    #[arg(long, value_name = "PATH")]
    pub log_path: Option<PathBuf>,

    /// Log verbosity level.
    #[arg(long, value_enum)]
    pub log_level: Option<LogLevel>,
}
