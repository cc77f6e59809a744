//! Macrotrack - a terminal client for the Macro Tracker nutrition API.
//!
//! The crate keeps a local view of food logs, weekly statistics and the
//! maintenance calorie target in step with a remote REST backend, and
//! renders it as a tabbed terminal UI.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

/// Application layer containing the view-state synchronizer and DTOs.
pub mod application;
/// Domain layer containing entities, errors, and port definitions.
pub mod domain;
/// Infrastructure layer containing the HTTP adapter and configuration.
pub mod infrastructure;
/// Presentation layer containing UI components and event handling.
pub mod presentation;

/// Current version of the application.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name.
pub const NAME: &str = "macrotrack";
