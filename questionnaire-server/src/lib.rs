//! HTTP API and command-line runner for questionnaire surveys.
//!
//! The server keeps live sessions in memory, validates every submitted answer
//! with the `questionnaire` engine and appends accepted answers to the SQLite
//! response log before acknowledging them.

pub mod commands;
pub mod config;
pub mod error;
pub mod routes;
pub mod server;
pub mod state;
pub mod survey;

pub use config::{AppConfig, ConfigError};
pub use error::ApiError;
pub use server::{router, serve};
pub use state::AppState;
pub use survey::load_survey;
