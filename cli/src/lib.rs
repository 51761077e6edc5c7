//! Smoke-test harness for the RotaFácil HTTP API.
//!
//! A run checks the API health, registers a throwaway student (falling back
//! to a fixed login), calls the token-protected `/auth/me` endpoint and
//! lists the active routes, printing one emoji-tagged line per outcome.

pub mod checks;
pub mod cli;
pub mod client;
pub mod config;
pub mod console;
pub mod error;
pub mod logging;
pub mod report;
pub mod runner;

pub use client::ApiClient;
pub use config::SmokeConfig;
pub use console::Console;
pub use error::{CliError, SmokeError};
pub use report::{CheckKind, CheckOutcome, RunReport};
pub use runner::SmokeRunner;
