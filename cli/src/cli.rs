use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::info;

use crate::{
    client::ApiClient,
    config::SmokeConfig,
    console::Console,
    error::CliError,
    report::RunReport,
    runner::SmokeRunner,
};

const REDACTED: &str = "********";

#[derive(Debug, Parser)]
#[command(name = "rotafacil-smoke")]
#[command(about = "Smoke-test harness for the RotaFácil HTTP API")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_about = None)]
pub struct Cli {
    /// Enable verbose logging
    #[arg(long, global = true)]
    pub verbose: bool,

    /// Configuration file path
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Root URL of the API under test
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// Per-request timeout in seconds
    #[arg(long, global = true)]
    pub timeout_secs: Option<u64>,

    /// Email of the pre-existing account used by the login check
    #[arg(long, global = true)]
    pub login_email: Option<String>,

    /// Password of the pre-existing account used by the login check
    #[arg(long, global = true)]
    pub login_password: Option<String>,

    /// Exit non-zero when the run aborts or any check fails
    #[arg(long, global = true)]
    pub strict: bool,

    /// Subcommands
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Run the smoke checks (the default)
    Run,

    /// Print the resolved configuration, with passwords redacted
    Config,
}

impl Cli {
    pub async fn run(&self) -> Result<(), CliError> {
        match &self.command {
            Some(Commands::Run) | None => self.handle_run().await,
            Some(Commands::Config) => self.handle_config(),
        }
    }

    /// Config file and environment first, then flags on top
    pub fn resolve_config(&self) -> Result<SmokeConfig, CliError> {
        let mut config = SmokeConfig::load(self.config.as_deref())?;
        self.apply_overrides(&mut config);
        config.normalize();
        config
            .validate()
            .map_err(|e| CliError::Config(e.to_string()))?;
        Ok(config)
    }

    pub fn apply_overrides(&self, config: &mut SmokeConfig) {
        if let Some(ref url) = self.base_url {
            config.base_url = url.clone();
        }
        if let Some(secs) = self.timeout_secs {
            config.timeout_secs = secs;
        }
        if let Some(ref email) = self.login_email {
            config.login.email = email.clone();
        }
        if let Some(ref password) = self.login_password {
            config.login.password = password.clone();
        }
    }

    async fn handle_run(&self) -> Result<(), CliError> {
        let config = self.resolve_config()?;
        let client = ApiClient::new(&config)?;

        let mut runner = SmokeRunner::new(client, Console::stdout(), &config);
        let report = runner.run().await;

        self.finish(&report)
    }

    /// Outcome of a finished run as seen by the process
    pub fn finish(&self, report: &RunReport) -> Result<(), CliError> {
        if !report.is_success() {
            if self.strict {
                return Err(CliError::ChecksFailed {
                    failed: report.failed(),
                    aborted: report.aborted,
                });
            }
            info!("Ignoring failed checks for the exit status (use --strict to enforce)");
        }
        Ok(())
    }

    fn handle_config(&self) -> Result<(), CliError> {
        let mut config = self.resolve_config()?;
        config.login.password = REDACTED.to_string();
        config.student.password = REDACTED.to_string();

        let rendered = serde_json::to_string_pretty(&config)
            .map_err(|e| CliError::Other(e.into()))?;
        println!("{rendered}");
        Ok(())
    }
}
