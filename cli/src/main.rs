use clap::Parser;
use tracing::{debug, info};

use rotafacil_cli::cli::Cli;
use rotafacil_cli::error::CliError;
use rotafacil_cli::logging::init_logging;

#[tokio::main]
async fn main() -> Result<(), CliError> {
    let cli = Cli::parse();

    init_logging(cli.verbose)?;

    info!("rotafacil-smoke starting");
    debug!("Subcommand: {:?}, strict: {}", cli.command, cli.strict);

    match cli.run().await {
        Ok(_) => {
            info!("rotafacil-smoke completed");
            Ok(())
        }
        Err(e) => {
            tracing::error!("CLI error: {:?}", e);
            eprintln!("{e}");
            std::process::exit(e.exit_code());
        }
    }
}
