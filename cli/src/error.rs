use std::fmt;
use thiserror::Error;

/// Failure of a single check against the API
#[derive(Error, Debug)]
pub enum SmokeError {
    /// Transport failure: DNS, refused connection, timeout
    #[error("{source}")]
    Network {
        #[from]
        source: reqwest::Error,
    },

    /// The server answered with an unexpected status
    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },

    /// The body was not the JSON shape the check expects
    #[error("Invalid response body: {source}")]
    Parse {
        #[from]
        source: serde_json::Error,
    },

    /// Protected check requested without a session token
    #[error("No token available")]
    MissingToken,
}

impl SmokeError {
    pub fn status(status: reqwest::StatusCode, body: String) -> Self {
        Self::Status {
            status: status.as_u16(),
            body,
        }
    }
}

/// Main error type for the smoke-test CLI
#[derive(Debug)]
pub enum CliError {
    /// Configuration-related errors
    Config(String),
    /// File I/O errors
    Io(std::io::Error),
    /// HTTP client setup errors
    Communication(String),
    /// Strict mode: the run aborted or at least one check failed
    ChecksFailed { failed: usize, aborted: bool },
    /// Generic errors from anyhow
    Other(anyhow::Error),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Config(msg) => write!(f, "Configuration error: {msg}"),
            CliError::Io(err) => write!(f, "I/O error: {err}"),
            CliError::Communication(msg) => write!(f, "Communication error: {msg}"),
            CliError::ChecksFailed { failed, aborted } => {
                if *aborted {
                    write!(f, "Run aborted: API not available")
                } else {
                    write!(f, "{failed} check(s) failed")
                }
            }
            CliError::Other(err) => write!(f, "Error: {err}"),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::Io(err) => Some(err),
            CliError::Other(err) => Some(err.as_ref()),
            _ => None,
        }
    }
}

impl CliError {
    /// Get the exit code for this error type
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Config(_) => 2,
            CliError::Io(_) => 3,
            CliError::Communication(_) => 7,
            CliError::ChecksFailed { .. } => 1,
            CliError::Other(_) => 1,
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        CliError::Io(err)
    }
}

impl From<anyhow::Error> for CliError {
    fn from(err: anyhow::Error) -> Self {
        CliError::Other(err)
    }
}

impl From<config::ConfigError> for CliError {
    fn from(err: config::ConfigError) -> Self {
        CliError::Config(err.to_string())
    }
}

impl From<SmokeError> for CliError {
    fn from(err: SmokeError) -> Self {
        CliError::Communication(err.to_string())
    }
}
