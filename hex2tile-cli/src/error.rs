//! CLI error types.

use std::error::Error;
use std::fmt;

use hex2tile::config::ConfigError;
use hex2tile::Hex2TileError;

/// Errors surfaced to the user by the CLI.
#[derive(Debug)]
pub enum CliError {
    /// Invalid command-line arguments.
    Args(String),

    /// Failure inside the pyramid build.
    Build(Hex2TileError),

    /// The run summary could not be written.
    Summary(String),
}

impl CliError {
    /// Process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        1
    }

    /// Print the error and its source chain to stderr.
    pub fn report(&self) {
        eprintln!("Error: {}", self);
        let mut source = self.source();
        while let Some(cause) = source {
            eprintln!("  caused by: {}", cause);
            source = cause.source();
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Args(msg) => write!(f, "Invalid arguments: {}", msg),
            CliError::Build(e) => write!(f, "{}", e),
            CliError::Summary(msg) => write!(f, "Failed to write summary: {}", msg),
        }
    }
}

impl Error for CliError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            // Display already includes the inner message; start at its cause.
            CliError::Build(e) => e.source(),
            CliError::Args(_) | CliError::Summary(_) => None,
        }
    }
}

impl From<Hex2TileError> for CliError {
    fn from(e: Hex2TileError) -> Self {
        CliError::Build(e)
    }
}

impl From<ConfigError> for CliError {
    fn from(e: ConfigError) -> Self {
        CliError::Build(Hex2TileError::Config(e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_converts_to_build() {
        let err: CliError = ConfigError::Empty.into();
        assert!(matches!(err, CliError::Build(Hex2TileError::Config(_))));
        assert_eq!(err.exit_code(), 1);
        assert!(err.to_string().contains("no hex entries"));
    }

    #[test]
    fn test_args_error_display() {
        let err = CliError::Args("--min-zoom exceeds --max-zoom".to_string());
        assert_eq!(
            err.to_string(),
            "Invalid arguments: --min-zoom exceeds --max-zoom"
        );
    }
}
