//! CLI error types.

use std::fmt;

use turnguide::config::ConfigError;
use turnguide::feed::FeedError;
use turnguide::route::RouteError;

/// Errors that can occur while running a CLI command.
#[derive(Debug)]
pub enum CliError {
    /// Route file could not be loaded.
    Route(RouteError),

    /// Mock position file could not be loaded.
    Feed(FeedError),

    /// Configuration problem.
    Config(String),

    /// Guidance output could not be written.
    Output(String),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Route(e) => write!(f, "Failed to load route: {}", e),
            CliError::Feed(e) => write!(f, "Failed to load positions: {}", e),
            CliError::Config(msg) => write!(f, "Configuration error: {}", msg),
            CliError::Output(msg) => write!(f, "Output error: {}", msg),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::Route(e) => Some(e),
            CliError::Feed(e) => Some(e),
            CliError::Config(_) => None,
            CliError::Output(_) => None,
        }
    }
}

impl From<RouteError> for CliError {
    fn from(e: RouteError) -> Self {
        CliError::Route(e)
    }
}

impl From<FeedError> for CliError {
    fn from(e: FeedError) -> Self {
        CliError::Feed(e)
    }
}

impl From<ConfigError> for CliError {
    fn from(e: ConfigError) -> Self {
        CliError::Config(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_display() {
        let err = CliError::Config("missing key".to_string());
        assert!(err.to_string().contains("Configuration error"));
        assert!(err.to_string().contains("missing key"));
    }

    #[test]
    fn test_route_error_wraps_source() {
        let err: CliError = RouteError::EmptyRoute.into();
        assert!(matches!(err, CliError::Route(_)));
        assert!(err.to_string().contains("no instructions"));
    }
}
