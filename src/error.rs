//! Error types for ttnconf.
//!
//! Only conditions the store cannot recover from locally are errors. Malformed
//! lines and out-of-range option values are repaired and logged instead.

use crate::exit_codes;
use std::path::PathBuf;
use thiserror::Error;

/// Main error type for settings store operations.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The backing file could not be read, created, or written.
    #[error("I/O error accessing config at '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The backing file exists but its content is not valid UTF-8.
    #[error("config at '{}' is not valid UTF-8 text", .path.display())]
    Encoding { path: PathBuf },

    /// The option has no allow-list, so it cannot be validated.
    #[error("option '{0}' has no allowed values defined")]
    UnknownOption(String),

    /// User provided invalid arguments or asked for something that is not there.
    #[error("{0}")]
    UserError(String),
}

impl ConfigError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ConfigError::Io {
            path: path.into(),
            source,
        }
    }

    /// Returns the appropriate exit code for this error type.
    pub fn exit_code(&self) -> i32 {
        match self {
            ConfigError::Io { .. } => exit_codes::IO_FAILURE,
            ConfigError::Encoding { .. } => exit_codes::PARSE_FAILURE,
            ConfigError::UnknownOption(_) => exit_codes::USER_ERROR,
            ConfigError::UserError(_) => exit_codes::USER_ERROR,
        }
    }
}

/// Result type alias for ttnconf operations.
pub type Result<T> = std::result::Result<T, ConfigError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn io_error_has_correct_exit_code() {
        let err = ConfigError::io(
            "config.ini",
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        );
        assert_eq!(err.exit_code(), exit_codes::IO_FAILURE);
    }

    #[test]
    fn encoding_error_has_correct_exit_code() {
        let err = ConfigError::Encoding {
            path: PathBuf::from("config.ini"),
        };
        assert_eq!(err.exit_code(), exit_codes::PARSE_FAILURE);
    }

    #[test]
    fn user_errors_have_correct_exit_code() {
        assert_eq!(
            ConfigError::UnknownOption("colour".to_string()).exit_code(),
            exit_codes::USER_ERROR
        );
        assert_eq!(
            ConfigError::UserError("nope".to_string()).exit_code(),
            exit_codes::USER_ERROR
        );
    }

    #[test]
    fn error_messages_are_descriptive() {
        let err = ConfigError::UnknownOption("colour".to_string());
        assert_eq!(err.to_string(), "option 'colour' has no allowed values defined");

        let err = ConfigError::io(
            "/tmp/x/config.ini",
            std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        );
        assert_eq!(
            err.to_string(),
            "I/O error accessing config at '/tmp/x/config.ini': gone"
        );
    }
}
