//! Error types and handling for the weathergrid library

use thiserror::Error;

/// Main error type for weathergrid
///
/// Lookups that find nothing are not errors; they return `None`.
#[derive(Error, Debug)]
pub enum WeatherGridError {
    /// Configuration-related errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Remote service communication errors
    #[error("API error: {message}")]
    Api { message: String },

    /// Input validation errors
    #[error("Invalid input: {message}")]
    Validation { message: String },

    /// Malformed payload from a collaborator
    #[error("Parse error: {message}")]
    Parse { message: String },

    /// I/O operation errors
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
}

impl WeatherGridError {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a new API error
    pub fn api<S: Into<String>>(message: S) -> Self {
        Self::Api {
            message: message.into(),
        }
    }

    /// Create a new validation error
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Create a new parse error
    pub fn parse<S: Into<String>>(message: S) -> Self {
        Self::Parse {
            message: message.into(),
        }
    }

    /// Get a user-friendly error message
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            WeatherGridError::Config { message } => {
                format!("Configuration error: {message}. Please check your config file.")
            }
            WeatherGridError::Api { .. } => {
                "Unable to reach the weather or location service. Please check your network."
                    .to_string()
            }
            WeatherGridError::Validation { message } => format!("Invalid input: {message}"),
            WeatherGridError::Parse { .. } => {
                "Received an unexpected response from a remote service.".to_string()
            }
            WeatherGridError::Io { .. } => {
                "File operation failed. Please check file permissions.".to_string()
            }
        }
    }
}
