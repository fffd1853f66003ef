//! Error types for the salary engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for every condition the deduction engine can report.

use thiserror::Error;

/// The main error type for the salary engine.
///
/// All fallible operations in the engine return this error type, making it
/// easy to handle errors consistently throughout the application.
///
/// # Example
///
/// ```
/// use salary_engine::error::EngineError;
///
/// let error = EngineError::InvalidInput {
///     field: "gross_yearly".to_string(),
///     message: "must be greater than zero".to_string(),
/// };
/// assert_eq!(error.to_string(), "Invalid input 'gross_yearly': must be greater than zero");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// A caller-supplied value was out of range.
    #[error("Invalid input '{field}': {message}")]
    InvalidInput {
        /// The input field that was rejected.
        field: String,
        /// A description of why the value was rejected.
        message: String,
    },

    /// A region or student loan plan tag was not recognised.
    #[error("Unknown {kind}: {value}")]
    UnknownConfiguration {
        /// The kind of tag (e.g. "tax region").
        kind: String,
        /// The tag that was not recognised.
        value: String,
    },

    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// Configuration parsed but describes an impossible table.
    #[error("Invalid configuration in '{path}': {message}")]
    InvalidConfig {
        /// The path to the offending file.
        path: String,
        /// A description of what is wrong with it.
        message: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;

impl EngineError {
    pub(crate) fn invalid_input(field: &str, message: impl Into<String>) -> Self {
        EngineError::InvalidInput {
            field: field.to_string(),
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_input_displays_field_and_message() {
        let error = EngineError::invalid_input("pension_percent", "must not be negative");
        assert_eq!(
            error.to_string(),
            "Invalid input 'pension_percent': must not be negative"
        );
    }

    #[test]
    fn test_unknown_configuration_displays_kind_and_value() {
        let error = EngineError::UnknownConfiguration {
            kind: "tax region".to_string(),
            value: "wales".to_string(),
        };
        assert_eq!(error.to_string(), "Unknown tax region: wales");
    }

    #[test]
    fn test_config_not_found_displays_path() {
        let error = EngineError::ConfigNotFound {
            path: "/missing/income_tax.yaml".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Configuration file not found: /missing/income_tax.yaml"
        );
    }

    #[test]
    fn test_config_parse_error_displays_path_and_message() {
        let error = EngineError::ConfigParseError {
            path: "/config/bad.yaml".to_string(),
            message: "invalid YAML syntax".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Failed to parse configuration file '/config/bad.yaml': invalid YAML syntax"
        );
    }

    #[test]
    fn test_invalid_config_displays_path_and_message() {
        let error = EngineError::InvalidConfig {
            path: "income_tax.yaml".to_string(),
            message: "region 'standard' has no bands".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Invalid configuration in 'income_tax.yaml': region 'standard' has no bands"
        );
    }

    #[test]
    fn test_errors_implement_std_error() {
        fn assert_error<T: std::error::Error + Send + Sync + 'static>() {}
        assert_error::<EngineError>();
    }

    #[test]
    fn test_error_propagation_with_question_mark() {
        fn rejects() -> EngineResult<()> {
            Err(EngineError::invalid_input("gross_yearly", "must be greater than zero"))
        }

        fn propagates_error() -> EngineResult<()> {
            rejects()?;
            Ok(())
        }

        assert!(propagates_error().is_err());
    }
}
